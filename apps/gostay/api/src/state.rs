//! Application state management.
//!
//! Built once at startup and borrowed by the route builders in [`crate::api`].

use axum_helpers::JwtAuth;
use domain_bookings::BookingNotifier;
use domain_payments::CheckoutProvider;
use std::sync::Arc;

/// Shared application state.
///
/// Cloning is cheap: every field is a pool handle or an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: database::postgres::DatabaseConnection,
    pub jwt_auth: JwtAuth,
    /// Booking confirmation delivery (SMTP or in-memory capture)
    pub notifier: Arc<dyn BookingNotifier>,
    pub checkout: Arc<dyn CheckoutProvider>,
}
