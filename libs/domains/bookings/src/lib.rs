//! Bookings Domain
//!
//! Room availability, stay pricing, booking creation and the guest/owner
//! booking views of GoStay.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints under /bookings
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐     ┌──────────────┐
//! │   Service   │ ──▶ │   Notifier   │  ← confirmation email (best-effort)
//! └──────┬──────┘     └──────────────┘
//!        │  availability + pricing
//! ┌──────▼──────┐
//! │ Repository  │  ← in-memory or PostgreSQL
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← records, joined views, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use domain_bookings::{handlers, BookingService, InMemoryBookingRepository, NoopNotifier};
//!
//! let repository = InMemoryBookingRepository::new();
//! let service = BookingService::new(repository, Arc::new(NoopNotifier));
//! let router = handlers::router(service, jwt_auth);
//! ```

pub mod availability;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod notifier;
pub mod postgres;
pub mod pricing;
pub mod repository;
pub mod service;

pub use availability::ranges_overlap;
pub use error::{BookingError, BookingResult};
pub use handlers::ApiDoc;
pub use models::{
    Booking, BookingDetails, CheckAvailability, CreateBooking, DateRange, Hotel, HotelDashboard,
    NewBooking, Room, RoomWithHotel, User,
};
pub use notifier::{BookingNotifier, EmailBookingNotifier, NoopNotifier, NotificationConfig};
pub use postgres::PgBookingRepository;
pub use pricing::{nights, quote};
pub use repository::{BookingRepository, InMemoryBookingRepository, InsertOutcome};
pub use service::BookingService;
