use axum::Router;
use domain_bookings::PgBookingRepository;
use domain_payments::{PaymentService, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgBookingRepository::new(state.db.clone());
    let service = PaymentService::new(
        repository,
        state.checkout.clone(),
        state.config.stripe.currency.clone(),
    );
    handlers::router(service, state.jwt_auth.clone())
}
