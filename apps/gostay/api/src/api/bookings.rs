use axum::Router;
use domain_bookings::{BookingService, PgBookingRepository, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgBookingRepository::new(state.db.clone());
    let service = BookingService::new(repository, state.notifier.clone());
    handlers::router(service, state.jwt_auth.clone())
}
