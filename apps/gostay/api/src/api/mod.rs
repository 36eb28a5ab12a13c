use axum::Router;

pub mod bookings;
pub mod health;
pub mod payments;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
///
/// Bookings and payments share the `/bookings` prefix.
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new().nest(
        "/bookings",
        bookings::router(state).merge(payments::router(state)),
    )
}

/// Creates a router with the /ready endpoint that performs actual health checks.
///
/// This router has state applied and can be merged with the stateless app router
/// from `create_router`.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
