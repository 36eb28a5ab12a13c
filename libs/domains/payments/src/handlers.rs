use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, header},
    middleware,
    routing::post,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, AuthUser, ErrorResponse, FailureBody, JwtAuth, ValidatedJson,
    extract_ip_from_headers, jwt_auth_middleware,
};
use domain_bookings::BookingRepository;
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{PaymentError, PaymentResult};
use crate::models::{CreatePayment, PaymentResponse};
use crate::service::PaymentService;

/// OpenAPI documentation for Payments API
#[derive(OpenApi)]
#[openapi(
    paths(create_payment),
    components(schemas(CreatePayment, PaymentResponse, FailureBody, ErrorResponse)),
    tags(
        (name = "payments", description = "Hosted checkout for existing bookings")
    )
)]
pub struct ApiDoc;

/// Create the payments router. Every route requires a JWT.
pub fn router<R: BookingRepository + 'static>(service: PaymentService<R>, auth: JwtAuth) -> Router {
    Router::new()
        .route("/payment", post(create_payment::<R>))
        .route_layer(middleware::from_fn_with_state(auth, jwt_auth_middleware))
        .with_state(Arc::new(service))
}

/// Open a checkout session for a booking
#[utoipa::path(
    post,
    path = "/payment",
    tag = "payments",
    request_body = CreatePayment,
    params(
        ("Origin" = String, Header, description = "Base URL the guest is redirected back to")
    ),
    responses(
        (status = 200, description = "Checkout session created", body = PaymentResponse),
        (status = 400, description = "Missing Origin header", body = FailureBody),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Booking, room or hotel not found", body = FailureBody),
        (status = 500, description = "Payment Failed", body = FailureBody)
    )
)]
async fn create_payment<R: BookingRepository>(
    State(service): State<Arc<PaymentService<R>>>,
    user: AuthUser,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreatePayment>,
) -> PaymentResult<Json<PaymentResponse>> {
    let origin = headers
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .ok_or(PaymentError::MissingOrigin)?;

    let outcome = service
        .create_checkout_session(input.booking_id, origin)
        .await;

    let audit_outcome = if outcome.is_ok() {
        AuditOutcome::Success
    } else {
        AuditOutcome::Failure
    };
    AuditEvent::new(
        Some(user.id.to_string()),
        "payment.checkout",
        Some(format!("booking:{}", input.booking_id)),
        audit_outcome,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_details(json!({
        "session_id": outcome.as_ref().ok().map(|s| s.session_id.clone()),
    }))
    .log();

    let session = outcome?;
    Ok(Json(PaymentResponse {
        success: true,
        url: session.url,
    }))
}
