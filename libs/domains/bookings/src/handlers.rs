use axum::{
    Json, Router,
    extract::State,
    http::HeaderMap,
    middleware,
    routing::{get, post},
};
use axum_helpers::{
    AuditEvent, AuditOutcome, AuthUser, ErrorResponse, FailureBody, JwtAuth, ValidatedJson,
    extract_ip_from_headers, extract_user_agent, jwt_auth_middleware,
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::BookingResult;
use crate::models::{
    AvailabilityResponse, Booking, BookingDetails, CheckAvailability, CreateBooking,
    DashboardResponse, Hotel, HotelDashboard, MessageResponse, Room, User, UserBookingsResponse,
};
use crate::repository::BookingRepository;
use crate::service::BookingService;

/// OpenAPI documentation for Bookings API
#[derive(OpenApi)]
#[openapi(
    paths(check_availability, create_booking, user_bookings, hotel_bookings),
    components(schemas(
        CheckAvailability,
        CreateBooking,
        AvailabilityResponse,
        MessageResponse,
        UserBookingsResponse,
        DashboardResponse,
        HotelDashboard,
        BookingDetails,
        Booking,
        Room,
        Hotel,
        User,
        FailureBody,
        ErrorResponse
    )),
    tags(
        (name = "bookings", description = "Room availability and bookings")
    )
)]
pub struct ApiDoc;

/// Create the bookings router.
///
/// `/check-availability` is public; every other route requires a JWT.
pub fn router<R: BookingRepository + 'static>(service: BookingService<R>, auth: JwtAuth) -> Router {
    let shared_service = Arc::new(service);

    let protected = Router::new()
        .route("/book", post(create_booking::<R>))
        .route("/user", get(user_bookings::<R>))
        .route("/hotel", get(hotel_bookings::<R>))
        .route_layer(middleware::from_fn_with_state(auth, jwt_auth_middleware));

    Router::new()
        .route("/check-availability", post(check_availability::<R>))
        .merge(protected)
        .with_state(shared_service)
}

/// Check whether a room is free for a date range
#[utoipa::path(
    post,
    path = "/check-availability",
    tag = "bookings",
    request_body = CheckAvailability,
    responses(
        (status = 200, description = "Availability result or {success:false, message}", body = AvailabilityResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse)
    )
)]
async fn check_availability<R: BookingRepository>(
    State(service): State<Arc<BookingService<R>>>,
    ValidatedJson(input): ValidatedJson<CheckAvailability>,
) -> BookingResult<Json<AvailabilityResponse>> {
    let is_available = service
        .is_available(input.room, input.check_in_date, input.check_out_date)
        .await?;

    Ok(Json(AvailabilityResponse {
        success: true,
        is_available,
    }))
}

/// Book a room for the authenticated guest
#[utoipa::path(
    post,
    path = "/book",
    tag = "bookings",
    request_body = CreateBooking,
    responses(
        (status = 200, description = "Booking created, or {success:false, message} on rejection", body = MessageResponse),
        (status = 400, description = "Malformed body or invalid guest count", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
async fn create_booking<R: BookingRepository>(
    State(service): State<Arc<BookingService<R>>>,
    user: AuthUser,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateBooking>,
) -> BookingResult<Json<MessageResponse>> {
    let room_id = input.room;

    match service.create_booking(&user, input).await {
        Ok(booking) => {
            AuditEvent::new(
                Some(user.id.to_string()),
                "booking.create",
                Some(format!("booking:{}", booking.id)),
                AuditOutcome::Success,
            )
            .with_ip(extract_ip_from_headers(&headers))
            .with_user_agent(extract_user_agent(&headers))
            .with_details(json!({
                "room_id": booking.room_id,
                "hotel_id": booking.hotel_id,
                "nights_from": booking.check_in_date,
                "nights_to": booking.check_out_date,
                "total_price": booking.total_price,
            }))
            .log();

            Ok(Json(MessageResponse {
                success: true,
                message: "Booking created successfully".to_string(),
            }))
        }
        Err(err) => {
            AuditEvent::new(
                Some(user.id.to_string()),
                "booking.create",
                Some(format!("room:{}", room_id)),
                AuditOutcome::Failure,
            )
            .with_ip(extract_ip_from_headers(&headers))
            .with_details(json!({ "reason": err.public_message() }))
            .log();

            Err(err)
        }
    }
}

/// Bookings of the authenticated guest, newest first
#[utoipa::path(
    get,
    path = "/user",
    tag = "bookings",
    responses(
        (status = 200, description = "Guest bookings or {success:false, message}", body = UserBookingsResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
async fn user_bookings<R: BookingRepository>(
    State(service): State<Arc<BookingService<R>>>,
    user: AuthUser,
) -> BookingResult<Json<UserBookingsResponse>> {
    let bookings = service.list_user_bookings(user.id).await?;
    Ok(Json(UserBookingsResponse {
        success: true,
        bookings,
    }))
}

/// Dashboard for the hotel owned by the authenticated user
#[utoipa::path(
    get,
    path = "/hotel",
    tag = "bookings",
    responses(
        (status = 200, description = "Totals and bookings, or {success:false, message:\"No hotel found\"}", body = DashboardResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
async fn hotel_bookings<R: BookingRepository>(
    State(service): State<Arc<BookingService<R>>>,
    user: AuthUser,
) -> BookingResult<Json<DashboardResponse>> {
    let dashboard_data = service.hotel_dashboard(user.id).await?;
    Ok(Json(DashboardResponse {
        success: true,
        dashboard_data,
    }))
}
