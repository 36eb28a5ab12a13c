use axum::response::{IntoResponse, Response};
use axum_helpers::ApiFailure;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Room is not available")]
    RoomUnavailable,

    #[error("Room not found: {0}")]
    RoomNotFound(Uuid),

    #[error("No hotel found")]
    NoHotel,

    #[error("Check-out date must be after check-in date")]
    InvalidDateRange,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Failed to create booking")]
    CreationFailed,

    #[error("Failed to fetch bookings")]
    FetchFailed,

    #[error("Persistence error: {0}")]
    Persistence(String),
}

pub type BookingResult<T> = Result<T, BookingError>;

impl BookingError {
    /// Message safe to show to the caller. Persistence details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            BookingError::RoomNotFound(_) => "Room not found".to_string(),
            BookingError::Persistence(_) => "Failed to check availability".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<sea_orm::DbErr> for BookingError {
    fn from(err: sea_orm::DbErr) -> Self {
        BookingError::Persistence(format!("Database error: {}", err))
    }
}

/// Business failures answer `200 {success:false, message}`.
impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        ApiFailure::ok(self.public_message()).into_response()
    }
}
