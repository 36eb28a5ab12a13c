use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::ApiFailure;
use domain_bookings::BookingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaymentError {
    /// Names the missing record, e.g. "Booking not found"
    #[error("{0}")]
    NotFound(&'static str),

    #[error("Origin header is required")]
    MissingOrigin,

    #[error("Payment provider error: {0}")]
    PaymentFailed(String),

    #[error("Persistence error: {0}")]
    Persistence(String),
}

pub type PaymentResult<T> = Result<T, PaymentError>;

impl PaymentError {
    pub fn status(&self) -> StatusCode {
        match self {
            PaymentError::NotFound(_) => StatusCode::NOT_FOUND,
            PaymentError::MissingOrigin => StatusCode::BAD_REQUEST,
            PaymentError::PaymentFailed(_) | PaymentError::Persistence(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn public_message(&self) -> String {
        match self {
            PaymentError::PaymentFailed(_) | PaymentError::Persistence(_) => {
                "Payment Failed".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<BookingError> for PaymentError {
    fn from(err: BookingError) -> Self {
        PaymentError::Persistence(err.to_string())
    }
}

impl From<reqwest::Error> for PaymentError {
    fn from(err: reqwest::Error) -> Self {
        PaymentError::PaymentFailed(err.to_string())
    }
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        ApiFailure::new(self.status(), self.public_message()).into_response()
    }
}
