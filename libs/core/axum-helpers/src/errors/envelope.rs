//! The `{ "success": false, "message": "..." }` body used for business failures.
//!
//! Client-facing endpoints report expected rejections (room taken, no hotel
//! owned, ...) inside this envelope instead of through [`super::AppError`].
//! The status is chosen by the caller: most booking routes answer 200, the
//! payment route uses 404/500.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FailureBody {
    /// Always `false`
    pub success: bool,
    pub message: String,
}

/// A failure envelope paired with the status it is sent with.
#[derive(Debug, Clone)]
pub struct ApiFailure {
    pub status: StatusCode,
    pub message: String,
}

impl ApiFailure {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// `200 {success:false}`
    pub fn ok(message: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, message)
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let body = FailureBody {
            success: false,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}
