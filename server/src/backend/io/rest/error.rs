//! Translation of domain failures into HTTP responses.
//!
//! Every non-2xx body has the shape `{ "error": <message>, "code": <CODE> }`.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::warn;

use crate::backend::domain::BillServiceError;
use shared::ErrorResponse;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub code: &'static str,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>, code: &'static str) -> Self {
        Self {
            status,
            error: error.into(),
            code,
        }
    }

    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error, "INVALID_INPUT")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.error,
            code: self.code.to_string(),
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<BillServiceError> for ApiError {
    fn from(err: BillServiceError) -> Self {
        match &err {
            BillServiceError::NotFound(_) | BillServiceError::NoRecords => {
                Self::new(StatusCode::NOT_FOUND, err.to_string(), "NOT_FOUND")
            }
            BillServiceError::Validation(_) => Self::bad_request(err.to_string()),
            // The underlying cause was logged where it happened
            BillServiceError::Storage(_) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Could not access the bill store",
                "STORAGE_ERROR",
            ),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!("Rejected request body: {}", rejection.body_text());
        Self::new(rejection.status(), rejection.body_text(), "INVALID_JSON")
    }
}

pub type ApiResult<T> = Result<Json<T>, ApiError>;
