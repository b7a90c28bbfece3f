//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failure taxonomy for the record-keeping API. Every variant carries a fixed
/// status code and body shape so handlers return errors and the mapping lives
/// in one place.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0} already exists")]
    AlreadyExists(&'static str),
    #[error("Student is not enrolled in any course")]
    NotEnrolled,
    #[error("Enrollment for the student not found")]
    EnrollmentNotFound,
    #[error("Student is already enrolled to given course")]
    AlreadyEnrolled,
    #[error("Cannot delete. Students are already enrolled for this course. Please delete enrollments first.")]
    CourseInUse,
    /// Field rule failure: 400 with an `{error_code, error_message}` body.
    #[error("{message}")]
    Validation {
        code: &'static str,
        message: &'static str,
    },
    /// Referenced entity absent where the operation requires it: 404 with
    /// the same structured body as `Validation`.
    #[error("{message}")]
    MissingReference {
        code: &'static str,
        message: &'static str,
    },
    /// Unexpected store failure: 500. The body never echoes the cause.
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(_) | ApiError::NotEnrolled | ApiError::EnrollmentNotFound => {
                (StatusCode::NOT_FOUND, self.to_string()).into_response()
            }
            ApiError::AlreadyExists(_) | ApiError::AlreadyEnrolled | ApiError::CourseInUse => {
                (StatusCode::CONFLICT, self.to_string()).into_response()
            }
            ApiError::Validation { code, message } => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error_code": code, "error_message": message })),
            )
                .into_response(),
            ApiError::MissingReference { code, message } => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error_code": code, "error_message": message })),
            )
                .into_response(),
            ApiError::Db(e) => {
                tracing::error!(error = %e, "store failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}
