//! Enrollment JSON handlers, scoped under a student.
//!
//! The same missing reference is reported differently per operation: GET and
//! DELETE answer 400, POST answers 404, both with the structured body.

use crate::error::ApiError;
use crate::service::{validation, CourseService, EnrollmentService, StudentService};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

const COURSE_MISSING_CODE: &str = "ENROLLMENT001";
const COURSE_MISSING_MESSAGE: &str = "Course does not exist.";
const STUDENT_MISSING_CODE: &str = "ENROLLMENT002";
const STUDENT_MISSING_MESSAGE: &str = "Student does not exist.";

/// GET /student/:student_id/course
pub async fn list(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    if !StudentService::exists(&state.pool, student_id).await? {
        return Err(ApiError::Validation {
            code: STUDENT_MISSING_CODE,
            message: STUDENT_MISSING_MESSAGE,
        });
    }
    let enrollments = EnrollmentService::list_for_student(&state.pool, student_id).await?;
    if enrollments.is_empty() {
        return Err(ApiError::NotEnrolled);
    }
    Ok((StatusCode::OK, Json(enrollments)))
}

/// POST /student/:student_id/course; answers with the updated enrollment
/// list.
pub async fn create(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
    body: Option<Json<Value>>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let body = body.map(|Json(v)| v).unwrap_or(Value::Null);
    let course_id = validation::enrollment_course_id(&body)?;
    if !StudentService::exists(&state.pool, student_id).await? {
        return Err(ApiError::MissingReference {
            code: STUDENT_MISSING_CODE,
            message: STUDENT_MISSING_MESSAGE,
        });
    }
    if !CourseService::exists(&state.pool, course_id).await? {
        return Err(ApiError::MissingReference {
            code: COURSE_MISSING_CODE,
            message: COURSE_MISSING_MESSAGE,
        });
    }
    EnrollmentService::enroll(&state.pool, student_id, course_id).await?;
    let enrollments = EnrollmentService::list_for_student(&state.pool, student_id).await?;
    Ok((StatusCode::CREATED, Json(enrollments)))
}

/// DELETE /student/:student_id/course/:course_id
pub async fn remove(
    State(state): State<AppState>,
    Path((student_id, course_id)): Path<(i64, i64)>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    if !StudentService::exists(&state.pool, student_id).await? {
        return Err(ApiError::Validation {
            code: STUDENT_MISSING_CODE,
            message: STUDENT_MISSING_MESSAGE,
        });
    }
    if !CourseService::exists(&state.pool, course_id).await? {
        return Err(ApiError::Validation {
            code: COURSE_MISSING_CODE,
            message: COURSE_MISSING_MESSAGE,
        });
    }
    EnrollmentService::withdraw(&state.pool, student_id, course_id).await?;
    Ok((StatusCode::OK, "Successfully deleted"))
}
