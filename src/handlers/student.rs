//! Student JSON handlers: fetch, create, update, delete.

use crate::error::ApiError;
use crate::service::{validation, StudentService};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

pub async fn fetch(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let student = StudentService::fetch(&state.pool, student_id)
        .await?
        .ok_or(ApiError::NotFound("Student"))?;
    Ok((StatusCode::OK, Json(student)))
}

pub async fn create(
    State(state): State<AppState>,
    body: Option<Json<Value>>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let body = body.map(|Json(v)| v).unwrap_or(Value::Null);
    let fields = validation::student_fields(&body)?;
    let student = StudentService::create(&state.pool, fields).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
    body: Option<Json<Value>>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let body = body.map(|Json(v)| v).unwrap_or(Value::Null);
    let fields = validation::student_fields(&body)?;
    let student = StudentService::update(&state.pool, student_id, fields).await?;
    Ok((StatusCode::OK, Json(student)))
}

/// Deleting a student also removes its enrollments; see
/// [`StudentService::delete`].
pub async fn remove(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    StudentService::delete(&state.pool, student_id).await?;
    Ok((StatusCode::OK, "Successfully deleted"))
}
