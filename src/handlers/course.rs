//! Course JSON handlers: fetch, create, update, delete.

use crate::error::ApiError;
use crate::service::{validation, CourseService};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

pub async fn fetch(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let course = CourseService::fetch(&state.pool, course_id)
        .await?
        .ok_or(ApiError::NotFound("Course"))?;
    Ok((StatusCode::OK, Json(course)))
}

pub async fn create(
    State(state): State<AppState>,
    body: Option<Json<Value>>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    // A missing or malformed body degrades to Null and fails field checks.
    let body = body.map(|Json(v)| v).unwrap_or(Value::Null);
    let fields = validation::course_fields(&body)?;
    let course = CourseService::create(&state.pool, fields).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
    body: Option<Json<Value>>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let body = body.map(|Json(v)| v).unwrap_or(Value::Null);
    let fields = validation::course_fields(&body)?;
    let course = CourseService::update(&state.pool, course_id, fields).await?;
    Ok((StatusCode::OK, Json(course)))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    CourseService::delete(&state.pool, course_id).await?;
    Ok((StatusCode::OK, "Successfully deleted"))
}
