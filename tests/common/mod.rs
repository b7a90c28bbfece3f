//! Shared helpers for router-level tests.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use rollcall::{ensure_schema, AppState};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tower::ServiceExt;

/// Fresh in-memory database with the schema applied. A single pinned
/// connection keeps the database alive across requests.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("memory database url")
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .connect_with(options)
        .await
        .expect("connect to memory database");
    ensure_schema(&pool).await.expect("apply schema");
    pool
}

/// Application router over the given pool. Clone one per request; `oneshot`
/// consumes it.
pub fn test_app(pool: &SqlitePool) -> Router {
    rollcall::router(AppState { pool: pool.clone() })
}

pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

/// Send a JSON request; returns status and body text.
pub async fn send_json(
    app: Router,
    method: &str,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, String) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("build request"),
        )
        .await
        .expect("send request");
    let status = response.status();
    (status, body_string(response).await)
}

/// Send a bodyless request; returns status and body text.
pub async fn send(app: Router, method: &str, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("send request");
    let status = response.status();
    (status, body_string(response).await)
}

/// Send a browser-style form POST; returns the raw response so callers can
/// assert on redirects.
pub async fn send_form(app: Router, uri: &str, form: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .expect("build request"),
    )
    .await
    .expect("send request")
}

pub fn json_body(body: &str) -> serde_json::Value {
    serde_json::from_str(body).expect("JSON body")
}

pub async fn count(pool: &SqlitePool, table: &str) -> i64 {
    let n: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .expect("count rows");
    n
}

/// Create a course through the API and return its id.
pub async fn create_course(app: &Router, code: &str, name: &str) -> i64 {
    let (status, body) = send_json(
        app.clone(),
        "POST",
        "/api/course",
        serde_json::json!({
            "course_name": name,
            "course_code": code,
            "course_description": format!("{name} course"),
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "seed course: {body}");
    json_body(&body)["course_id"].as_i64().expect("course_id")
}

/// Create a student through the API and return its id.
pub async fn create_student(app: &Router, roll: &str, first: &str) -> i64 {
    let (status, body) = send_json(
        app.clone(),
        "POST",
        "/api/student",
        serde_json::json!({ "roll_number": roll, "first_name": first }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "seed student: {body}");
    json_body(&body)["student_id"].as_i64().expect("student_id")
}

/// Enroll a student in a course through the API.
pub async fn enroll(app: &Router, student_id: i64, course_id: i64) {
    let (status, body) = send_json(
        app.clone(),
        "POST",
        &format!("/api/student/{student_id}/course"),
        serde_json::json!({ "course_id": course_id }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "seed enrollment: {body}");
}
