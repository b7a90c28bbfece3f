//! Route tables: JSON resources under /api, pages at the root, probes.

pub mod common;

use crate::handlers::{course, enrollment, pages, student};
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};

pub use common::common_routes;

/// JSON resource routes; the caller nests these under /api.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/course", post(course::create))
        .route(
            "/course/:course_id",
            get(course::fetch).put(course::update).delete(course::remove),
        )
        .route("/student", post(student::create))
        .route(
            "/student/:student_id",
            get(student::fetch)
                .put(student::update)
                .delete(student::remove),
        )
        .route(
            "/student/:student_id/course",
            get(enrollment::list).post(enrollment::create),
        )
        .route(
            "/student/:student_id/course/:course_id",
            delete(enrollment::remove),
        )
        .with_state(state)
}

/// Server-rendered pages at the root. The static `create` segment takes
/// precedence over the `:student_id` capture.
pub fn page_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route(
            "/student/create",
            get(pages::add_student_form).post(pages::add_student),
        )
        .route("/student/:student_id", get(pages::student_detail))
        .route(
            "/student/:student_id/update",
            get(pages::update_student_form).post(pages::update_student),
        )
        .route("/student/:student_id/delete", get(pages::delete_student))
        .with_state(state)
}

/// The full application: pages, probes, and the JSON API under /api.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(page_routes(state.clone()))
        .merge(common_routes(state.clone()))
        .nest("/api", api_routes(state))
}
