//! rollcall: student and course enrollment records behind a JSON REST API
//! and a set of server-rendered pages, stored in SQLite.

pub mod db;
pub mod error;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod service;
pub mod state;
pub mod views;

pub use db::{connect, ensure_schema};
pub use error::ApiError;
pub use model::{Course, Enrollment, Student};
pub use routes::{api_routes, common_routes, page_routes, router};
pub use service::{CourseService, EnrollmentService, StudentService};
pub use state::AppState;
