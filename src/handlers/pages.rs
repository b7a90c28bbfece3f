//! HTML workflow handlers. Guarded actions render an error page instead of
//! an error status; successful mutations redirect back to the listing.

use crate::error::ApiError;
use crate::service::validation::StudentFields;
use crate::service::{CourseService, EnrollmentService, StudentService};
use crate::state::AppState;
use crate::views;
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use serde::Deserialize;
use sqlx::SqlitePool;

const ADD_ERROR: &str = "There was an error adding the student record.";
const UPDATE_ERROR: &str = "There was an error updating the student record.";
const DELETE_ERROR: &str = "There was an error deleting the student record.";
const FIND_ERROR: &str = "There was an error finding the student.";
const FIND_RECORD_ERROR: &str = "There was an error finding the student record.";

/// Browser form for creating a student. `courses` carries the checkbox
/// selections, one `course_{id}` value per checked box.
#[derive(Debug, Deserialize)]
pub struct CreateStudentForm {
    pub roll: String,
    #[serde(default)]
    pub f_name: String,
    #[serde(default)]
    pub l_name: String,
    #[serde(default)]
    pub courses: Vec<String>,
}

/// Browser form for updating a student's names and full course set. The
/// roll number is not editable.
#[derive(Debug, Deserialize)]
pub struct UpdateStudentForm {
    #[serde(default)]
    pub f_name: String,
    #[serde(default)]
    pub l_name: String,
    #[serde(default)]
    pub courses: Vec<String>,
}

/// GET /
pub async fn home(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let students = StudentService::list(&state.pool).await?;
    Ok(views::index_page(&students))
}

/// GET /student/create
pub async fn add_student_form(
    State(state): State<AppState>,
) -> Result<Html<String>, ApiError> {
    let courses = CourseService::list(&state.pool).await?;
    Ok(views::add_student_page(&courses))
}

/// POST /student/create
pub async fn add_student(
    State(state): State<AppState>,
    Form(form): Form<CreateStudentForm>,
) -> Response {
    match StudentService::roll_number_holder(&state.pool, &form.roll).await {
        Ok(Some(_)) => return views::exists_page().into_response(),
        Ok(None) => {}
        Err(e) => return page_error(e, ADD_ERROR),
    }
    let Some(course_ids) = parse_course_refs(&form.courses) else {
        tracing::warn!("unparseable course reference in create form");
        return render_error(ADD_ERROR);
    };
    let fields = StudentFields {
        roll_number: form.roll,
        first_name: form.f_name,
        last_name: Some(form.l_name),
    };
    match StudentService::create_with_courses(&state.pool, fields, &course_ids).await {
        Ok(_) => Redirect::to("/").into_response(),
        Err(e) => page_error(e, ADD_ERROR),
    }
}

/// GET /student/:student_id
pub async fn student_detail(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
) -> Response {
    match render_student_detail(&state.pool, student_id).await {
        Ok(page) => page.into_response(),
        Err(e) => page_error(e, FIND_ERROR),
    }
}

/// GET /student/:student_id/update
pub async fn update_student_form(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
) -> Response {
    match render_update_form(&state.pool, student_id).await {
        Ok(page) => page.into_response(),
        Err(e) => page_error(e, FIND_RECORD_ERROR),
    }
}

/// POST /student/:student_id/update
pub async fn update_student(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
    Form(form): Form<UpdateStudentForm>,
) -> Response {
    let Some(course_ids) = parse_course_refs(&form.courses) else {
        tracing::warn!("unparseable course reference in update form");
        return render_error(UPDATE_ERROR);
    };
    match StudentService::update_with_courses(
        &state.pool,
        student_id,
        &form.f_name,
        &form.l_name,
        &course_ids,
    )
    .await
    {
        Ok(()) => Redirect::to("/").into_response(),
        Err(e) => page_error(e, UPDATE_ERROR),
    }
}

/// GET /student/:student_id/delete
pub async fn delete_student(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
) -> Response {
    match StudentService::delete(&state.pool, student_id).await {
        Ok(()) => Redirect::to("/").into_response(),
        Err(e) => page_error(e, DELETE_ERROR),
    }
}

async fn render_student_detail(
    pool: &SqlitePool,
    student_id: i64,
) -> Result<Html<String>, ApiError> {
    let student = StudentService::fetch(pool, student_id)
        .await?
        .ok_or(ApiError::NotFound("Student"))?;
    let courses = EnrollmentService::courses_for_student(pool, student_id).await?;
    Ok(views::student_page(&student, &courses))
}

async fn render_update_form(
    pool: &SqlitePool,
    student_id: i64,
) -> Result<Html<String>, ApiError> {
    let student = StudentService::fetch(pool, student_id)
        .await?
        .ok_or(ApiError::NotFound("Student"))?;
    let courses = CourseService::list(pool).await?;
    let enrolled = EnrollmentService::course_ids_for_student(pool, student_id).await?;
    Ok(views::update_student_page(&student, &courses, &enrolled))
}

/// Parse checkbox values of the form `course_{id}`. Any unparseable value
/// fails the whole submission.
fn parse_course_refs(values: &[String]) -> Option<Vec<i64>> {
    values.iter().map(|v| course_ref_id(v)).collect()
}

fn course_ref_id(value: &str) -> Option<i64> {
    value.split('_').nth(1)?.parse().ok()
}

fn page_error(error: ApiError, message: &str) -> Response {
    tracing::warn!(error = %error, "page request failed");
    render_error(message)
}

fn render_error(message: &str) -> Response {
    views::error_page(message).into_response()
}
