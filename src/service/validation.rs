//! Request-field validation. Each rule carries the business error code the
//! API reports when the rule fails.

use crate::error::ApiError;
use serde_json::Value;

/// Validated course payload. All three fields must be present as strings;
/// name and code must be non-empty, the description may be empty.
#[derive(Debug)]
pub struct CourseFields {
    pub course_name: String,
    pub course_code: String,
    pub course_description: String,
}

/// Validated student payload. Roll number and first name are required and
/// non-empty, last name is optional.
#[derive(Debug)]
pub struct StudentFields {
    pub roll_number: String,
    pub first_name: String,
    pub last_name: Option<String>,
}

/// Validate a course body, checking fields in their reporting order.
pub fn course_fields(body: &Value) -> Result<CourseFields, ApiError> {
    let course_name = required_string(
        body,
        "course_name",
        "COURSE001",
        "Course Name is required and should be string.",
    )?;
    let course_code = required_string(
        body,
        "course_code",
        "COURSE002",
        "Course Code is required and should be string.",
    )?;
    let course_description = present_string(
        body,
        "course_description",
        "COURSE003",
        "Course Description should be string.",
    )?;
    Ok(CourseFields {
        course_name,
        course_code,
        course_description,
    })
}

/// Validate a student body, checking fields in their reporting order.
pub fn student_fields(body: &Value) -> Result<StudentFields, ApiError> {
    let roll_number = required_string(
        body,
        "roll_number",
        "STUDENT001",
        "Roll Number required and should be String.",
    )?;
    let first_name = required_string(
        body,
        "first_name",
        "STUDENT002",
        "First Name is required and should be string.",
    )?;
    let last_name = body
        .get("last_name")
        .and_then(Value::as_str)
        .map(str::to_owned);
    Ok(StudentFields {
        roll_number,
        first_name,
        last_name,
    })
}

/// Extract the course reference from an enrollment body.
pub fn enrollment_course_id(body: &Value) -> Result<i64, ApiError> {
    // The empty error code is part of the wire contract for this rule.
    body.get("course_id")
        .and_then(Value::as_i64)
        .ok_or(ApiError::Validation {
            code: "",
            message: "course_id is required and must be an integer.",
        })
}

/// A field that must be present, a string, and non-empty.
fn required_string(
    body: &Value,
    key: &str,
    code: &'static str,
    message: &'static str,
) -> Result<String, ApiError> {
    body.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .ok_or(ApiError::Validation { code, message })
}

/// A field that must be present as a string but may be empty.
fn present_string(
    body: &Value,
    key: &str,
    code: &'static str,
    message: &'static str,
) -> Result<String, ApiError> {
    body.get(key)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or(ApiError::Validation { code, message })
}
