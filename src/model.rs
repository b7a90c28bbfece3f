//! Row types for the three tables. Field names match column names so
//! `sqlx::FromRow` and the JSON wire format both line up with the schema.

use serde::Serialize;
use sqlx::FromRow;

#[derive(Clone, Debug, PartialEq, Serialize, FromRow)]
pub struct Student {
    pub student_id: i64,
    pub roll_number: String,
    pub first_name: String,
    pub last_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, FromRow)]
pub struct Course {
    pub course_id: i64,
    pub course_code: String,
    pub course_name: String,
    pub course_description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, FromRow)]
pub struct Enrollment {
    pub enrollment_id: i64,
    pub student_id: i64,
    pub course_id: i64,
}
