//! Course store operations.

use crate::error::ApiError;
use crate::model::Course;
use crate::service::validation::CourseFields;
use crate::service::EnrollmentService;
use sqlx::SqlitePool;

pub struct CourseService;

impl CourseService {
    /// Fetch one course by surrogate id.
    pub async fn fetch(pool: &SqlitePool, course_id: i64) -> Result<Option<Course>, ApiError> {
        let course = sqlx::query_as::<_, Course>(
            "SELECT course_id, course_code, course_name, course_description FROM course WHERE course_id = ?",
        )
        .bind(course_id)
        .fetch_optional(pool)
        .await?;
        Ok(course)
    }

    /// All courses, oldest first. Backs the enrollment checkboxes.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Course>, ApiError> {
        let courses = sqlx::query_as::<_, Course>(
            "SELECT course_id, course_code, course_name, course_description FROM course ORDER BY course_id",
        )
        .fetch_all(pool)
        .await?;
        Ok(courses)
    }

    /// True when the course row exists.
    pub async fn exists(pool: &SqlitePool, course_id: i64) -> Result<bool, ApiError> {
        let id: Option<i64> = sqlx::query_scalar("SELECT course_id FROM course WHERE course_id = ?")
            .bind(course_id)
            .fetch_optional(pool)
            .await?;
        Ok(id.is_some())
    }

    /// Id of the course currently holding `course_code`, if any.
    pub async fn code_holder(pool: &SqlitePool, course_code: &str) -> Result<Option<i64>, ApiError> {
        let id = sqlx::query_scalar("SELECT course_id FROM course WHERE course_code = ?")
            .bind(course_code)
            .fetch_optional(pool)
            .await?;
        Ok(id)
    }

    /// Insert a new course. The course code must be free.
    pub async fn create(pool: &SqlitePool, fields: CourseFields) -> Result<Course, ApiError> {
        if Self::code_holder(pool, &fields.course_code).await?.is_some() {
            return Err(ApiError::AlreadyExists("course_code"));
        }
        let result = sqlx::query(
            "INSERT INTO course (course_code, course_name, course_description) VALUES (?, ?, ?)",
        )
        .bind(&fields.course_code)
        .bind(&fields.course_name)
        .bind(&fields.course_description)
        .execute(pool)
        .await?;
        Ok(Course {
            course_id: result.last_insert_rowid(),
            course_code: fields.course_code,
            course_name: fields.course_name,
            course_description: Some(fields.course_description),
        })
    }

    /// Overwrite all fields of an existing course. The code may stay the
    /// same but must not collide with another course's.
    pub async fn update(
        pool: &SqlitePool,
        course_id: i64,
        fields: CourseFields,
    ) -> Result<Course, ApiError> {
        if !Self::exists(pool, course_id).await? {
            return Err(ApiError::NotFound("Course"));
        }
        if let Some(holder) = Self::code_holder(pool, &fields.course_code).await? {
            if holder != course_id {
                return Err(ApiError::AlreadyExists("course_code"));
            }
        }
        sqlx::query(
            "UPDATE course SET course_code = ?, course_name = ?, course_description = ? WHERE course_id = ?",
        )
        .bind(&fields.course_code)
        .bind(&fields.course_name)
        .bind(&fields.course_description)
        .bind(course_id)
        .execute(pool)
        .await?;
        Ok(Course {
            course_id,
            course_code: fields.course_code,
            course_name: fields.course_name,
            course_description: Some(fields.course_description),
        })
    }

    /// Delete a course. Refused while any enrollment still references it;
    /// enrollments must be removed first.
    pub async fn delete(pool: &SqlitePool, course_id: i64) -> Result<(), ApiError> {
        if EnrollmentService::course_has_enrollments(pool, course_id).await? {
            return Err(ApiError::CourseInUse);
        }
        let result = sqlx::query("DELETE FROM course WHERE course_id = ?")
            .bind(course_id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("Course"));
        }
        tracing::debug!(course_id, "course deleted");
        Ok(())
    }
}
