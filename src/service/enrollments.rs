//! Enrollment store operations over the join table between students and
//! courses.

use crate::error::ApiError;
use crate::model::{Course, Enrollment};
use sqlx::SqlitePool;

pub struct EnrollmentService;

impl EnrollmentService {
    /// All enrollment rows for one student, oldest first.
    pub async fn list_for_student(
        pool: &SqlitePool,
        student_id: i64,
    ) -> Result<Vec<Enrollment>, ApiError> {
        let enrollments = sqlx::query_as::<_, Enrollment>(
            "SELECT enrollment_id, student_id, course_id FROM enrollment WHERE student_id = ? ORDER BY enrollment_id",
        )
        .bind(student_id)
        .fetch_all(pool)
        .await?;
        Ok(enrollments)
    }

    /// Course ids the student is enrolled in. Backs the form checkboxes.
    pub async fn course_ids_for_student(
        pool: &SqlitePool,
        student_id: i64,
    ) -> Result<Vec<i64>, ApiError> {
        let ids = sqlx::query_scalar(
            "SELECT course_id FROM enrollment WHERE student_id = ? ORDER BY course_id",
        )
        .bind(student_id)
        .fetch_all(pool)
        .await?;
        Ok(ids)
    }

    /// Courses the student is enrolled in, resolved with an explicit join.
    pub async fn courses_for_student(
        pool: &SqlitePool,
        student_id: i64,
    ) -> Result<Vec<Course>, ApiError> {
        let courses = sqlx::query_as::<_, Course>(
            "SELECT c.course_id, c.course_code, c.course_name, c.course_description \
             FROM course c JOIN enrollment e ON e.course_id = c.course_id \
             WHERE e.student_id = ? ORDER BY c.course_id",
        )
        .bind(student_id)
        .fetch_all(pool)
        .await?;
        Ok(courses)
    }

    /// True when the (student, course) pair already has a row.
    pub async fn pair_exists(
        pool: &SqlitePool,
        student_id: i64,
        course_id: i64,
    ) -> Result<bool, ApiError> {
        let id: Option<i64> = sqlx::query_scalar(
            "SELECT enrollment_id FROM enrollment WHERE student_id = ? AND course_id = ?",
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_optional(pool)
        .await?;
        Ok(id.is_some())
    }

    /// True when any enrollment references the course.
    pub async fn course_has_enrollments(
        pool: &SqlitePool,
        course_id: i64,
    ) -> Result<bool, ApiError> {
        let id: Option<i64> =
            sqlx::query_scalar("SELECT enrollment_id FROM enrollment WHERE course_id = ? LIMIT 1")
                .bind(course_id)
                .fetch_optional(pool)
                .await?;
        Ok(id.is_some())
    }

    /// Insert the (student, course) pair. The pair must not exist yet; the
    /// caller checks that both sides exist.
    pub async fn enroll(pool: &SqlitePool, student_id: i64, course_id: i64) -> Result<(), ApiError> {
        if Self::pair_exists(pool, student_id, course_id).await? {
            return Err(ApiError::AlreadyEnrolled);
        }
        sqlx::query("INSERT INTO enrollment (student_id, course_id) VALUES (?, ?)")
            .bind(student_id)
            .bind(course_id)
            .execute(pool)
            .await?;
        tracing::debug!(student_id, course_id, "enrollment added");
        Ok(())
    }

    /// Remove the (student, course) pair.
    pub async fn withdraw(
        pool: &SqlitePool,
        student_id: i64,
        course_id: i64,
    ) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM enrollment WHERE student_id = ? AND course_id = ?")
            .bind(student_id)
            .bind(course_id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ApiError::EnrollmentNotFound);
        }
        tracing::debug!(student_id, course_id, "enrollment removed");
        Ok(())
    }
}
