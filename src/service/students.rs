//! Student store operations.

use crate::error::ApiError;
use crate::model::Student;
use crate::service::validation::StudentFields;
use sqlx::SqlitePool;

pub struct StudentService;

impl StudentService {
    /// Fetch one student by surrogate id.
    pub async fn fetch(pool: &SqlitePool, student_id: i64) -> Result<Option<Student>, ApiError> {
        let student = sqlx::query_as::<_, Student>(
            "SELECT student_id, roll_number, first_name, last_name FROM student WHERE student_id = ?",
        )
        .bind(student_id)
        .fetch_optional(pool)
        .await?;
        Ok(student)
    }

    /// All students, oldest first. Backs the listing page.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Student>, ApiError> {
        let students = sqlx::query_as::<_, Student>(
            "SELECT student_id, roll_number, first_name, last_name FROM student ORDER BY student_id",
        )
        .fetch_all(pool)
        .await?;
        Ok(students)
    }

    /// True when the student row exists.
    pub async fn exists(pool: &SqlitePool, student_id: i64) -> Result<bool, ApiError> {
        let id: Option<i64> =
            sqlx::query_scalar("SELECT student_id FROM student WHERE student_id = ?")
                .bind(student_id)
                .fetch_optional(pool)
                .await?;
        Ok(id.is_some())
    }

    /// Id of the student currently holding `roll_number`, if any.
    pub async fn roll_number_holder(
        pool: &SqlitePool,
        roll_number: &str,
    ) -> Result<Option<i64>, ApiError> {
        let id = sqlx::query_scalar("SELECT student_id FROM student WHERE roll_number = ?")
            .bind(roll_number)
            .fetch_optional(pool)
            .await?;
        Ok(id)
    }

    /// Insert a new student. The roll number must be free.
    pub async fn create(pool: &SqlitePool, fields: StudentFields) -> Result<Student, ApiError> {
        if Self::roll_number_holder(pool, &fields.roll_number)
            .await?
            .is_some()
        {
            return Err(ApiError::AlreadyExists("roll_number"));
        }
        let result =
            sqlx::query("INSERT INTO student (roll_number, first_name, last_name) VALUES (?, ?, ?)")
                .bind(&fields.roll_number)
                .bind(&fields.first_name)
                .bind(&fields.last_name)
                .execute(pool)
                .await?;
        Ok(Student {
            student_id: result.last_insert_rowid(),
            roll_number: fields.roll_number,
            first_name: fields.first_name,
            last_name: fields.last_name,
        })
    }

    /// Overwrite all mutable fields of an existing student. The roll number
    /// may stay the same but must not collide with another student's.
    pub async fn update(
        pool: &SqlitePool,
        student_id: i64,
        fields: StudentFields,
    ) -> Result<Student, ApiError> {
        if !Self::exists(pool, student_id).await? {
            return Err(ApiError::NotFound("Student"));
        }
        if let Some(holder) = Self::roll_number_holder(pool, &fields.roll_number).await? {
            if holder != student_id {
                return Err(ApiError::AlreadyExists("roll_number"));
            }
        }
        sqlx::query(
            "UPDATE student SET roll_number = ?, first_name = ?, last_name = ? WHERE student_id = ?",
        )
        .bind(&fields.roll_number)
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(student_id)
        .execute(pool)
        .await?;
        Ok(Student {
            student_id,
            roll_number: fields.roll_number,
            first_name: fields.first_name,
            last_name: fields.last_name,
        })
    }

    /// Delete a student and every enrollment referencing it, atomically.
    pub async fn delete(pool: &SqlitePool, student_id: i64) -> Result<(), ApiError> {
        let mut tx = pool.begin().await?;
        let exists: Option<i64> =
            sqlx::query_scalar("SELECT student_id FROM student WHERE student_id = ?")
                .bind(student_id)
                .fetch_optional(&mut *tx)
                .await?;
        if exists.is_none() {
            return Err(ApiError::NotFound("Student"));
        }
        sqlx::query("DELETE FROM enrollment WHERE student_id = ?")
            .bind(student_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM student WHERE student_id = ?")
            .bind(student_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        tracing::debug!(student_id, "student deleted");
        Ok(())
    }

    /// Insert a student plus one enrollment per course id in one transaction.
    /// Any bad course reference fails the whole batch.
    pub async fn create_with_courses(
        pool: &SqlitePool,
        fields: StudentFields,
        course_ids: &[i64],
    ) -> Result<Student, ApiError> {
        let mut tx = pool.begin().await?;
        let result =
            sqlx::query("INSERT INTO student (roll_number, first_name, last_name) VALUES (?, ?, ?)")
                .bind(&fields.roll_number)
                .bind(&fields.first_name)
                .bind(&fields.last_name)
                .execute(&mut *tx)
                .await?;
        let student_id = result.last_insert_rowid();
        for &course_id in course_ids {
            sqlx::query("INSERT INTO enrollment (student_id, course_id) VALUES (?, ?)")
                .bind(student_id)
                .bind(course_id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(Student {
            student_id,
            roll_number: fields.roll_number,
            first_name: fields.first_name,
            last_name: fields.last_name,
        })
    }

    /// Overwrite the names and replace the whole course set in one
    /// transaction. The roll number is not editable here.
    pub async fn update_with_courses(
        pool: &SqlitePool,
        student_id: i64,
        first_name: &str,
        last_name: &str,
        course_ids: &[i64],
    ) -> Result<(), ApiError> {
        let mut tx = pool.begin().await?;
        let updated = sqlx::query(
            "UPDATE student SET first_name = ?, last_name = ? WHERE student_id = ?",
        )
        .bind(first_name)
        .bind(last_name)
        .bind(student_id)
        .execute(&mut *tx)
        .await?;
        if updated.rows_affected() == 0 {
            return Err(ApiError::NotFound("Student"));
        }
        sqlx::query("DELETE FROM enrollment WHERE student_id = ?")
            .bind(student_id)
            .execute(&mut *tx)
            .await?;
        for &course_id in course_ids {
            sqlx::query("INSERT INTO enrollment (student_id, course_id) VALUES (?, ?)")
                .bind(student_id)
                .bind(course_id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_pool;
    use crate::service::CourseService;
    use crate::service::validation::CourseFields;

    fn student(roll: &str, first: &str) -> StudentFields {
        StudentFields {
            roll_number: roll.into(),
            first_name: first.into(),
            last_name: None,
        }
    }

    #[tokio::test]
    async fn create_rejects_taken_roll_number() {
        let pool = memory_pool().await;
        StudentService::create(&pool, student("R1", "Ada")).await.unwrap();

        let err = StudentService::create(&pool, student("R1", "Grace"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::AlreadyExists("roll_number")));
    }

    #[tokio::test]
    async fn update_allows_keeping_own_roll_number() {
        let pool = memory_pool().await;
        let created = StudentService::create(&pool, student("R1", "Ada")).await.unwrap();

        let updated = StudentService::update(
            &pool,
            created.student_id,
            StudentFields {
                roll_number: "R1".into(),
                first_name: "Ada".into(),
                last_name: Some("Lovelace".into()),
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.last_name.as_deref(), Some("Lovelace"));
    }

    #[tokio::test]
    async fn update_rejects_another_students_roll_number() {
        let pool = memory_pool().await;
        StudentService::create(&pool, student("R1", "Ada")).await.unwrap();
        let second = StudentService::create(&pool, student("R2", "Grace")).await.unwrap();

        let err = StudentService::update(&pool, second.student_id, student("R1", "Grace"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::AlreadyExists("roll_number")));
    }

    #[tokio::test]
    async fn delete_removes_enrollments_with_the_student() {
        let pool = memory_pool().await;
        let course = CourseService::create(
            &pool,
            CourseFields {
                course_name: "Intro".into(),
                course_code: "CS101".into(),
                course_description: "".into(),
            },
        )
        .await
        .unwrap();
        let created = StudentService::create_with_courses(
            &pool,
            student("R1", "Ada"),
            &[course.course_id],
        )
        .await
        .unwrap();

        StudentService::delete(&pool, created.student_id).await.unwrap();

        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM enrollment")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(remaining, 0);
        assert!(CourseService::exists(&pool, course.course_id).await.unwrap());
    }

    #[tokio::test]
    async fn update_with_courses_replaces_the_whole_set() {
        let pool = memory_pool().await;
        let first = CourseService::create(
            &pool,
            CourseFields {
                course_name: "Intro".into(),
                course_code: "CS101".into(),
                course_description: "".into(),
            },
        )
        .await
        .unwrap();
        let second = CourseService::create(
            &pool,
            CourseFields {
                course_name: "Data Structures".into(),
                course_code: "CS201".into(),
                course_description: "".into(),
            },
        )
        .await
        .unwrap();
        let created = StudentService::create_with_courses(
            &pool,
            student("R1", "Ada"),
            &[first.course_id],
        )
        .await
        .unwrap();

        StudentService::update_with_courses(
            &pool,
            created.student_id,
            "Ada",
            "Lovelace",
            &[second.course_id],
        )
        .await
        .unwrap();

        let course_ids: Vec<i64> =
            sqlx::query_scalar("SELECT course_id FROM enrollment WHERE student_id = ?")
                .bind(created.student_id)
                .fetch_all(&pool)
                .await
                .unwrap();
        assert_eq!(course_ids, [second.course_id]);
    }
}
