//! Pool construction and schema bootstrap for the SQLite store.

use crate::error::ApiError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Table DDL in dependency order. `enrollment` carries both foreign keys and
/// the pair-uniqueness constraint.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS student (
        student_id   INTEGER PRIMARY KEY AUTOINCREMENT,
        roll_number  TEXT NOT NULL UNIQUE,
        first_name   TEXT NOT NULL,
        last_name    TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS course (
        course_id          INTEGER PRIMARY KEY AUTOINCREMENT,
        course_code        TEXT NOT NULL UNIQUE,
        course_name        TEXT NOT NULL,
        course_description TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS enrollment (
        enrollment_id INTEGER PRIMARY KEY AUTOINCREMENT,
        student_id    INTEGER NOT NULL REFERENCES student (student_id),
        course_id     INTEGER NOT NULL REFERENCES course (course_id),
        UNIQUE (student_id, course_id)
    )
    "#,
];

/// Open the database at `database_url`, creating the file if missing.
/// Foreign keys are enforced on every connection.
pub async fn connect(database_url: &str) -> Result<SqlitePool, ApiError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Create the three tables if they do not exist. Idempotent; run at startup.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), ApiError> {
    for ddl in SCHEMA {
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}

/// In-memory pool for unit tests. A single connection pinned open keeps the
/// database alive across queries.
#[cfg(test)]
pub(crate) async fn memory_pool() -> SqlitePool {
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
