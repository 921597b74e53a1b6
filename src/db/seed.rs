//! First-start seeding of courses and students.

use super::{Database, DbError};
use tracing::info;

/// Courses inserted into an empty database.
pub const DEFAULT_COURSES: [&str; 4] = ["Math 101", "History 202", "Physics 301", "Chemistry 101"];

/// Students inserted into an empty database.
pub const DEFAULT_STUDENTS: [&str; 3] = ["Alice", "Bob", "Charlie"];

impl Database {
    /// Seed the default courses and students if no course exists yet.
    ///
    /// Returns `true` when rows were inserted.
    pub async fn seed_defaults(&self) -> Result<bool, DbError> {
        let mut tx = self.pool().begin().await?;

        let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM courses")
            .fetch_one(&mut *tx)
            .await?;
        if existing > 0 {
            return Ok(false);
        }

        for name in DEFAULT_COURSES {
            sqlx::query("INSERT INTO courses (name) VALUES (?)")
                .bind(name)
                .execute(&mut *tx)
                .await?;
        }
        for name in DEFAULT_STUDENTS {
            sqlx::query("INSERT INTO students (name) VALUES (?)")
                .bind(name)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        info!(
            courses = DEFAULT_COURSES.len(),
            students = DEFAULT_STUDENTS.len(),
            "Database initialized and seeded"
        );
        Ok(true)
    }
}
