//! Course repository.

use super::DbError;
use sqlx::SqlitePool;

/// A course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: i64,
    pub name: String,
}

/// Repository for course operations.
pub struct CourseRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CourseRepository<'a> {
    /// Create a new course repository.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a course and return it with its assigned id.
    pub async fn create(&self, name: &str) -> Result<Course, DbError> {
        let result = sqlx::query("INSERT INTO courses (name) VALUES (?)")
            .bind(name)
            .execute(self.pool)
            .await?;

        Ok(Course {
            id: result.last_insert_rowid(),
            name: name.to_string(),
        })
    }

    /// Find a course by id.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Course>, DbError> {
        let row = sqlx::query_as::<_, (i64, String)>(
            r#"
            SELECT id, name
            FROM courses
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|(id, name)| Course { id, name }))
    }

    /// All courses ordered by id.
    pub async fn list_all(&self) -> Result<Vec<Course>, DbError> {
        let rows = sqlx::query_as::<_, (i64, String)>(
            r#"
            SELECT id, name
            FROM courses
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| Course { id, name })
            .collect())
    }

    /// Number of courses.
    #[cfg(test)]
    pub(crate) async fn count(&self) -> Result<i64, DbError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM courses")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}
