//! Student repository.

use super::DbError;
use sqlx::SqlitePool;

/// A student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub id: i64,
    pub name: String,
}

/// Repository for student operations.
pub struct StudentRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> StudentRepository<'a> {
    /// Create a new student repository.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a student and return it with its assigned id.
    pub async fn create(&self, name: &str) -> Result<Student, DbError> {
        let result = sqlx::query("INSERT INTO students (name) VALUES (?)")
            .bind(name)
            .execute(self.pool)
            .await?;

        Ok(Student {
            id: result.last_insert_rowid(),
            name: name.to_string(),
        })
    }

    /// Find a student by id.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Student>, DbError> {
        let row = sqlx::query_as::<_, (i64, String)>(
            r#"
            SELECT id, name
            FROM students
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|(id, name)| Student { id, name }))
    }

    /// All students ordered by id.
    pub async fn list_all(&self) -> Result<Vec<Student>, DbError> {
        let rows = sqlx::query_as::<_, (i64, String)>(
            r#"
            SELECT id, name
            FROM students
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| Student { id, name })
            .collect())
    }
}
