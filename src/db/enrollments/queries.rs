//! Enrollment repository for database queries.

use super::models::{CourseRoster, Enrollment};
use crate::db::{CourseRepository, DbError, StudentRepository};
use sqlx::SqlitePool;

/// Repository for enrollment operations.
pub struct EnrollmentRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> EnrollmentRepository<'a> {
    /// Create a new enrollment repository.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Enroll a student in a course.
    ///
    /// Both rows must exist. Duplicate detection relies on the
    /// `UNIQUE (student_id, course_id)` constraint, so two concurrent
    /// requests for the same pair produce one row and one `AlreadyEnrolled`.
    pub async fn enroll(&self, student_id: i64, course_id: i64) -> Result<Enrollment, DbError> {
        if StudentRepository::new(self.pool)
            .find_by_id(student_id)
            .await?
            .is_none()
        {
            return Err(DbError::StudentNotFound(student_id));
        }

        if CourseRepository::new(self.pool)
            .find_by_id(course_id)
            .await?
            .is_none()
        {
            return Err(DbError::CourseNotFound(course_id));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO enrollments (student_id, course_id)
            VALUES (?, ?)
            "#,
        )
        .bind(student_id)
        .bind(course_id)
        .execute(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.is_unique_violation() {
                    return DbError::AlreadyEnrolled {
                        student_id,
                        course_id,
                    };
                }
                if db_err.is_foreign_key_violation() {
                    return DbError::DanglingReference {
                        student_id,
                        course_id,
                    };
                }
            }
            DbError::from(e)
        })?;

        Ok(Enrollment {
            id: result.last_insert_rowid(),
            student_id,
            course_id,
        })
    }

    /// Drop a student from a course.
    ///
    /// A single conditional delete; zero affected rows means there was
    /// nothing to drop and the store is unchanged.
    pub async fn drop(&self, student_id: i64, course_id: i64) -> Result<(), DbError> {
        let result = sqlx::query(
            r#"
            DELETE FROM enrollments
            WHERE student_id = ? AND course_id = ?
            "#,
        )
        .bind(student_id)
        .bind(course_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::EnrollmentNotFound {
                student_id,
                course_id,
            });
        }

        Ok(())
    }

    /// Look up the enrollment for an exact pair.
    #[cfg(test)]
    pub(crate) async fn find(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Option<Enrollment>, DbError> {
        let row = sqlx::query_as::<_, (i64, i64, i64)>(
            r#"
            SELECT id, student_id, course_id
            FROM enrollments
            WHERE student_id = ? AND course_id = ?
            "#,
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|(id, student_id, course_id)| Enrollment {
            id,
            student_id,
            course_id,
        }))
    }

    /// Number of enrollment rows for a pair. Never more than one.
    pub async fn count_pair(&self, student_id: i64, course_id: i64) -> Result<i64, DbError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM enrollments WHERE student_id = ? AND course_id = ?",
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_one(self.pool)
        .await?;
        Ok(count)
    }

    /// Course name and enrolled student names, in enrollment order.
    pub async fn roster(&self, course_id: i64) -> Result<CourseRoster, DbError> {
        let course = CourseRepository::new(self.pool)
            .find_by_id(course_id)
            .await?
            .ok_or(DbError::CourseNotFound(course_id))?;

        let students = sqlx::query_scalar::<_, String>(
            r#"
            SELECT s.name
            FROM enrollments e
            JOIN students s ON s.id = e.student_id
            WHERE e.course_id = ?
            ORDER BY e.id
            "#,
        )
        .bind(course_id)
        .fetch_all(self.pool)
        .await?;

        Ok(CourseRoster {
            course: course.name,
            students,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::db::{Database, DbError};

    async fn fixture() -> (Database, i64, i64) {
        let db = Database::new(":memory:").await.unwrap();
        let student = db.students().create("TestStudent").await.unwrap();
        let course = db.courses().create("TestCourse").await.unwrap();
        (db, student.id, course.id)
    }

    #[tokio::test]
    async fn enroll_succeeds_once_then_conflicts() {
        let (db, student_id, course_id) = fixture().await;

        let enrollment = db.enrollments().enroll(student_id, course_id).await.unwrap();
        assert_eq!(enrollment.student_id, student_id);
        assert_eq!(enrollment.course_id, course_id);

        let err = db.enrollments().enroll(student_id, course_id).await.unwrap_err();
        assert!(matches!(err, DbError::AlreadyEnrolled { .. }));

        assert_eq!(
            db.enrollments().count_pair(student_id, course_id).await.unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn drop_without_enrollment_leaves_store_unchanged() {
        let (db, student_id, course_id) = fixture().await;

        let err = db.enrollments().drop(student_id, course_id).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::EnrollmentNotFound { student_id: s, course_id: c } if s == student_id && c == course_id
        ));
        assert!(db.enrollments().find(student_id, course_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn drop_of_unknown_pair_is_not_found() {
        let (db, _, _) = fixture().await;
        let err = db.enrollments().drop(999, 999).await.unwrap_err();
        assert!(matches!(err, DbError::EnrollmentNotFound { .. }));
    }

    #[tokio::test]
    async fn enroll_then_drop_leaves_no_rows() {
        let (db, student_id, course_id) = fixture().await;

        db.enrollments().enroll(student_id, course_id).await.unwrap();
        db.enrollments().drop(student_id, course_id).await.unwrap();

        assert_eq!(
            db.enrollments().count_pair(student_id, course_id).await.unwrap(),
            0
        );

        // Re-enrolling after a drop is allowed
        db.enrollments().enroll(student_id, course_id).await.unwrap();
    }

    #[tokio::test]
    async fn enroll_rejects_unknown_student_and_course() {
        let (db, student_id, course_id) = fixture().await;

        let err = db.enrollments().enroll(42, course_id).await.unwrap_err();
        assert!(matches!(err, DbError::StudentNotFound(42)));

        let err = db.enrollments().enroll(student_id, 42).await.unwrap_err();
        assert!(matches!(err, DbError::CourseNotFound(42)));

        assert_eq!(db.enrollments().count_pair(42, course_id).await.unwrap(), 0);
        assert_eq!(db.enrollments().count_pair(student_id, 42).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn schema_rejects_dangling_rows() {
        let (db, _, course_id) = fixture().await;

        let err = sqlx::query("INSERT INTO enrollments (student_id, course_id) VALUES (?, ?)")
            .bind(777_i64)
            .bind(course_id)
            .execute(db.pool())
            .await
            .unwrap_err();
        assert!(
            err.as_database_error()
                .is_some_and(|e| e.is_foreign_key_violation())
        );
    }

    #[tokio::test]
    async fn roster_of_unenrolled_course_is_empty() {
        let (db, _, course_id) = fixture().await;

        let roster = db.enrollments().roster(course_id).await.unwrap();
        assert_eq!(roster.course, "TestCourse");
        assert!(roster.students.is_empty());
    }

    #[tokio::test]
    async fn roster_lists_students_in_enrollment_order() {
        let (db, first, course_id) = fixture().await;
        let zed = db.students().create("Zed").await.unwrap();
        let amy = db.students().create("Amy").await.unwrap();

        db.enrollments().enroll(zed.id, course_id).await.unwrap();
        db.enrollments().enroll(first, course_id).await.unwrap();
        db.enrollments().enroll(amy.id, course_id).await.unwrap();

        let roster = db.enrollments().roster(course_id).await.unwrap();
        assert_eq!(roster.students, vec!["Zed", "TestStudent", "Amy"]);
    }

    #[tokio::test]
    async fn roster_of_missing_course_is_not_found() {
        let (db, _, _) = fixture().await;
        let err = db.enrollments().roster(404).await.unwrap_err();
        assert!(matches!(err, DbError::CourseNotFound(404)));
    }

    #[tokio::test]
    async fn concurrent_duplicate_enrolls_create_one_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("race.db");
        let db = Database::new(path.to_str().unwrap()).await.unwrap();
        let student = db.students().create("Racer").await.unwrap();
        let course = db.courses().create("Track 101").await.unwrap();

        let mut tasks = Vec::new();
        for _ in 0..8 {
            let db = db.clone();
            let (s, c) = (student.id, course.id);
            tasks.push(tokio::spawn(async move { db.enrollments().enroll(s, c).await }));
        }

        let mut successes = 0;
        let mut conflicts = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => successes += 1,
                Err(DbError::AlreadyEnrolled { .. }) => conflicts += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(conflicts, 7);
        assert_eq!(
            db.enrollments().count_pair(student.id, course.id).await.unwrap(),
            1
        );
    }
}
