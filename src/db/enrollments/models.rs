//! Enrollment database models.

/// A student's enrollment in a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
}

/// A course together with the names of its enrolled students.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRoster {
    pub course: String,
    /// Student names in enrollment order.
    pub students: Vec<String>,
}
