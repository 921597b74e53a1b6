//! Enrollment repository.
//!
//! Owns the consistency rules for the student/course join: one row per
//! pair, drops only remove rows that exist, and rosters only exist for
//! courses that exist.

pub mod models;
pub mod queries;

pub use models::{CourseRoster, Enrollment};
pub use queries::EnrollmentRepository;
