//! Enrollment endpoint handlers.

use super::{AppState, page};
use crate::error::{AppError, StatusBody};
use axum::Json;
use axum::extract::rejection::{FormRejection, PathRejection};
use axum::extract::{Form, Path, State};
use axum::response::Html;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Form body for `/enroll` and `/drop`.
///
/// Fields are kept as raw strings so missing or non-numeric ids become a
/// 400 with a JSON body instead of an extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct EnrollmentForm {
    pub student_id: Option<String>,
    pub course_id: Option<String>,
}

impl EnrollmentForm {
    fn ids(&self) -> Result<(i64, i64), AppError> {
        let student_id = parse_id(self.student_id.as_deref(), "student_id")?;
        let course_id = parse_id(self.course_id.as_deref(), "course_id")?;
        Ok((student_id, course_id))
    }
}

/// Body of `GET /course/:course_id/students`.
#[derive(Debug, Serialize)]
pub struct RosterBody {
    pub course: String,
    pub students: Vec<String>,
}

fn parse_id(raw: Option<&str>, field: &str) -> Result<i64, AppError> {
    raw.map(str::trim)
        .and_then(|v| v.parse::<i64>().ok())
        .ok_or_else(|| AppError::BadRequest(format!("Invalid {}.", field)))
}

fn form_ids(form: Result<Form<EnrollmentForm>, FormRejection>) -> Result<(i64, i64), AppError> {
    match form {
        Ok(Form(form)) => form.ids(),
        Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
    }
}

/// GET / - listing of courses and students.
pub(super) async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let courses = state.db.courses().list_all().await?;
    let students = state.db.students().list_all().await?;

    state.metrics.emit("views.index", 1);
    Ok(Html(page::render(&courses, &students)))
}

/// POST /enroll
pub(super) async fn enroll(
    State(state): State<AppState>,
    form: Result<Form<EnrollmentForm>, FormRejection>,
) -> Result<Json<StatusBody>, AppError> {
    let (student_id, course_id) = form_ids(form)?;
    let enrollment = state.db.enrollments().enroll(student_id, course_id).await?;
    info!(
        enrollment_id = enrollment.id,
        student_id, course_id, "Student enrolled"
    );

    state.metrics.emit("enrollments.success", 1);
    Ok(Json(StatusBody::success("Enrolled successfully!")))
}

/// POST /drop
pub(super) async fn drop_enrollment(
    State(state): State<AppState>,
    form: Result<Form<EnrollmentForm>, FormRejection>,
) -> Result<Json<StatusBody>, AppError> {
    let (student_id, course_id) = form_ids(form)?;
    state.db.enrollments().drop(student_id, course_id).await?;
    info!(student_id, course_id, "Enrollment dropped");

    state.metrics.emit("enrollments.dropped", 1);
    Ok(Json(StatusBody::success("Dropped course successfully!")))
}

/// GET /course/:course_id/students
pub(super) async fn course_students(
    State(state): State<AppState>,
    course_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<RosterBody>, AppError> {
    let Path(course_id) =
        course_id.map_err(|_| AppError::BadRequest("Invalid course_id.".to_string()))?;
    let roster = state.db.enrollments().roster(course_id).await?;

    state.metrics.emit("views.course_details", 1);
    Ok(Json(RosterBody {
        course: roster.course,
        students: roster.students,
    }))
}
