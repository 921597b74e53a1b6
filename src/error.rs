//! Unified error handling for enrolld.
//!
//! Storage errors are mapped onto a small HTTP-facing taxonomy here, so
//! handlers only ever return [`AppError`].

use crate::db::DbError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// Response bodies
// ============================================================================

/// `{"status": ..., "message": ...}` body shared by success and error replies.
#[derive(Debug, Serialize)]
pub struct StatusBody {
    pub status: &'static str,
    pub message: String,
}

impl StatusBody {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success",
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: message.into(),
        }
    }
}

// ============================================================================
// Handler Errors
// ============================================================================

/// Errors returned by HTTP handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Duplicate state, e.g. already enrolled.
    #[error("{0}")]
    Conflict(String),

    /// Referenced entity or relationship does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Missing or malformed request parameters.
    #[error("{0}")]
    BadRequest(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    #[inline]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Conflict(_) => "conflict",
            Self::NotFound(_) => "not_found",
            Self::BadRequest(_) => "bad_request",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Message shown to the client. Internal details stay in the logs.
    pub fn client_message(&self) -> &str {
        match self {
            Self::Conflict(msg) | Self::NotFound(msg) | Self::BadRequest(msg) => msg,
            Self::Internal(_) => "Internal server error.",
        }
    }
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::AlreadyEnrolled { .. } => {
                Self::Conflict("Student already enrolled in this course.".to_string())
            }
            DbError::EnrollmentNotFound { .. } => {
                Self::NotFound("Enrollment not found.".to_string())
            }
            DbError::StudentNotFound(_) => Self::NotFound("Student not found.".to_string()),
            DbError::CourseNotFound(_) => Self::NotFound("Course not found.".to_string()),
            DbError::DanglingReference { .. } => {
                Self::NotFound("Student or course not found.".to_string())
            }
            DbError::Sqlx(_) | DbError::Migration(_) => Self::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            Self::Internal(cause) => {
                tracing::error!(error = %cause, "Request failed");
            }
            other => {
                tracing::debug!(code = other.error_code(), message = %other, "Request rejected");
            }
        }
        (status, Json(StatusBody::error(self.client_message()))).into_response()
    }
}
