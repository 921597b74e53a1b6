//! In-process test application.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use enrolld::db::Database;
use enrolld::http::{AppState, router};
use enrolld::metrics::{MetricSink, Metrics};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Router over a fresh in-memory database holding one student
/// ("TestStudent") and one course ("TestCourse").
pub struct TestApp {
    pub db: Database,
    pub student_id: i64,
    pub course_id: i64,
    router: Router,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        Self::with_metrics(Metrics::disabled()).await
    }

    pub async fn with_sink(sink: Arc<dyn MetricSink>) -> Self {
        Self::with_metrics(Metrics::new(sink)).await
    }

    async fn with_metrics(metrics: Metrics) -> Self {
        let db = Database::new(":memory:").await.expect("in-memory database");
        let student = db.students().create("TestStudent").await.unwrap();
        let course = db.courses().create("TestCourse").await.unwrap();
        let router = router(AppState::new(db.clone(), metrics));

        Self {
            db,
            student_id: student.id,
            course_id: course.id,
            router,
        }
    }

    /// POST a url-encoded form and decode the JSON reply.
    pub async fn post_form(&self, path: &str, body: &str) -> (StatusCode, Value) {
        let req = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send_json(req).await
    }

    pub async fn enroll(&self, student_id: i64, course_id: i64) -> (StatusCode, Value) {
        self.post_form(
            "/enroll",
            &format!("student_id={}&course_id={}", student_id, course_id),
        )
        .await
    }

    pub async fn drop_course(&self, student_id: i64, course_id: i64) -> (StatusCode, Value) {
        self.post_form(
            "/drop",
            &format!("student_id={}&course_id={}", student_id, course_id),
        )
        .await
    }

    pub async fn get_json(&self, path: &str) -> (StatusCode, Value) {
        let req = Request::builder().uri(path).body(Body::empty()).unwrap();
        self.send_json(req).await
    }

    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let req = Request::builder().uri(path).body(Body::empty()).unwrap();
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn send_json(&self, req: Request<Body>) -> (StatusCode, Value) {
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes)
            .unwrap_or_else(|e| panic!("non-JSON body ({e}): {:?}", String::from_utf8_lossy(&bytes)));
        (status, json)
    }

    pub async fn enrollment_rows(&self, student_id: i64, course_id: i64) -> i64 {
        self.db
            .enrollments()
            .count_pair(student_id, course_id)
            .await
            .unwrap()
    }
}
