//! End-to-end checks over a real TCP listener.

mod common;

use common::TestServer;
use enrolld::http::serve_metrics;
use enrolld::metrics::{self, Metrics};
use serde_json::Value;

#[tokio::test]
async fn test_seeded_server_round_trip() {
    let server = TestServer::spawn()
        .await
        .expect("Failed to spawn test server");
    let client = reqwest::Client::new();

    let html = client
        .get(server.url("/"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("Student Course Enrollment System"));
    for name in ["Math 101", "History 202", "Physics 301", "Chemistry 101", "Alice", "Bob", "Charlie"] {
        assert!(html.contains(name), "index is missing {name}");
    }

    // Alice (1) into Physics 301 (3)
    let resp = client
        .post(server.url("/enroll"))
        .form(&[("student_id", "1"), ("course_id", "3")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);

    let roster: Value = client
        .get(server.url("/course/3/students"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(roster["course"], "Physics 301");
    assert_eq!(roster["students"], serde_json::json!(["Alice"]));

    let resp = client
        .post(server.url("/drop"))
        .form(&[("student_id", "2"), ("course_id", "3")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Enrollment not found.");
}

#[tokio::test]
async fn test_metrics_listener_exports_events() {
    metrics::init();
    Metrics::disabled()
        .emit("views.index", 1)
        .await
        .expect("emit task panicked");

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(serve_metrics(listener));

    let body = reqwest::get(format!("http://{}/metrics", addr))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    handle.abort();

    assert!(body.contains("enrollment_app_events_total"));
    assert!(body.contains("views.index"));
}
