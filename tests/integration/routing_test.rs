//! Method and path fallbacks, health.

use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_wrong_method_is_405_json() {
    let app = TestApp::new();

    for (method, uri) in [
        (Method::GET, "/api/booking"),
        (Method::PUT, "/api/lead"),
        (Method::DELETE, "/api/plugin"),
        (Method::POST, "/api/health"),
    ] {
        let (status, body) = app.request(method, uri, None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{uri}");
        assert_eq!(body["error"], "METHOD_NOT_ALLOWED");
    }
}

#[tokio::test]
async fn test_unknown_path_is_404_json() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/bookings/42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["active_plugins"], json!(0));
}
