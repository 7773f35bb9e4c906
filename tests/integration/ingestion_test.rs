//! Booking, lead and availability endpoints.

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;

use rentflow_core::error::AppError;
use rentflow_integrations::VendorClients;
use rentflow_plugin::{ClosurePlugin, HookPoint};

use crate::helpers::{FakeCrm, TestApp, booking_body};

#[tokio::test]
async fn test_lead_gets_defaults_and_timestamp() {
    let app = TestApp::new();

    let (status, body) = app
        .post("/api/lead", json!({"name": "Jane", "email": "jane@x.com"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["lead"]["source"], "website");
    assert_eq!(body["lead"]["status"], "new");
    assert!(body["lead"]["created_at"].is_string());
    assert!(body["lead"]["id"].is_string());
    assert_eq!(body["plugin_results"], json!([]));
    assert_eq!(app.store.len("leads"), 1);
}

#[tokio::test]
async fn test_lead_without_email_rejected() {
    let app = TestApp::new();

    let (status, body) = app.post("/api/lead", json!({"name": "Jane"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(body["message"], "Missing required fields: email");
    assert_eq!(app.store.len("leads"), 0);
}

#[tokio::test]
async fn test_booking_reports_each_plugin_in_order() {
    let app = TestApp::new();
    app.plugins
        .register(
            "first",
            Arc::new(ClosurePlugin::new("Throws").on(HookPoint::OnBooking, |_| async {
                Err(AppError::plugin("vendor rejected booking"))
            })),
            Default::default(),
        )
        .await;
    app.plugins
        .register(
            "second",
            Arc::new(ClosurePlugin::new("Echo").on(HookPoint::OnBooking, |payload| async move {
                Ok(payload.to_json()["vehicle_id"].clone())
            })),
            Default::default(),
        )
        .await;
    app.plugins.activate("first").await.unwrap();
    app.plugins.activate("second").await.unwrap();

    let (status, body) = app.post("/api/booking", booking_body()).await;

    assert_eq!(status, StatusCode::OK);
    let results = body["plugin_results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(
        results[0],
        json!({"plugin": "first", "error": "vendor rejected booking"})
    );
    assert_eq!(results[1], json!({"plugin": "second", "result": "vw-golf-01"}));

    let reference = body["booking"]["booking_reference"].as_str().unwrap();
    assert!(reference.starts_with("RF"));
    assert_eq!(reference.len(), 12);
    assert_eq!(body["booking"]["status"], "pending");
}

#[tokio::test]
async fn test_booking_missing_fields_has_no_side_effects() {
    let app = TestApp::new();
    let mut body = booking_body();
    body["phone"] = json!("");
    body.as_object_mut().unwrap().remove("pickup_date");

    let (status, response) = app.post("/api/booking", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response["message"],
        "Missing required fields: phone, pickup_date"
    );
    assert_eq!(app.store.len("bookings"), 0);
}

#[tokio::test]
async fn test_malformed_json_is_a_client_error() {
    let app = TestApp::new();
    assert_eq!(
        app.post_raw("/api/booking", "{\"vehicle_id\": ").await,
        StatusCode::BAD_REQUEST
    );
    assert_eq!(app.post_raw("/api/lead", "[1, 2]").await, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_vendor_failure_does_not_fail_booking() {
    let crm = Arc::new(FakeCrm::default());
    let app = TestApp::with_vendors(VendorClients {
        crm: Some(crm.clone()),
        ..VendorClients::default()
    });

    let (status, body) = app.post("/api/booking", booking_body()).await;
    assert_eq!(status, StatusCode::OK);

    let notifications = body["notifications"].as_array().unwrap();
    let crm_entry = notifications
        .iter()
        .find(|n| n["vendor"] == "crm")
        .unwrap();
    assert_eq!(crm_entry["status"], "failed");
    assert_eq!(crm_entry["detail"], "CRM API error: 503 - maintenance");

    let (status, _) = app
        .post("/api/lead", json!({"name": "Jane", "email": "jane@x.com"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(*crm.leads.lock().unwrap(), vec!["jane@x.com".to_string()]);
}

#[tokio::test]
async fn test_availability() {
    let app = TestApp::with_vendors(VendorClients {
        crm: Some(Arc::new(FakeCrm {
            booked: vec!["vw-golf-01".to_string()],
            ..FakeCrm::default()
        })),
        ..VendorClients::default()
    });

    let (status, body) = app
        .post(
            "/api/availability",
            json!({"vehicle_id": "vw-golf-01", "from": "2026-07-01", "to": "2026-07-08"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["availability"]["available"], false);
    assert_eq!(body["availability"]["alternatives"], json!(["vw-polo-02"]));

    let (status, body) = app
        .post("/api/availability", json!({"vehicle_id": "vw-golf-01"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing required fields: from, to");
}

#[tokio::test]
async fn test_availability_without_crm_is_server_error() {
    let app = TestApp::new();
    let (status, body) = app
        .post(
            "/api/availability",
            json!({"vehicle_id": "vw-golf-01", "from": "2026-07-01", "to": "2026-07-08"}),
        )
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "INTERNAL_ERROR");
}
