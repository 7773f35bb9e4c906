//! Manual hook trigger and plugin administration endpoints.

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use serde_json::{Value, json};

use rentflow_plugin::{ClosurePlugin, HookPoint};

use crate::helpers::{API_KEY, TestApp};

fn payment_plugin() -> Arc<ClosurePlugin> {
    Arc::new(
        ClosurePlugin::new("Payment ledger")
            .on(HookPoint::OnPayment, |payload| async move {
                Ok(json!({ "recorded": payload.to_json()["amount"] }))
            })
            .with_update_config(|config| {
                if config.get("ledger").and_then(Value::as_str) == Some("closed") {
                    return Err(rentflow_core::AppError::plugin("ledger is closed"));
                }
                Ok(())
            }),
    )
}

async fn app_with_payment_plugin() -> TestApp {
    let app = TestApp::new();
    app.plugins
        .register(
            "ledger",
            payment_plugin(),
            [("ledger".to_string(), json!("main"))].into_iter().collect(),
        )
        .await;
    app
}

#[tokio::test]
async fn test_trigger_requires_api_key() {
    let app = app_with_payment_plugin().await;

    for key in [json!("wrong"), json!(""), Value::Null] {
        let mut body = json!({"hook": "onPayment", "data": {}});
        if !key.is_null() {
            body["apiKey"] = key;
        }
        let (status, response) = app.post("/api/plugin", body).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(response["error"], "UNAUTHORIZED");
    }
}

#[tokio::test]
async fn test_trigger_rejects_unknown_hook_and_bad_payload() {
    let app = app_with_payment_plugin().await;

    let (status, body) = app
        .post("/api/plugin", json!({"hook": "onRefund", "data": {}, "apiKey": API_KEY}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Unknown hook 'onRefund'");

    let (status, body) = app
        .post(
            "/api/plugin",
            json!({"hook": "onPayment", "data": {"currency": "EUR"}, "apiKey": API_KEY}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid onPayment payload")
    );
}

#[tokio::test]
async fn test_trigger_dispatches_to_active_plugins() {
    let app = app_with_payment_plugin().await;
    let payment = json!({"booking_reference": "RF1234560042", "amount": 120.5});

    let (status, body) = app
        .post("/api/plugin", json!({"hook": "onPayment", "data": payment.clone(), "apiKey": API_KEY}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"], json!([]));

    app.plugins.activate("ledger").await.unwrap();
    let (status, body) = app
        .post("/api/plugin", json!({"hook": "onPayment", "data": payment.clone(), "apiKey": API_KEY}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": true,
            "hook": "onPayment",
            "results": [{"plugin": "ledger", "result": {"recorded": 120.5}}]
        })
    );
}

#[tokio::test]
async fn test_activate_and_deactivate_over_http() {
    let app = app_with_payment_plugin().await;
    let key = json!({"apiKey": API_KEY});

    let (status, body) = app.post("/api/plugins/ledger/activate", key.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "active");

    let (status, _) = app.post("/api/plugins/ledger/activate", key.clone()).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, listing) = app.get("/api/plugins").await;
    assert_eq!(listing["active"], json!(["ledger"]));
    assert_eq!(listing["registered"][0]["name"], "ledger");
    assert_eq!(listing["registered"][0]["hooks"], json!(["onPayment"]));

    let (status, body) = app.post("/api/plugins/ledger/deactivate", key.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "inactive");
    assert!(app.plugins.subscribers(HookPoint::OnPayment).await.is_empty());

    let (status, _) = app.post("/api/plugins/ghost/activate", key).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .post("/api/plugins/ledger/activate", json!({"apiKey": "nope"}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_config_patch_merges_and_reports_rejection() {
    let app = app_with_payment_plugin().await;
    app.plugins.activate("ledger").await.unwrap();

    let (status, body) = app
        .request(
            Method::PATCH,
            "/api/plugins/ledger/config",
            Some(json!({"apiKey": API_KEY, "config": {"region": "eu"}})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["config"], json!({"ledger": "main", "region": "eu"}));

    let (status, _) = app
        .request(
            Method::PATCH,
            "/api/plugins/ledger/config",
            Some(json!({"apiKey": API_KEY, "config": {"ledger": "closed"}})),
        )
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        app.plugins.plugin_config("ledger").await.unwrap()["ledger"],
        "closed"
    );
}
