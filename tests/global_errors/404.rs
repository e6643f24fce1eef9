//! tests/global_errors/404.rs
//! Ensures that hitting an unknown route returns HTTP 404 in the standard envelope.

use crate::common;

use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn returns_404_for_nonexistent_route() {
    let app: common::TestApp = common::spawn_app();

    // Known estancia, unknown sub-route: falls through to the fallback handler.
    let resp: reqwest::Response = reqwest::Client::new()
        .get(app.url("/norte/does/not/exist"))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: String = resp.text().await.unwrap();
    let json: Value = serde_json::from_str(&body).unwrap();

    assert_eq!(json["status"], "NOT_FOUND");
    assert_eq!(json["code"], 404);
    assert_eq!(json["data"]["path"], "/norte/does/not/exist");
    assert!(json["date"].is_string());
}

#[tokio::test]
async fn returns_404_for_missing_upload() {
    let app: common::TestApp = common::spawn_app();

    let resp: reqwest::Response = reqwest::get(app.url("/uploads/norte-0.pdf"))
        .await
        .expect("Failed to execute request.");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["code"], 404);
}
