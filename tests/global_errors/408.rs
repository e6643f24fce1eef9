//! tests/global_errors/408.rs
//! Ensures that requests outliving the global timeout result in a 408.

use crate::common::{self, CountingConnector, TestOptions};

use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tokio::time::timeout;

#[tokio::test]
async fn returns_408_when_request_times_out() {
    // The tenant database takes longer to open than the request may last.
    let app: common::TestApp = common::spawn_app_with(TestOptions {
        connector: CountingConnector {
            delay: Duration::from_secs(3),
            ..CountingConnector::default()
        },
        timeout_seconds: 1,
        ..TestOptions::default()
    });

    let resp_result: Result<Result<reqwest::Response, reqwest::Error>, tokio::time::error::Elapsed> = timeout(
        Duration::from_secs(5), // client-side timeout duration
        reqwest::Client::new().get(app.url("/norte/db/health")).send(),
    )
    .await;

    assert!(resp_result.is_ok(), "Client timed out waiting for server.");

    let resp: reqwest::Response = resp_result.unwrap().expect("Request failed unexpectedly.");

    assert_eq!(resp.status(), StatusCode::REQUEST_TIMEOUT);

    let body: String = resp.text().await.unwrap();
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "REQUEST_TIMEOUT");
    assert_eq!(json["code"], 408);
}

#[tokio::test]
async fn pool_opened_during_a_timed_out_request_is_reused() {
    let app: common::TestApp = common::spawn_app_with(TestOptions {
        connector: CountingConnector {
            delay: Duration::from_millis(1500),
            ..CountingConnector::default()
        },
        timeout_seconds: 1,
        ..TestOptions::default()
    });

    let first: reqwest::Response = reqwest::get(app.url("/norte/db/health")).await.unwrap();
    assert_eq!(first.status(), StatusCode::REQUEST_TIMEOUT);

    tokio::time::sleep(Duration::from_secs(2)).await;

    let second: reqwest::Response = reqwest::get(app.url("/norte/db/health")).await.unwrap();
    assert_eq!(second.status(), StatusCode::OK);

    let json: Value = second.json().await.unwrap();
    assert_eq!(json["data"]["database"], "db_norte");
    assert_eq!(app.connector.calls(), 1);
}
