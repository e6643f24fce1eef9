//! tests/global_errors/413.rs
//! Ensures that an upload larger than the body limit triggers 413.

use crate::common::{self, TestOptions};

use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn returns_413_when_upload_exceeds_global_limit() {
    let app: common::TestApp = common::spawn_app_with(TestOptions {
        max_body_size: 1024,
        ..TestOptions::default()
    });

    let oversized_payload: Vec<u8> = vec![b'X'; 16 * 1024];
    let form: reqwest::multipart::Form = reqwest::multipart::Form::new().part(
        "archivo",
        reqwest::multipart::Part::bytes(oversized_payload).file_name("grande.bin"),
    );

    let resp: reqwest::Response = reqwest::Client::new()
        .post(app.url("/norte/uploads"))
        .multipart(form)
        .send()
        .await
        .expect("Failed to send large request.");

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let body: String = resp.text().await.unwrap();
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "PAYLOAD_TOO_LARGE");
    assert_eq!(json["code"], 413);

    assert_eq!(std::fs::read_dir(app.uploads_dir.path()).unwrap().count(), 0);
}
