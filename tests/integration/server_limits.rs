//! Server behavior around the guard: size limits, request ids, errors

use crate::helpers::*;
use hpp_guard::config::{BodySource, HppSettings};
use reqwest::StatusCode;

#[tokio::test]
async fn test_oversized_body_rejected() {
    let server = TestServer::start_with_limit(HppSettings::default(), 16).await;
    let resp = server.post_form("/", &"a=1&".repeat(20)).await;

    assert_status(&resp, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_body_at_limit_accepted() {
    let server = TestServer::start_with_limit(HppSettings::default(), 16).await;
    let resp = server.post_form("/", "a=1&a=2&a=3&b=4").await;

    assert_status(&resp, StatusCode::OK);
}

#[tokio::test]
async fn test_malformed_body_rejected() {
    let server = TestServer::start_with(HppSettings {
        check_query: true,
        check_body: true,
        body_source: BodySource::Buffer,
    })
    .await;
    let resp = server.post_form("/", "a=%E0%A4%A").await;

    assert_status(&resp, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_response_is_json() {
    let server = TestServer::start().await;
    let resp = server.get("/?a=1").await;

    assert_status(&resp, StatusCode::OK);
    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(content_type.starts_with("application/json"));
}

#[tokio::test]
async fn test_request_id_echoed() {
    let server = TestServer::start().await;
    let resp = server
        .client
        .get(format!("{}/?a=1", server.base_url))
        .header("x-request-id", "trace-42")
        .send()
        .await
        .expect("GET request failed");

    assert_status(&resp, StatusCode::OK);
    assert_header(&resp, "x-request-id", "trace-42");
}
