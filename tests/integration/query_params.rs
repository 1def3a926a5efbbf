//! Query string collapsing over real HTTP

use crate::helpers::*;
use hpp_guard::config::HppSettings;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_repeated_query_keeps_last() {
    let server = TestServer::start().await;
    let body = echoed(server.get("/?role=user&role=admin").await).await;

    assert_eq!(body, json!({ "query": { "role": "admin" }, "body": null }));
}

#[tokio::test]
async fn test_mixed_query_params() {
    let server = TestServer::start().await;
    let body = echoed(server.get("/search?q=shoes&page=1&q=boots&sort=asc").await).await;

    assert_eq!(
        body["query"],
        json!({ "q": "boots", "page": "1", "sort": "asc" })
    );
}

#[tokio::test]
async fn test_query_values_are_decoded() {
    let server = TestServer::start().await;
    let body = echoed(server.get("/?name=John+Doe&city=S%C3%A3o%20Paulo").await).await;

    assert_eq!(body["query"]["name"], "John Doe");
    assert_eq!(body["query"]["city"], "São Paulo");
}

#[tokio::test]
async fn test_no_query_leaves_unset() {
    let server = TestServer::start().await;
    let body = echoed(server.get("/").await).await;

    assert_eq!(body, json!({ "query": null, "body": null }));
}

#[tokio::test]
async fn test_query_check_disabled() {
    let server = TestServer::start_with(HppSettings {
        check_query: false,
        ..HppSettings::default()
    })
    .await;
    let body = echoed(server.get("/?a=1&a=2").await).await;

    assert_eq!(body["query"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_malformed_query_rejected() {
    let server = TestServer::start().await;
    let resp = server.get("/?a=%ZZ").await;

    assert_status(&resp, StatusCode::BAD_REQUEST);
    assert_body_contains(resp, "malformed encoding").await;
}
