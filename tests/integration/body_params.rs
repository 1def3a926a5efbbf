//! Form body collapsing over real HTTP

use crate::helpers::*;
use hpp_guard::config::{BodySource, HppSettings};
use serde_json::json;

fn body_checking() -> HppSettings {
    HppSettings {
        check_query: true,
        check_body: true,
        body_source: BodySource::Buffer,
    }
}

#[tokio::test]
async fn test_form_post_collapses_body() {
    let server = TestServer::start_with(body_checking()).await;
    let body = echoed(server.post_form("/login", "user=bob&user=alice&pw=x").await).await;

    assert_eq!(
        body,
        json!({ "query": null, "body": { "user": "alice", "pw": "x" } })
    );
}

#[tokio::test]
async fn test_form_post_with_charset() {
    let server = TestServer::start_with(body_checking()).await;
    let body = echoed(
        server
            .post_raw(
                "/?id=1&id=2",
                "application/x-www-form-urlencoded; charset=UTF-8",
                "a=1&a=3",
            )
            .await,
    )
    .await;

    assert_eq!(body, json!({ "query": { "id": "2" }, "body": { "a": "3" } }));
}

#[tokio::test]
async fn test_json_post_body_ignored() {
    let server = TestServer::start_with(body_checking()).await;
    let body = echoed(
        server
            .post_raw("/", "application/json", r#"{"a":1,"a":2}"#)
            .await,
    )
    .await;

    assert_eq!(body["body"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_put_form_body_ignored() {
    let server = TestServer::start_with(body_checking()).await;
    let body = echoed(
        server
            .request("PUT", "/", "application/x-www-form-urlencoded", "a=1&a=2")
            .await,
    )
    .await;

    assert_eq!(body["body"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_body_check_disabled_by_default() {
    let server = TestServer::start().await;
    let body = echoed(server.post_form("/", "a=1&a=2").await).await;

    assert_eq!(body["body"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_url_body_source_reads_query() {
    let server = TestServer::start_with(HppSettings {
        body_source: BodySource::Url,
        ..body_checking()
    })
    .await;
    let body = echoed(server.post_form("/?x=1&x=9", "a=1&a=2").await).await;

    assert_eq!(body["body"], json!({ "x": "9" }));
}
