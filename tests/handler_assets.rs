mod common;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use serde_json::Value;

// ─── UPLOAD URL ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_upload_url_default_tenant() {
    let server = common::default_server();

    let response = server.get("/api/upload-url").await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["url"],
        "https://static.example.com/wp-content/uploads"
    );
}

#[tokio::test]
async fn test_upload_url_secondary_tenant() {
    let server = common::default_server();

    let response = server
        .get("/api/upload-url")
        .add_query_param("tenant_id", 2)
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["url"],
        "https://static.example.com/wp-content/uploads/sites/2"
    );
}

#[tokio::test]
async fn test_upload_url_other_tenant_has_no_suffix() {
    let server = common::default_server();

    let response = server
        .get("/api/upload-url")
        .add_query_param("tenant_id", 3)
        .await;

    assert_eq!(
        response.json::<Value>()["url"],
        "https://static.example.com/wp-content/uploads"
    );
}

#[tokio::test]
async fn test_upload_url_not_configured() {
    let server = common::unconfigured_server();

    let response = server.get("/api/upload-url").await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"]["code"], "not_configured");
}

#[tokio::test]
async fn test_upload_url_invalid_tenant() {
    let server = common::default_server();

    let response = server
        .get("/api/upload-url")
        .add_query_param("tenant_id", "two")
        .await;

    assert!(response.status_code().is_client_error());
}

// ─── CONCAT BASE ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_concat_base_defaults_to_https() {
    let server = common::default_server();

    let response = server.get("/api/concat-base").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["url"], "https://static.example.com");
}

#[tokio::test]
async fn test_concat_base_explicit_scheme() {
    let server = common::default_server();

    let response = server
        .get("/api/concat-base")
        .add_query_param("scheme", "http")
        .await;

    assert_eq!(response.json::<Value>()["url"], "http://static.example.com");
}

#[tokio::test]
async fn test_concat_base_forwarded_proto() {
    let server = common::default_server();

    let response = server
        .get("/api/concat-base")
        .add_header(
            HeaderName::from_static("x-forwarded-proto"),
            HeaderValue::from_static("http"),
        )
        .await;

    assert_eq!(response.json::<Value>()["url"], "http://static.example.com");
}

#[tokio::test]
async fn test_concat_base_not_configured() {
    let server = common::unconfigured_server();

    let response = server.get("/api/concat-base").await;

    response.assert_status(StatusCode::NOT_FOUND);
}

// ─── DNS PREFETCH ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_dns_prefetch_renders_links() {
    let server = common::default_server();

    let response = server.get("/api/dns-prefetch").await;

    response.assert_status_ok();
    assert!(
        response
            .header("content-type")
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );
    assert_eq!(
        response.text(),
        "<link rel='dns-prefetch' href='//stats.example.com'>\n"
    );
}

#[tokio::test]
async fn test_dns_prefetch_empty() {
    let server = common::unconfigured_server();

    let response = server.get("/api/dns-prefetch").await;

    response.assert_status_ok();
    assert_eq!(response.text(), "");
}
