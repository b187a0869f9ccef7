mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(server.url("/health")).send().await?;
    assert_eq!(res.status(), StatusCode::OK, "unexpected status: {}", res.status());

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok", "unexpected body: {}", body);
    Ok(())
}

#[tokio::test]
async fn root_reports_version() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();

    let body = client
        .get(server.url("/"))
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;

    assert_eq!(body["name"], "books-api");
    assert!(body["version"].is_string(), "missing version: {}", body);
    Ok(())
}
