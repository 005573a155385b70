//! Failure injection: backend errors, slow sinks, error reporting.

use axum::http::StatusCode;
use grtn_redirect::config::Environment;
use serde_json::json;
use std::time::{Duration, Instant};

mod common;

use common::{client, spawn_server, start_recorder, start_wiki, test_config, Reply};

fn discord() -> Reply {
    Reply::pages(json!([{ "pageRef": "Discord", "frontMatter": { "grtn": "discord" } }]))
}

#[tokio::test]
async fn test_backend_failure_renders_failure_page() {
    let wiki = start_wiki(discord(), Reply::status(503)).await;
    let server = spawn_server(test_config(&wiki)).await;

    let res = client().get(server.url("/discord")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res.headers().get("location").is_none());

    let body = res.text().await.unwrap();
    assert!(body.contains("Something went wrong"));
    assert!(body.contains("<details><summary>Technical details</summary>"));
    assert!(body.contains("HTTP error! status: 503"));
}

#[tokio::test]
async fn test_failure_waits_for_sibling_query() {
    let wiki = start_wiki(
        Reply::status(500),
        discord().delayed(Duration::from_millis(300)),
    )
    .await;
    let server = spawn_server(test_config(&wiki)).await;

    let res = client().get(server.url("/discord")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(wiki.hits(), 2);
    assert_eq!(wiki.completed(), 2, "slow query must finish before the error surfaces");
}

#[tokio::test]
async fn test_unreadable_envelope_fails_request() {
    let mut broken = discord();
    broken.body = json!({ "result": { "data": {} } });
    let wiki = start_wiki(broken, discord()).await;
    let server = spawn_server(test_config(&wiki)).await;

    let res = client().get(server.url("/discord")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res.text().await.unwrap().contains("unreadable envelope"));
}

#[tokio::test]
async fn test_development_mode_surfaces_raw_error() {
    let wiki = start_wiki(Reply::status(502), discord()).await;
    let mut config = test_config(&wiki);
    config.environment = Environment::Development;
    let server = spawn_server(config).await;

    let res = client().get(server.url("/discord")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = res.text().await.unwrap();
    assert!(body.starts_with("Status {"));
    assert!(!body.contains("<html>"));
}

#[tokio::test]
async fn test_failure_is_reported_before_responding() {
    let wiki = start_wiki(Reply::status(500), discord()).await;
    let sink = start_recorder(200, Duration::ZERO).await;
    let mut config = test_config(&wiki);
    config.error_reporting.endpoint = Some(sink.url());
    let server = spawn_server(config).await;

    let res = client()
        .get(server.url("/discord?via=test"))
        .header("user-agent", "failure-test")
        .header("x-request-id", "req-42")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let reports = sink.bodies();
    assert_eq!(reports.len(), 1);
    let report = &reports[0];
    assert_eq!(report["request_id"], "req-42");
    assert_eq!(report["method"], "GET");
    assert_eq!(report["uri"], "/discord?via=test");
    assert_eq!(report["headers"]["user-agent"], "failure-test");
    assert_eq!(report["environment"], "production");
    assert!(report["message"].as_str().unwrap().contains("status: 500"));
}

#[tokio::test]
async fn test_error_sink_failure_keeps_failure_page() {
    let wiki = start_wiki(Reply::status(500), discord()).await;
    let sink = start_recorder(500, Duration::ZERO).await;
    let mut config = test_config(&wiki);
    config.error_reporting.endpoint = Some(sink.url());
    let server = spawn_server(config).await;

    let res = client().get(server.url("/discord")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res.text().await.unwrap().contains("Technical details"));
}

#[tokio::test]
async fn test_visit_is_tracked() {
    let wiki = start_wiki(discord(), Reply::pages(json!([]))).await;
    let sink = start_recorder(200, Duration::ZERO).await;
    let mut config = test_config(&wiki);
    config.telemetry.endpoint = sink.url();
    config.telemetry.api_key = Some("test-key".into());
    let server = spawn_server(config).await;

    let res = client()
        .get(server.url("/discord"))
        .header("cf-connecting-ip", "203.0.113.9")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FOUND);

    // Tracking is joined before the response is sent.
    let events = sink.bodies();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["api_key"], "test-key");
    let event = &events[0]["events"][0];
    assert_eq!(event["event_type"], "visit");
    assert_eq!(event["user_id"], "anonymous_user");
    assert_eq!(event["event_properties"]["pathname"], "/discord");
    assert_eq!(event["ip"], "203.0.113.9");
}

#[tokio::test]
async fn test_favicon_is_not_tracked() {
    let wiki = start_wiki(discord(), Reply::pages(json!([]))).await;
    let sink = start_recorder(200, Duration::ZERO).await;
    let mut config = test_config(&wiki);
    config.telemetry.endpoint = sink.url();
    config.telemetry.api_key = Some("test-key".into());
    let server = spawn_server(config).await;

    let res = client().get(server.url("/favicon.ico")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(sink.bodies().is_empty());
    assert_eq!(wiki.hits(), 0);
}

#[tokio::test]
async fn test_slow_tracking_is_abandoned() {
    let wiki = start_wiki(discord(), Reply::pages(json!([]))).await;
    let sink = start_recorder(200, Duration::from_secs(5)).await;
    let mut config = test_config(&wiki);
    config.telemetry.endpoint = sink.url();
    config.telemetry.api_key = Some("test-key".into());
    config.telemetry.timeout_ms = 200;
    let server = spawn_server(config).await;

    let start = Instant::now();
    let res = client().get(server.url("/discord")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers()["location"], "https://site.example/wiki/Discord");
    assert!(start.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn test_failing_tracking_does_not_change_status() {
    let wiki = start_wiki(discord(), Reply::pages(json!([]))).await;
    let sink = start_recorder(500, Duration::ZERO).await;
    let mut config = test_config(&wiki);
    config.telemetry.endpoint = sink.url();
    config.telemetry.api_key = Some("test-key".into());
    let server = spawn_server(config).await;

    let res = client().get(server.url("/nothing-here")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers()["location"], "https://short.example/nothing-here");
}

#[tokio::test]
async fn test_tracking_overlaps_resolution() {
    let delay = Duration::from_millis(400);
    let wiki = start_wiki(discord().delayed(delay), Reply::pages(json!([])).delayed(delay)).await;
    let sink = start_recorder(200, delay).await;
    let mut config = test_config(&wiki);
    config.telemetry.endpoint = sink.url();
    config.telemetry.api_key = Some("test-key".into());
    config.telemetry.timeout_ms = 2000;
    let server = spawn_server(config).await;

    let start = Instant::now();
    let res = client().get(server.url("/discord")).send().await.unwrap();
    let elapsed = start.elapsed();

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(sink.bodies().len(), 1, "tracking finished before the response");
    assert!(elapsed < Duration::from_millis(700), "took {elapsed:?}");
}
