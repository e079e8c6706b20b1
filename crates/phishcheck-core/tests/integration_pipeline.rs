//! Integration test: the full pipeline against a local prediction endpoint.
//!
//! Drives the real `CurlDispatcher` through a minimal HTTP server and checks
//! the verdict and rendered HTML for each end-to-end scenario.

mod common;

use std::time::{Duration, Instant};

use common::predict_server::{self, PredictServerOptions};
use phishcheck_core::config::PipelineConfig;
use phishcheck_core::dispatch::{CurlDispatcher, TransportKind};
use phishcheck_core::pipeline::Pipeline;
use phishcheck_core::precheck::{PrecheckMode, RuleChain};
use phishcheck_core::sink::HtmlSink;
use phishcheck_core::validate::ValidationErrorKind;
use phishcheck_core::verdict::{ErrorCause, Outcome};

fn pipeline_for(endpoint: &str, min_display_ms: u64) -> Pipeline<CurlDispatcher> {
    let cfg = PipelineConfig {
        endpoint_url: endpoint.to_string(),
        min_display: Duration::from_millis(min_display_ms),
        connect_timeout: Duration::from_secs(2),
        request_timeout: Duration::from_secs(5),
        precheck: PrecheckMode::Advisory,
    };
    let dispatcher = CurlDispatcher::from_config(&cfg);
    Pipeline::new(cfg, dispatcher, RuleChain::builtin().unwrap())
}

#[tokio::test]
async fn legitimate_url_renders_safe_banner() {
    let server = predict_server::start(PredictServerOptions::json(200, r#"{"result":"False"}"#));
    let pipeline = pipeline_for(&server.url, 50);
    let mut sink = HtmlSink::new();

    let verdict = pipeline.analyze("example.com", &mut sink).await;

    assert_eq!(verdict.outcome, Outcome::Safe);
    assert!(verdict.cause.is_none());
    assert!(!sink.is_loading());
    let html = sink.html().expect("rendered");
    assert!(html.contains(r#"class="result safe""#));
    assert!(html.contains("Analysis of: example.com"));
}

#[tokio::test]
async fn request_is_json_post_with_trimmed_url() {
    let server = predict_server::start(PredictServerOptions::json(200, r#"{"result":"False"}"#));
    let pipeline = pipeline_for(&server.url, 0);
    let mut sink = HtmlSink::new();

    pipeline.analyze("  https://example.com/a?b=1  ", &mut sink).await;

    let requests = server.requests();
    assert_eq!(requests.len(), 1, "exactly one request per analysis");
    let req = &requests[0];
    assert_eq!(req.method, "POST");
    assert_eq!(req.content_type.as_deref(), Some("application/json"));
    let body: serde_json::Value = serde_json::from_str(&req.body).unwrap();
    assert_eq!(body, serde_json::json!({"url": "https://example.com/a?b=1"}));
}

#[tokio::test]
async fn phishing_url_renders_danger_banner_with_findings() {
    let server = predict_server::start(PredictServerOptions::json(200, r#"{"result":"True"}"#));
    let pipeline = pipeline_for(&server.url, 50);
    let mut sink = HtmlSink::new();

    let verdict = pipeline.analyze("paypa1-secure-login.tk", &mut sink).await;

    assert_eq!(verdict.outcome, Outcome::Suspicious);
    assert_eq!(verdict.local_findings.len(), 1);
    let html = sink.html().expect("rendered");
    assert!(html.contains(r#"class="result danger""#));
    assert!(html.contains("<li>The backend detected this URL as: phishing</li>"));
    assert!(html.contains("Uses suspicious top-level domain"));
}

#[tokio::test]
async fn empty_input_sends_no_request() {
    let server = predict_server::start(PredictServerOptions::json(200, r#"{"result":"False"}"#));
    let pipeline = pipeline_for(&server.url, 800);
    let mut sink = HtmlSink::new();

    let started = Instant::now();
    let verdict = pipeline.analyze("", &mut sink).await;

    assert_eq!(
        verdict.cause,
        Some(ErrorCause::Validation {
            reason: ValidationErrorKind::Empty
        })
    );
    assert!(
        started.elapsed() < Duration::from_millis(800),
        "rejected input is not held by the timing guard"
    );
    assert!(server.requests().is_empty());
    assert!(sink.html().unwrap().contains("Please enter a URL to analyze"));
}

#[tokio::test]
async fn refused_connection_is_transport_error() {
    let pipeline = pipeline_for(&predict_server::refused_endpoint(), 0);
    let mut sink = HtmlSink::new();

    let verdict = pipeline.analyze("example.com", &mut sink).await;

    assert_eq!(verdict.outcome, Outcome::Error);
    assert_eq!(
        verdict.cause,
        Some(ErrorCause::Transport {
            transport: TransportKind::Connection
        })
    );
    assert!(sink
        .html()
        .unwrap()
        .contains("Failed to connect to phishing detection server."));
}

#[tokio::test]
async fn server_error_carries_backend_text() {
    let server = predict_server::start(PredictServerOptions::json(
        500,
        r#"{"error":"model unavailable"}"#,
    ));
    let pipeline = pipeline_for(&server.url, 0);
    let mut sink = HtmlSink::new();

    let verdict = pipeline.analyze("example.com", &mut sink).await;

    assert_eq!(verdict.cause, Some(ErrorCause::Backend { status: 500 }));
    assert!(verdict
        .messages
        .iter()
        .any(|m| m == "Server said: model unavailable"));
    assert!(sink.html().unwrap().contains("model unavailable"));
}

#[tokio::test]
async fn non_json_success_is_malformed() {
    let server = predict_server::start(PredictServerOptions::json(200, "<html>oops</html>"));
    let pipeline = pipeline_for(&server.url, 0);
    let mut sink = HtmlSink::new();

    let verdict = pipeline.analyze("example.com", &mut sink).await;

    assert_eq!(verdict.cause, Some(ErrorCause::MalformedResponse));
}

#[tokio::test]
async fn unknown_discriminator_is_never_safe() {
    let server = predict_server::start(PredictServerOptions::json(200, r#"{"result":"Phishing"}"#));
    let pipeline = pipeline_for(&server.url, 0);
    let mut sink = HtmlSink::new();

    let verdict = pipeline.analyze("example.com", &mut sink).await;

    assert_eq!(verdict.outcome, Outcome::Error);
    assert_eq!(verdict.cause, Some(ErrorCause::UnrecognizedDiscriminator));
}

#[tokio::test]
async fn slow_backend_times_out() {
    let mut opts = PredictServerOptions::json(200, r#"{"result":"False"}"#);
    opts.delay = Duration::from_millis(1500);
    let server = predict_server::start(opts);
    let cfg = PipelineConfig {
        endpoint_url: server.url.clone(),
        min_display: Duration::ZERO,
        connect_timeout: Duration::from_secs(1),
        request_timeout: Duration::from_millis(300),
        precheck: PrecheckMode::Off,
    };
    let pipeline = Pipeline::new(
        cfg.clone(),
        CurlDispatcher::from_config(&cfg),
        RuleChain::builtin().unwrap(),
    );
    let mut sink = HtmlSink::new();

    let verdict = pipeline.analyze("example.com", &mut sink).await;

    assert_eq!(
        verdict.cause,
        Some(ErrorCause::Transport {
            transport: TransportKind::Timeout
        })
    );
}

#[tokio::test]
async fn fast_backend_is_held_for_minimum_display() {
    let server = predict_server::start(PredictServerOptions::json(200, r#"{"result":"False"}"#));
    let pipeline = pipeline_for(&server.url, 300);
    let mut sink = HtmlSink::new();

    let started = Instant::now();
    pipeline.analyze("example.com", &mut sink).await;

    assert!(started.elapsed() >= Duration::from_millis(300));
}
