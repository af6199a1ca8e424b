//! Integration tests for the runtime version probe
//!
//! A wiremock server stands in for the runtime. `expect(n)` on each mock
//! checks how many requests the probe actually sent, so these tests also
//! cover "no version request after a failed liveness check" and "no caching".

use runtime_probe::metrics::Metrics;
use runtime_probe::runtime::{
    ProbeTimeouts, RuntimeEndpoint, VersionOutcome, VersionProbe, VersionSource, runtime_version,
};
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn tags_body() -> serde_json::Value {
    serde_json::json!({
        "models": [
            {"name": "llama3:8b", "model": "llama3:8b", "size": 4661224676u64}
        ]
    })
}

async fn mount_liveness(server: &MockServer, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tags_body()))
        .expect(expected_calls)
        .mount(server)
        .await;
}

async fn mount_version(server: &MockServer, response: ResponseTemplate, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/api/version"))
        .respond_with(response)
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn probe_for(server: &MockServer) -> VersionProbe {
    let endpoint = RuntimeEndpoint::new(&server.uri()).expect("mock uri should be valid");
    VersionProbe::new(endpoint).expect("client should build")
}

/// Address with nothing listening on it
fn refused_endpoint() -> RuntimeEndpoint {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("should bind");
    let port = listener.local_addr().expect("should have addr").port();
    drop(listener);
    RuntimeEndpoint::new(&format!("http://127.0.0.1:{}", port)).expect("valid endpoint")
}

#[tokio::test]
async fn test_probe_returns_reported_version() {
    let server = MockServer::start().await;
    mount_liveness(&server, 1).await;
    mount_version(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"version": "0.1.2"})),
        1,
    )
    .await;

    let version = probe_for(&server).runtime_version().await;

    assert_eq!(version.as_deref(), Some("0.1.2"));
}

#[tokio::test]
async fn test_probe_outcome_is_version_variant() {
    let server = MockServer::start().await;
    mount_liveness(&server, 1).await;
    mount_version(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"version": "0.12.6"})),
        1,
    )
    .await;

    let outcome = probe_for(&server).probe_outcome().await;

    assert_eq!(outcome, VersionOutcome::Version("0.12.6".to_string()));
}

#[tokio::test]
async fn test_version_endpoint_timeout_yields_none() {
    let server = MockServer::start().await;
    mount_liveness(&server, 1).await;
    mount_version(
        &server,
        ResponseTemplate::new(200)
            .set_delay(Duration::from_secs(3))
            .set_body_json(serde_json::json!({"version": "0.1.2"})),
        1,
    )
    .await;

    let endpoint = RuntimeEndpoint::new(&server.uri()).unwrap();
    let timeouts = ProbeTimeouts::new(Duration::from_secs(2), Duration::from_millis(200));
    let probe = VersionProbe::with_timeouts(endpoint, timeouts).unwrap();

    let start = Instant::now();
    let outcome = probe.probe_outcome().await;
    let elapsed = start.elapsed();

    assert!(
        matches!(outcome, VersionOutcome::NoVersion { ref reason } if reason.contains("timed out")),
        "expected timeout NoVersion, got: {:?}",
        outcome
    );
    assert!(
        elapsed < Duration::from_secs(2),
        "probe should give up at the version timeout, took {:?}",
        elapsed
    );
}

#[tokio::test]
async fn test_default_version_timeout_is_two_seconds() {
    let server = MockServer::start().await;
    mount_liveness(&server, 1).await;
    mount_version(
        &server,
        ResponseTemplate::new(200)
            .set_delay(Duration::from_secs(5))
            .set_body_json(serde_json::json!({"version": "0.1.2"})),
        1,
    )
    .await;

    let start = Instant::now();
    let version = probe_for(&server).runtime_version().await;
    let elapsed = start.elapsed();

    assert_eq!(version, None);
    assert!(
        elapsed >= Duration::from_millis(1900) && elapsed < Duration::from_secs(4),
        "expected ~2s timeout, took {:?}",
        elapsed
    );
}

#[tokio::test]
async fn test_unreachable_runtime_yields_none() {
    let probe = VersionProbe::new(refused_endpoint()).unwrap();

    let outcome = probe.probe_outcome().await;

    assert!(!outcome.is_reachable(), "got: {:?}", outcome);
    assert_eq!(outcome.into_version(), None);
}

#[tokio::test]
async fn test_unreachable_reason_names_connection_refused() {
    let probe = VersionProbe::new(refused_endpoint()).unwrap();

    let outcome = probe.probe_outcome().await;

    // The OS-level cause must survive, not just reqwest's "error sending request"
    match outcome {
        VersionOutcome::Unreachable { reason } => assert!(
            reason.to_lowercase().contains("connection refused"),
            "reason should name the refusal, got: {}",
            reason
        ),
        other => panic!("expected Unreachable, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_failed_liveness_skips_version_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;
    mount_version(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"version": "0.1.2"})),
        0,
    )
    .await;

    let outcome = probe_for(&server).probe_outcome().await;

    assert!(
        matches!(outcome, VersionOutcome::Unreachable { ref reason } if reason.contains("503")),
        "got: {:?}",
        outcome
    );
}

#[tokio::test]
async fn test_liveness_with_unexpected_body_is_unreachable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not a runtime</html>"))
        .expect(1)
        .mount(&server)
        .await;
    mount_version(&server, ResponseTemplate::new(200), 0).await;

    let outcome = probe_for(&server).probe_outcome().await;

    assert_eq!(outcome.label(), "unreachable");
}

#[tokio::test]
async fn test_missing_version_field_yields_none() {
    let server = MockServer::start().await;
    mount_liveness(&server, 1).await;
    mount_version(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "ok"})),
        1,
    )
    .await;

    let outcome = probe_for(&server).probe_outcome().await;

    assert!(outcome.is_reachable());
    assert_eq!(outcome.label(), "no_version");
    assert_eq!(outcome.into_version(), None);
}

#[tokio::test]
async fn test_non_string_version_field_yields_none() {
    let server = MockServer::start().await;
    mount_liveness(&server, 1).await;
    mount_version(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"version": 12})),
        1,
    )
    .await;

    assert_eq!(probe_for(&server).runtime_version().await, None);
}

#[tokio::test]
async fn test_version_endpoint_not_found_yields_none() {
    let server = MockServer::start().await;
    mount_liveness(&server, 1).await;
    mount_version(&server, ResponseTemplate::new(404), 1).await;

    let outcome = probe_for(&server).probe_outcome().await;

    assert!(
        matches!(outcome, VersionOutcome::NoVersion { ref reason } if reason.contains("404")),
        "got: {:?}",
        outcome
    );
}

#[tokio::test]
async fn test_non_json_version_body_yields_none() {
    let server = MockServer::start().await;
    mount_liveness(&server, 1).await;
    mount_version(&server, ResponseTemplate::new(200).set_body_string("0.1.2"), 1).await;

    // A bare "0.1.2" is not valid JSON
    assert_eq!(probe_for(&server).runtime_version().await, None);
}

#[tokio::test]
async fn test_repeated_probes_are_live_and_consistent() {
    let server = MockServer::start().await;
    mount_liveness(&server, 3).await;
    mount_version(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"version": "0.3.0"})),
        3,
    )
    .await;

    let probe = probe_for(&server);
    for _ in 0..3 {
        assert_eq!(probe.runtime_version().await.as_deref(), Some("0.3.0"));
    }
}

#[tokio::test]
async fn test_probe_records_outcome_metrics() {
    let server = MockServer::start().await;
    mount_liveness(&server, 2).await;
    mount_version(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"version": "0.1.2"})),
        2,
    )
    .await;

    let metrics = Metrics::new().unwrap();
    let probe = probe_for(&server).with_metrics(metrics.clone());
    probe.runtime_version().await;
    probe.runtime_version().await;

    let unreachable = VersionProbe::new(refused_endpoint())
        .unwrap()
        .with_metrics(metrics.clone());
    unreachable.runtime_version().await;

    assert_eq!(metrics.probe_count("version"), 2);
    assert_eq!(metrics.probe_count("unreachable"), 1);
    assert_eq!(metrics.probe_count("no_version"), 0);
}

#[tokio::test]
async fn test_one_shot_runtime_version() {
    let server = MockServer::start().await;
    mount_liveness(&server, 1).await;
    mount_version(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"version": "0.1.2"})),
        1,
    )
    .await;

    let endpoint = RuntimeEndpoint::new(&format!("{}/", server.uri())).unwrap();
    assert_eq!(runtime_version(&endpoint).await.as_deref(), Some("0.1.2"));
}
