// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Startup supervision and index bootstrap tests.

use std::sync::Arc;
use std::time::Duration;

use axum::{
	body::Body,
	http::{Request, StatusCode},
};
use lexis_backend::{create_router, AppState, Bootstrapper, ConnectionState, Supervisor};
use lexis_search_engine::{InMemoryEngine, RetryConfig};
use lexis_server_config::{EngineConfig, EnvSource, ServiceConfigLayer};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INDEX: &str = "wikipedia_india";

fn supervisor(attempts: u32, delay: Duration) -> Supervisor {
	Supervisor::new(
		RetryConfig::fixed(attempts, delay),
		Bootstrapper::standard(INDEX),
	)
}

/// Purpose: running the bootstrapper twice leaves the index as the first
/// run did.
#[tokio::test]
async fn test_bootstrap_is_idempotent() {
	let engine = InMemoryEngine::new();
	let bootstrapper = Bootstrapper::standard(INDEX);

	let first = bootstrapper.ensure(&engine).await.unwrap();
	let second = bootstrapper.ensure(&engine).await.unwrap();

	assert!(first.created);
	assert!(!second.created);
	assert!(second.seeded.is_empty());
	assert_eq!(engine.index_creations(), 1);
	assert_eq!(engine.document_count(INDEX).await, 4);
}

/// Purpose: one rejected seed document does not stop the others.
#[tokio::test]
async fn test_seed_failure_is_isolated() {
	let engine = InMemoryEngine::new();
	engine.fail_document("para2").await;

	let report = Bootstrapper::standard(INDEX).ensure(&engine).await.unwrap();
	assert_eq!(report.seeded, ["para1", "para3", "para4"]);
	assert_eq!(report.failed, ["para2"]);
	assert_eq!(engine.document_count(INDEX).await, 3);
}

/// Purpose: transient probe failures consume attempts until one succeeds.
#[tokio::test]
async fn test_connects_after_transient_failures() {
	let engine = Arc::new(InMemoryEngine::new());
	engine.fail_next_pings(2);

	let connection = supervisor(5, Duration::from_millis(1))
		.establish(engine.clone())
		.await;

	assert_eq!(connection.state(), ConnectionState::Connected);
	assert_eq!(engine.document_count(INDEX).await, 4);
}

/// Purpose: an engine that never answers leaves the service disconnected
/// after exactly the configured number of probes.
#[tokio::test]
async fn test_exhausted_budget_disconnects() {
	let engine = Arc::new(InMemoryEngine::unreachable());

	let connection = supervisor(3, Duration::from_millis(1))
		.establish(engine.clone())
		.await;

	assert_eq!(connection.state(), ConnectionState::Disconnected);
	assert!(connection.engine().is_none());
	assert_eq!(engine.calls(), 3);
}

/// Purpose: the fixed delay is slept between attempts only.
#[tokio::test(start_paused = true)]
async fn test_delay_only_between_attempts() {
	let engine = Arc::new(InMemoryEngine::unreachable());
	let start = tokio::time::Instant::now();

	supervisor(5, Duration::from_secs(10))
		.establish(engine)
		.await;

	// Five attempts, four sleeps.
	let elapsed = start.elapsed();
	assert!(elapsed >= Duration::from_secs(40), "{elapsed:?}");
	assert!(elapsed < Duration::from_secs(50), "{elapsed:?}");
}

/// Purpose: an endpoint that is not a URL is fatal and never probed.
#[tokio::test]
async fn test_invalid_endpoint_is_not_retried() {
	let config = EngineConfig {
		url: "not a url".to_string(),
		connect_delay: Duration::from_secs(3600),
		..EngineConfig::default()
	};

	let connection = Supervisor::start(&config).await;
	assert_eq!(connection.state(), ConnectionState::Disconnected);
}

/// Purpose: a reachable engine that fails the index check leaves the
/// service degraded rather than disconnected.
#[tokio::test]
async fn test_bootstrap_abort_degrades() {
	let server = MockServer::start().await;
	Mock::given(method("HEAD"))
		.and(path("/"))
		.respond_with(ResponseTemplate::new(200))
		.mount(&server)
		.await;
	Mock::given(method("HEAD"))
		.and(path(format!("/{INDEX}")))
		.respond_with(ResponseTemplate::new(500))
		.mount(&server)
		.await;

	let config = EngineConfig {
		url: server.uri(),
		connect_attempts: 1,
		..EngineConfig::default()
	};
	let connection = Supervisor::start(&config).await;

	assert_eq!(connection.state(), ConnectionState::Degraded);
	assert!(connection.engine().is_some());
}

/// Purpose: against a fresh engine the REST client creates the index and
/// writes every seed document under its own id.
#[tokio::test]
async fn test_bootstrap_over_http() {
	let server = MockServer::start().await;
	Mock::given(method("HEAD"))
		.and(path("/"))
		.respond_with(ResponseTemplate::new(200))
		.mount(&server)
		.await;
	Mock::given(method("HEAD"))
		.and(path(format!("/{INDEX}")))
		.respond_with(ResponseTemplate::new(404))
		.mount(&server)
		.await;
	Mock::given(method("PUT"))
		.and(path(format!("/{INDEX}")))
		.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
			"acknowledged": true
		})))
		.expect(1)
		.mount(&server)
		.await;
	for id in ["para1", "para2", "para3", "para4"] {
		Mock::given(method("PUT"))
			.and(path(format!("/{INDEX}/_doc/{id}")))
			.respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
				"_id": id,
				"result": "created"
			})))
			.expect(1)
			.mount(&server)
			.await;
	}

	let config = EngineConfig {
		url: server.uri(),
		..EngineConfig::default()
	};
	let connection = Supervisor::start(&config).await;
	assert_eq!(connection.state(), ConnectionState::Connected);
}

/// Purpose: an engine address that is not a URL loads as configuration and
/// leaves a running service that answers 503 instead of stopping startup.
#[tokio::test]
async fn test_unparseable_engine_hosts_serve_unavailable() {
	let env = EnvSource::load_with(|name| match name {
		"ELASTICSEARCH_HOSTS" => Some("not a url".to_string()),
		_ => None,
	})
	.unwrap();
	let mut layer = ServiceConfigLayer::default();
	layer.merge(env);
	let config = lexis_server_config::finalize(layer).unwrap();

	let connection = Supervisor::start(&config.engine).await;
	assert_eq!(connection.state(), ConnectionState::Disconnected);

	let app = create_router(AppState::new(connection, config.engine.index.clone()));
	let request = Request::builder()
		.method("POST")
		.uri("/search")
		.header("content-type", "application/json")
		.body(Body::from(r#"{"query": "India"}"#))
		.unwrap();
	let response = app.oneshot(request).await.unwrap();
	assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

/// Purpose: `start` pings exactly as often as the config it was given
/// allows.
#[tokio::test]
async fn test_start_uses_configured_attempts() {
	let server = MockServer::start().await;
	Mock::given(method("HEAD"))
		.and(path("/"))
		.respond_with(ResponseTemplate::new(503))
		.expect(2)
		.mount(&server)
		.await;

	let config = EngineConfig {
		url: server.uri(),
		connect_attempts: 2,
		connect_delay: Duration::from_millis(1),
		..EngineConfig::default()
	};
	let connection = Supervisor::start(&config).await;

	assert_eq!(connection.state(), ConnectionState::Disconnected);
	server.verify().await;
}

/// Purpose: an engine that refuses the ping outright is not retried.
#[tokio::test]
async fn test_refused_ping_ends_supervision() {
	let server = MockServer::start().await;
	Mock::given(method("HEAD"))
		.and(path("/"))
		.respond_with(ResponseTemplate::new(403))
		.expect(1)
		.mount(&server)
		.await;

	let config = EngineConfig {
		url: server.uri(),
		connect_delay: Duration::from_secs(3600),
		..EngineConfig::default()
	};
	let connection = Supervisor::start(&config).await;

	assert_eq!(connection.state(), ConnectionState::Disconnected);
	server.verify().await;
}
