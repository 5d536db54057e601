// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Router-level tests for the search and insert API.

use std::sync::Arc;

use axum::{
	body::Body,
	http::{Request, StatusCode},
	Router,
};
use lexis_backend::{create_router, AppState, Bootstrapper, EngineConnection};
use lexis_search_engine::{EngineError, EsClient, IndexSchema, InMemoryEngine, SearchEngine};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INDEX: &str = "wikipedia_india";

async fn seeded_engine() -> Arc<InMemoryEngine> {
	let engine = Arc::new(InMemoryEngine::new());
	Bootstrapper::standard(INDEX)
		.ensure(engine.as_ref())
		.await
		.unwrap();
	engine
}

fn app_for(connection: EngineConnection) -> Router {
	create_router(AppState::new(connection, INDEX))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
	let response = app.oneshot(request).await.unwrap();
	let status = response.status();
	let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
	(status, body)
}

async fn post(app: Router, path: &str, body: &str) -> (StatusCode, Value) {
	let request = Request::builder()
		.method("POST")
		.uri(path)
		.header("content-type", "application/json")
		.body(Body::from(body.to_string()))
		.unwrap();
	send(app, request).await
}

async fn get(app: Router, path: &str) -> (StatusCode, Value) {
	let request = Request::builder().uri(path).body(Body::empty()).unwrap();
	send(app, request).await
}

/// Purpose: the root endpoint answers without touching the engine.
#[tokio::test]
async fn test_root_reports_running() {
	let (status, body) = get(app_for(EngineConnection::disconnected()), "/").await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["message"], "Backend is running");
}

/// Purpose: searching the seeded corpus for "India" returns one of the
/// paragraphs mentioning it, with a positive score.
#[tokio::test]
async fn test_search_seeded_corpus() {
	let engine = seeded_engine().await;
	let app = app_for(EngineConnection::connected(engine));

	let (status, body) = post(app, "/search", r#"{"query": "India"}"#).await;
	assert_eq!(status, StatusCode::OK);
	let id = body["id"].as_str().unwrap();
	assert!(["para1", "para2", "para4"].contains(&id), "got {id}");
	assert!(body["score"].as_f64().unwrap() > 0.0);
	assert!(body["text"].as_str().unwrap().contains("India"));
}

/// Purpose: no match is a 200 with an explicit message, not an error.
#[tokio::test]
async fn test_search_empty_index_returns_message() {
	let engine = Arc::new(InMemoryEngine::new());
	engine.create_index(INDEX, &IndexSchema::new()).await.unwrap();
	let app = app_for(EngineConnection::connected(engine));

	let (status, body) = post(app, "/search", r#"{"query": "anything"}"#).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["message"], "No documents found");
}

/// Purpose: an inserted document is the top hit of an immediate search for
/// its text.
#[tokio::test]
async fn test_insert_then_search_finds_document() {
	let engine = seeded_engine().await;
	let app = app_for(EngineConnection::connected(engine));

	let (status, inserted) = post(app.clone(), "/insert", r#"{"text": "test"}"#).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(inserted["message"], "Document inserted successfully");
	let id = inserted["id"].as_str().unwrap();
	assert!(!id.is_empty());

	let (status, found) = post(app, "/search", r#"{"query": "test"}"#).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(found["id"], id);
	assert_eq!(found["text"], "test");
}

/// Purpose: missing, empty or null fields are rejected before any engine
/// call, liveness probe included.
#[tokio::test]
async fn test_validation_precedes_engine_calls() {
	let engine = seeded_engine().await;
	let before = engine.calls();
	let app = app_for(EngineConnection::connected(engine.clone()));

	for (path, body) in [
		("/search", r#"{}"#),
		("/search", r#"{"query": ""}"#),
		("/search", r#"{"query": null}"#),
		("/insert", r#"{}"#),
		("/insert", r#"{"text": ""}"#),
	] {
		let (status, response) = post(app.clone(), path, body).await;
		assert_eq!(status, StatusCode::BAD_REQUEST, "{path} {body}");
		assert_eq!(response["error"], "bad_request");
	}
	assert_eq!(engine.calls(), before);
}

/// Purpose: validation still wins over a disconnected engine.
#[tokio::test]
async fn test_validation_precedes_unavailability() {
	let app = app_for(EngineConnection::disconnected());
	let (status, body) = post(app, "/search", r#"{"query": ""}"#).await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["message"], "Missing 'query' in request body");
}

/// Purpose: with no engine connection every valid request is a 503.
#[tokio::test]
async fn test_disconnected_returns_service_unavailable() {
	let app = app_for(EngineConnection::disconnected());

	let (status, body) = post(app.clone(), "/search", r#"{"query": "India"}"#).await;
	assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
	assert_eq!(body["error"], "service_unavailable");
	assert_eq!(body["message"], "Elasticsearch service unavailable");

	let (status, _) = post(app, "/insert", r#"{"text": "hello"}"#).await;
	assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

/// Purpose: a failing per-request probe yields 503 even when startup
/// succeeded.
#[tokio::test]
async fn test_failed_probe_returns_service_unavailable() {
	let engine = seeded_engine().await;
	engine.set_reachable(false);
	let app = app_for(EngineConnection::connected(engine));

	let (status, _) = post(app, "/search", r#"{"query": "India"}"#).await;
	assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

/// Purpose: a missing index maps to 404 on both operations.
#[tokio::test]
async fn test_missing_index_returns_not_found() {
	let engine = Arc::new(InMemoryEngine::new());
	let app = app_for(EngineConnection::degraded(engine));

	let (status, body) = post(app.clone(), "/search", r#"{"query": "India"}"#).await;
	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(body["error"], "not_found");
	assert_eq!(
		body["message"],
		"Index 'wikipedia_india' not found. Backend setup might have failed."
	);

	let (status, _) = post(app, "/insert", r#"{"text": "hello"}"#).await;
	assert_eq!(status, StatusCode::NOT_FOUND);
}

/// Purpose: an engine rejection surfaces its reason; other failures stay
/// generic.
#[tokio::test]
async fn test_engine_failures_map_to_500() {
	let engine = seeded_engine().await;
	let app = app_for(EngineConnection::connected(engine.clone()));

	engine
		.fail_next_search(EngineError::Rejected {
			status: 400,
			kind: "query_shard_exception".into(),
			reason: "failed to create query".into(),
		})
		.await;
	let (status, body) = post(app.clone(), "/search", r#"{"query": "India"}"#).await;
	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(body["error"], "engine_error");
	assert_eq!(body["message"], "Search error: failed to create query");

	engine.fail_next_search(EngineError::Timeout).await;
	let (status, body) = post(app, "/search", r#"{"query": "India"}"#).await;
	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(body["error"], "internal_error");
	assert_eq!(body["message"], "Internal server error during search");
}

/// Purpose: a body that is not a JSON object is an unclassified failure.
#[tokio::test]
async fn test_malformed_json_returns_500() {
	let engine = seeded_engine().await;
	let app = app_for(EngineConnection::connected(engine));

	let (status, body) = post(app.clone(), "/search", "not json").await;
	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(body["error"], "internal_error");

	let (status, body) = post(app, "/insert", "[1, 2]").await;
	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(body["message"], "Internal server error during insert");
}

/// Purpose: health reflects both the startup state and a fresh probe.
#[tokio::test]
async fn test_health_endpoint() {
	let engine = seeded_engine().await;
	let (status, body) = get(app_for(EngineConnection::connected(engine.clone())), "/health").await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["status"], "healthy");
	assert_eq!(body["connection"], "connected");
	assert_eq!(body["engine"]["reachable"], true);
	assert_eq!(body["index"], INDEX);

	let (status, body) = get(app_for(EngineConnection::degraded(engine.clone())), "/health").await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["status"], "degraded");

	let (status, body) = get(app_for(EngineConnection::disconnected()), "/health").await;
	assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
	assert_eq!(body["status"], "unhealthy");
	assert_eq!(body["connection"], "disconnected");
}

/// Purpose: an engine acknowledgement without an id still counts as a
/// successful insert, reported with the placeholder id.
#[tokio::test]
async fn test_insert_without_engine_id_reports_placeholder() {
	let server = MockServer::start().await;
	Mock::given(method("HEAD"))
		.and(path("/"))
		.respond_with(ResponseTemplate::new(200))
		.mount(&server)
		.await;
	Mock::given(method("POST"))
		.and(path(format!("/{INDEX}/_doc")))
		.and(body_json(json!({ "text": "hello" })))
		.respond_with(ResponseTemplate::new(201).set_body_json(json!({ "result": "created" })))
		.expect(1)
		.mount(&server)
		.await;

	let engine = Arc::new(EsClient::new(&server.uri()).unwrap());
	let app = app_for(EngineConnection::connected(engine));

	let (status, body) = post(app, "/insert", r#"{"text": "hello"}"#).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["message"], "Document inserted successfully");
	assert_eq!(body["id"], "N/A");
}
