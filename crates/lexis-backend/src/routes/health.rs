// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Health HTTP handler.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
	api::AppState,
	health::{self, HealthResponse, HealthStatus},
	version,
};

/// GET /health - Engine reachability and startup state.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
	let engine = health::check_engine(&state.connection).await;
	let connection = state.connection.state();
	let status = health::overall_status(connection, &engine);

	let response = HealthResponse {
		status,
		connection,
		engine,
		index: state.index.to_string(),
		timestamp: chrono::Utc::now().to_rfc3339(),
		version: version::VERSION,
	};

	let http_status = match status {
		HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
		HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
	};

	(http_status, Json(response))
}
