// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Health check types and engine probing.

use std::time::Duration;

use serde::Serialize;
use tokio::time::{timeout, Instant};

use crate::connection::{ConnectionState, EngineConnection};

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
	Healthy,
	Degraded,
	Unhealthy,
}

#[derive(Debug, Serialize)]
pub struct EngineHealth {
	pub reachable: bool,
	pub latency_ms: u64,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
	pub status: HealthStatus,
	pub connection: ConnectionState,
	pub engine: EngineHealth,
	pub index: String,
	pub timestamp: String,
	pub version: &'static str,
}

/// Pings the engine behind `connection`, bounded by a short timeout.
pub async fn check_engine(connection: &EngineConnection) -> EngineHealth {
	let start = Instant::now();
	let Some(engine) = connection.engine() else {
		return EngineHealth {
			reachable: false,
			latency_ms: 0,
			error: Some("not connected".to_string()),
		};
	};

	let error = match timeout(PROBE_TIMEOUT, engine.ping()).await {
		Ok(Ok(())) => None,
		Ok(Err(e)) => Some(e.to_string()),
		Err(_) => Some(format!("timed out after {}s", PROBE_TIMEOUT.as_secs())),
	};

	EngineHealth {
		reachable: error.is_none(),
		latency_ms: start.elapsed().as_millis() as u64,
		error,
	}
}

/// Overall status from the startup state and a fresh probe.
pub fn overall_status(state: ConnectionState, engine: &EngineHealth) -> HealthStatus {
	match (state, engine.reachable) {
		(ConnectionState::Connected, true) => HealthStatus::Healthy,
		(ConnectionState::Degraded, true) => HealthStatus::Degraded,
		_ => HealthStatus::Unhealthy,
	}
}
