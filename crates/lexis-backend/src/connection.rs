// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Process-wide engine connection established at startup.

use std::fmt;
use std::sync::Arc;

use lexis_search_engine::SearchEngine;
use serde::Serialize;

use crate::error::ServerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
	/// No probe succeeded; no engine handle is held.
	Disconnected,
	/// Probe and index bootstrap both succeeded.
	Connected,
	/// Probe succeeded but the index bootstrap aborted.
	Degraded,
}

/// The engine handle together with how the supervisor left it.
///
/// Read-only once built; handlers share it through [`crate::api::AppState`].
#[derive(Clone)]
pub struct EngineConnection {
	state: ConnectionState,
	engine: Option<Arc<dyn SearchEngine>>,
}

impl EngineConnection {
	pub fn connected(engine: Arc<dyn SearchEngine>) -> Self {
		Self {
			state: ConnectionState::Connected,
			engine: Some(engine),
		}
	}

	pub fn degraded(engine: Arc<dyn SearchEngine>) -> Self {
		Self {
			state: ConnectionState::Degraded,
			engine: Some(engine),
		}
	}

	pub fn disconnected() -> Self {
		Self {
			state: ConnectionState::Disconnected,
			engine: None,
		}
	}

	pub fn state(&self) -> ConnectionState {
		self.state
	}

	pub fn engine(&self) -> Option<&Arc<dyn SearchEngine>> {
		self.engine.as_ref()
	}

	/// Returns the engine if it answers a fresh liveness probe.
	pub async fn live(&self) -> Result<Arc<dyn SearchEngine>, ServerError> {
		let engine = self.engine.as_ref().ok_or_else(ServerError::engine_unavailable)?;
		if let Err(e) = engine.ping().await {
			tracing::warn!(error = %e, "liveness probe failed");
			return Err(ServerError::engine_unavailable());
		}
		Ok(Arc::clone(engine))
	}
}

impl fmt::Debug for EngineConnection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("EngineConnection")
			.field("state", &self.state)
			.field("has_engine", &self.engine.is_some())
			.finish()
	}
}
