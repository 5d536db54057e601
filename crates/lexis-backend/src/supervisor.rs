// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Startup connection supervision.
//!
//! The supervisor probes the engine with a fixed retry budget, then runs the
//! index bootstrap. It finishes before the HTTP listener is bound, and the
//! resulting [`EngineConnection`] never changes afterwards.

use std::sync::Arc;

use lexis_common_http::{retry, RetryConfig};
use lexis_search_engine::{EsClient, SearchEngine};
use lexis_server_config::EngineConfig;
use tracing::{error, info, warn};

use crate::bootstrap::Bootstrapper;
use crate::connection::EngineConnection;

#[derive(Debug, Clone)]
pub struct Supervisor {
	retry: RetryConfig,
	bootstrapper: Bootstrapper,
}

impl Supervisor {
	pub fn new(retry: RetryConfig, bootstrapper: Bootstrapper) -> Self {
		Self { retry, bootstrapper }
	}

	pub fn from_config(config: &EngineConfig) -> Self {
		Self::new(
			RetryConfig::fixed(config.connect_attempts, config.connect_delay),
			Bootstrapper::standard(config.index.clone()),
		)
	}

	/// Builds the REST client for `config` and supervises it with the retry
	/// budget and index from the same config.
	///
	/// An endpoint that cannot be turned into a client is not retried.
	pub async fn start(config: &EngineConfig) -> EngineConnection {
		let client = match EsClient::with_timeout(&config.url, config.request_timeout) {
			Ok(client) => client.with_refresh_on_write(config.refresh_on_write),
			Err(e) => {
				error!(url = %config.url, error = %e, "Cannot build search engine client");
				return EngineConnection::disconnected();
			}
		};
		info!(url = %client.base_url(), "Connecting to search engine");
		Self::from_config(config).establish(Arc::new(client)).await
	}

	/// Probes `engine` until it answers or the budget runs out, then
	/// bootstraps the index.
	pub async fn establish(&self, engine: Arc<dyn SearchEngine>) -> EngineConnection {
		if let Err(e) = retry(&self.retry, || engine.ping()).await {
			error!(
				attempts = self.retry.max_attempts,
				error = %e,
				"Could not connect to search engine"
			);
			return EngineConnection::disconnected();
		}
		info!("Successfully connected to search engine");

		match self.bootstrapper.ensure(engine.as_ref()).await {
			Ok(report) => {
				info!(
					index = %self.bootstrapper.index(),
					created = report.created,
					seeded = report.seeded.len(),
					failed = report.failed.len(),
					"Index bootstrap finished"
				);
				EngineConnection::connected(engine)
			}
			Err(e) => {
				warn!(
					index = %self.bootstrapper.index(),
					error = %e,
					"Index bootstrap aborted; serving in degraded mode"
				);
				EngineConnection::degraded(engine)
			}
		}
	}
}
