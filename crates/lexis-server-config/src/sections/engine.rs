// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Search engine connection configuration section.

use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_ENGINE_URL: &str = "http://elasticsearch:9200";
pub const DEFAULT_INDEX: &str = "wikipedia_india";
const DEFAULT_CONNECT_ATTEMPTS: u32 = 5;
const DEFAULT_CONNECT_DELAY_SECS: u64 = 10;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Engine configuration (runtime, fully resolved).
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
	/// Base URL of the engine's REST API.
	pub url: String,
	/// Index the backend searches and writes into.
	pub index: String,
	/// Liveness probes attempted at startup before giving up.
	pub connect_attempts: u32,
	/// Fixed pause between two startup probes.
	pub connect_delay: Duration,
	pub request_timeout: Duration,
	/// Ask the engine to make writes visible to search before acknowledging.
	pub refresh_on_write: bool,
}

impl Default for EngineConfig {
	fn default() -> Self {
		EngineConfigLayer::default().finalize()
	}
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct EngineConfigLayer {
	#[serde(default)]
	pub url: Option<String>,
	#[serde(default)]
	pub index: Option<String>,
	#[serde(default)]
	pub connect_attempts: Option<u32>,
	#[serde(default)]
	pub connect_delay_secs: Option<u64>,
	#[serde(default)]
	pub request_timeout_secs: Option<u64>,
	#[serde(default)]
	pub refresh_on_write: Option<bool>,
}

impl EngineConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.url.is_some() {
			self.url = other.url;
		}
		if other.index.is_some() {
			self.index = other.index;
		}
		if other.connect_attempts.is_some() {
			self.connect_attempts = other.connect_attempts;
		}
		if other.connect_delay_secs.is_some() {
			self.connect_delay_secs = other.connect_delay_secs;
		}
		if other.request_timeout_secs.is_some() {
			self.request_timeout_secs = other.request_timeout_secs;
		}
		if other.refresh_on_write.is_some() {
			self.refresh_on_write = other.refresh_on_write;
		}
	}

	pub fn finalize(self) -> EngineConfig {
		EngineConfig {
			url: self.url.unwrap_or_else(|| DEFAULT_ENGINE_URL.to_string()),
			index: self.index.unwrap_or_else(|| DEFAULT_INDEX.to_string()),
			connect_attempts: self.connect_attempts.unwrap_or(DEFAULT_CONNECT_ATTEMPTS),
			connect_delay: Duration::from_secs(
				self.connect_delay_secs.unwrap_or(DEFAULT_CONNECT_DELAY_SECS),
			),
			request_timeout: Duration::from_secs(
				self
					.request_timeout_secs
					.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
			),
			refresh_on_write: self.refresh_on_write.unwrap_or(true),
		}
	}
}

/// Picks the engine URL out of an `ELASTICSEARCH_HOSTS`-style value.
///
/// The value may be a comma-separated host list; the first non-empty entry
/// wins.
pub fn first_host(hosts: &str) -> Option<String> {
	hosts
		.split(',')
		.map(str::trim)
		.find(|h| !h.is_empty())
		.map(str::to_string)
}
