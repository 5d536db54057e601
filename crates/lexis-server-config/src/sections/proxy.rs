// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Frontend-to-backend proxy configuration section.

use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_BACKEND_URL: &str = "http://backend:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct ProxyConfig {
	pub backend_url: String,
	pub timeout: Duration,
}

impl Default for ProxyConfig {
	fn default() -> Self {
		ProxyConfigLayer::default().finalize()
	}
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ProxyConfigLayer {
	#[serde(default)]
	pub backend_url: Option<String>,
	#[serde(default)]
	pub timeout_secs: Option<u64>,
}

impl ProxyConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.backend_url.is_some() {
			self.backend_url = other.backend_url;
		}
		if other.timeout_secs.is_some() {
			self.timeout_secs = other.timeout_secs;
		}
	}

	pub fn finalize(self) -> ProxyConfig {
		ProxyConfig {
			backend_url: self
				.backend_url
				.map(|u| u.trim_end_matches('/').to_string())
				.unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
			timeout: Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
		}
	}
}
