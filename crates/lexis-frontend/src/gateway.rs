// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! HTTP client for the backend tier.
//!
//! Each call is a single forwarded attempt. Whatever status the backend
//! answers with is handed back to the caller together with its JSON body.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

#[derive(Debug, Error)]
pub enum GatewayError {
	/// The configured backend address is not an http(s) URL.
	#[error("Invalid backend URL '{url}': {reason}")]
	InvalidUrl { url: String, reason: String },

	/// The HTTP client could not be built.
	#[error("Failed to build HTTP client: {0}")]
	Client(#[source] reqwest::Error),

	/// Connection refused, timeout, DNS failure and the like.
	#[error("{0}")]
	Transport(#[source] reqwest::Error),

	/// The backend answered with something that is not JSON.
	#[error("unreadable backend response: {0}")]
	UnreadableBody(String),
}

/// A backend answer, passed through as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendReply {
	pub status: StatusCode,
	pub body: Value,
}

#[derive(Debug, Clone)]
pub struct BackendClient {
	http_client: Client,
	base_url: Url,
}

impl BackendClient {
	pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
		let invalid = |reason: String| GatewayError::InvalidUrl {
			url: base_url.to_string(),
			reason,
		};
		let base_url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
		if !matches!(base_url.scheme(), "http" | "https") {
			return Err(invalid(format!("unsupported scheme '{}'", base_url.scheme())));
		}

		let http_client =
			lexis_common_http::new_client_with_timeout(timeout).map_err(GatewayError::Client)?;
		Ok(Self {
			http_client,
			base_url,
		})
	}

	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Forwards `{"query": query}` to the backend search endpoint.
	pub async fn forward_search(&self, query: Value) -> Result<BackendReply, GatewayError> {
		self.forward("search", json!({ "query": query })).await
	}

	/// Forwards `{"text": text}` to the backend insert endpoint.
	pub async fn forward_insert(&self, text: Value) -> Result<BackendReply, GatewayError> {
		self.forward("insert", json!({ "text": text })).await
	}

	#[instrument(skip(self, body), fields(backend = %self.base_url))]
	async fn forward(&self, endpoint: &str, body: Value) -> Result<BackendReply, GatewayError> {
		let mut url = self.base_url.clone();
		if let Ok(mut path) = url.path_segments_mut() {
			path.pop_if_empty().push(endpoint);
		}

		let response = self
			.http_client
			.post(url)
			.json(&body)
			.send()
			.await
			.map_err(GatewayError::Transport)?;

		let status = response.status();
		let bytes = response.bytes().await.map_err(GatewayError::Transport)?;
		let body = serde_json::from_slice(&bytes)
			.map_err(|e| GatewayError::UnreadableBody(e.to_string()))?;

		debug!(status = %status, "Backend replied");
		Ok(BackendReply { status, body })
	}
}
