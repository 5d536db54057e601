// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Elasticsearch REST client implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, error, instrument, trace, warn};
use url::Url;

use crate::error::EngineError;
use crate::types::{Document, IndexSchema, IndexedDocument, SearchHit};
use crate::SearchEngine;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the Elasticsearch REST API.
#[derive(Debug, Clone)]
pub struct EsClient {
	http_client: Client,
	base_url: Url,
	refresh_on_write: bool,
}

#[derive(Debug, Deserialize)]
struct EsSearchResponse {
	hits: EsHits,
}

#[derive(Debug, Deserialize)]
struct EsHits {
	#[serde(default)]
	hits: Vec<EsHit>,
}

#[derive(Debug, Deserialize)]
struct EsHit {
	#[serde(rename = "_id")]
	id: String,
	#[serde(rename = "_score")]
	score: Option<f64>,
	#[serde(rename = "_source")]
	source: Document,
}

impl EsClient {
	/// Creates a client for the engine at `base_url`.
	///
	/// Fails with [`EngineError::InvalidConfig`] when the URL is not an
	/// absolute http(s) URL.
	pub fn new(base_url: &str) -> Result<Self, EngineError> {
		Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
	}

	pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, EngineError> {
		let base_url = Url::parse(base_url)
			.map_err(|e| EngineError::InvalidConfig(format!("'{base_url}' is not a valid URL: {e}")))?;

		if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
			return Err(EngineError::InvalidConfig(format!(
				"'{base_url}' must be an http or https URL"
			)));
		}

		let http_client = lexis_common_http::new_client_with_timeout(timeout)
			.map_err(|e| EngineError::InvalidConfig(format!("failed to build HTTP client: {e}")))?;

		Ok(Self {
			http_client,
			base_url,
			refresh_on_write: false,
		})
	}

	/// Makes writes visible to search before they are acknowledged.
	pub fn with_refresh_on_write(mut self, refresh: bool) -> Self {
		self.refresh_on_write = refresh;
		self
	}

	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	fn url(&self, segments: &[&str]) -> Url {
		let mut url = self.base_url.clone();
		if let Ok(mut path) = url.path_segments_mut() {
			path.pop_if_empty().extend(segments);
		}
		url
	}

	async fn send(&self, request: RequestBuilder) -> Result<Response, EngineError> {
		request.send().await.map_err(|e| {
			if e.is_timeout() {
				warn!("Engine request timed out");
				return EngineError::Timeout;
			}
			debug!(error = %e, "Network error during engine request");
			EngineError::Network(e)
		})
	}

	async fn read_json<T: for<'de> Deserialize<'de>>(response: Response) -> Result<T, EngineError> {
		let body = response.text().await.map_err(|e| {
			error!(error = %e, "Failed to read engine response body");
			EngineError::Network(e)
		})?;

		trace!(body = %body, "Engine response body");

		serde_json::from_str(&body).map_err(|e| {
			error!(error = %e, "Failed to parse engine response");
			EngineError::InvalidResponse(format!("JSON parse error: {e}"))
		})
	}
}

/// Turns a non-success engine response into an [`EngineError`].
async fn error_from_response(index: &str, response: Response) -> EngineError {
	let status = response.status();
	let body = response.text().await.unwrap_or_default();
	classify_error(index, status, &body)
}

fn classify_error(index: &str, status: StatusCode, body: &str) -> EngineError {
	let parsed: Option<Value> = serde_json::from_str(body).ok();
	let error = parsed.as_ref().and_then(|v| v.get("error"));

	let kind = error
		.and_then(|e| e.get("type"))
		.and_then(Value::as_str)
		.unwrap_or("unknown")
		.to_string();
	let reason = error
		.and_then(|e| e.get("reason").and_then(Value::as_str).or_else(|| e.as_str()))
		.map(str::to_string)
		.unwrap_or_else(|| body.to_string());

	match status.as_u16() {
		404 => EngineError::IndexNotFound {
			index: index.to_string(),
		},
		400 => EngineError::Rejected {
			status: 400,
			kind,
			reason,
		},
		code => EngineError::Api {
			status: code,
			message: reason,
		},
	}
}

#[async_trait]
impl SearchEngine for EsClient {
	#[instrument(skip(self), fields(url = %self.base_url))]
	async fn ping(&self) -> Result<(), EngineError> {
		let response = self.send(self.http_client.head(self.base_url.clone())).await?;
		let status = response.status();
		if status.is_success() {
			debug!("Engine answered ping");
			Ok(())
		} else if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
			warn!(status = %status, "Engine ping returned non-success status");
			Err(EngineError::Unavailable {
				status: status.as_u16(),
			})
		} else {
			// Auth or routing problems do not fix themselves between attempts.
			warn!(status = %status, "Engine refused ping");
			Err(EngineError::Api {
				status: status.as_u16(),
				message: format!("ping refused with status {status}"),
			})
		}
	}

	#[instrument(skip(self))]
	async fn index_exists(&self, index: &str) -> Result<bool, EngineError> {
		let response = self.send(self.http_client.head(self.url(&[index]))).await?;
		match response.status() {
			StatusCode::NOT_FOUND => Ok(false),
			status if status.is_success() => Ok(true),
			_ => Err(error_from_response(index, response).await),
		}
	}

	#[instrument(skip(self, schema))]
	async fn create_index(&self, index: &str, schema: &IndexSchema) -> Result<(), EngineError> {
		let response = self
			.send(
				self
					.http_client
					.put(self.url(&[index]))
					.json(&schema.to_create_body()),
			)
			.await?;

		if !response.status().is_success() {
			return Err(error_from_response(index, response).await);
		}

		debug!(index = %index, "Index created");
		Ok(())
	}

	#[instrument(skip(self, document))]
	async fn index_document(
		&self,
		index: &str,
		id: Option<&str>,
		document: &Document,
	) -> Result<IndexedDocument, EngineError> {
		let request = match id {
			Some(id) => self.http_client.put(self.url(&[index, "_doc", id])),
			None => self.http_client.post(self.url(&[index, "_doc"])),
		};
		let request = if self.refresh_on_write {
			request.query(&[("refresh", "wait_for")])
		} else {
			request
		};

		let response = self.send(request.json(document)).await?;
		if !response.status().is_success() {
			return Err(error_from_response(index, response).await);
		}

		let ack: IndexedDocument = Self::read_json(response).await?;
		debug!(index = %index, id = ?ack.id, result = ?ack.result, "Document indexed");
		Ok(ack)
	}

	#[instrument(skip(self))]
	async fn search_match(
		&self,
		index: &str,
		field: &str,
		query: &str,
		size: usize,
	) -> Result<Vec<SearchHit>, EngineError> {
		let body = json!({
			"query": { "match": { field: query } },
			"size": size,
		});

		let response = self
			.send(
				self
					.http_client
					.post(self.url(&[index, "_search"]))
					.json(&body),
			)
			.await?;
		if !response.status().is_success() {
			return Err(error_from_response(index, response).await);
		}

		let parsed: EsSearchResponse = Self::read_json(response).await?;
		let hits: Vec<SearchHit> = parsed
			.hits
			.hits
			.into_iter()
			.map(|hit| SearchHit {
				id: hit.id,
				score: hit.score.unwrap_or_default(),
				text: hit.source.text,
			})
			.collect();

		debug!(hit_count = hits.len(), "Search completed");
		Ok(hits)
	}
}
