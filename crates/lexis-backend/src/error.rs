// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Server error types and HTTP response conversions.

use std::fmt;

use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use lexis_search_engine::EngineError;
use serde::{Deserialize, Serialize};

/// The document operation a failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
	Search,
	Insert,
}

impl Operation {
	fn title(&self) -> &'static str {
		match self {
			Operation::Search => "Search",
			Operation::Insert => "Insert",
		}
	}
}

impl fmt::Display for Operation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Operation::Search => f.write_str("search"),
			Operation::Insert => f.write_str("insert"),
		}
	}
}

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	/// Invalid request payload.
	#[error("Invalid request: {0}")]
	BadRequest(String),

	/// The search engine is not connected or failed its liveness probe.
	#[error("Service unavailable: {0}")]
	ServiceUnavailable(String),

	/// The target index does not exist.
	#[error("Index not found: {0}")]
	IndexNotFound(String),

	/// The engine refused the request.
	#[error("{} error: {reason}", .operation.title())]
	EngineRejected { operation: Operation, reason: String },

	/// Anything else. The detail is logged, never returned.
	#[error("Internal error during {operation}: {detail}")]
	Internal { operation: Operation, detail: String },
}

impl ServerError {
	pub fn engine_unavailable() -> Self {
		ServerError::ServiceUnavailable("Elasticsearch service unavailable".to_string())
	}

	/// Maps an engine failure during `operation` onto the HTTP taxonomy.
	pub fn from_engine(operation: Operation, err: EngineError) -> Self {
		match err {
			EngineError::IndexNotFound { index } => ServerError::IndexNotFound(index),
			EngineError::Rejected { reason, .. } => ServerError::EngineRejected { operation, reason },
			other => ServerError::Internal {
				operation,
				detail: other.to_string(),
			},
		}
	}
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
	pub error: String,
	pub message: String,
}

impl IntoResponse for ServerError {
	fn into_response(self) -> Response {
		let (status, error, message) = match &self {
			ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
			ServerError::ServiceUnavailable(msg) => {
				tracing::warn!(error = %msg, "service unavailable");
				(StatusCode::SERVICE_UNAVAILABLE, "service_unavailable", msg.clone())
			}
			ServerError::IndexNotFound(index) => {
				tracing::warn!(index = %index, "index not found");
				(
					StatusCode::NOT_FOUND,
					"not_found",
					format!("Index '{index}' not found. Backend setup might have failed."),
				)
			}
			ServerError::EngineRejected { operation, reason } => {
				tracing::error!(%operation, reason = %reason, "engine rejected request");
				(
					StatusCode::INTERNAL_SERVER_ERROR,
					"engine_error",
					format!("{} error: {reason}", operation.title()),
				)
			}
			ServerError::Internal { operation, detail } => {
				tracing::error!(%operation, error = %detail, "internal error");
				(
					StatusCode::INTERNAL_SERVER_ERROR,
					"internal_error",
					format!("Internal server error during {operation}"),
				)
			}
		};

		let body = ErrorResponse {
			error: error.to_string(),
			message,
		};
		(status, Json(body)).into_response()
	}
}
