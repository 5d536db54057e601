// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Proxy error types and HTTP response conversions.

use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use serde::{Deserialize, Serialize};

use crate::gateway::GatewayError;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	/// The backend could not be reached or answered unreadably.
	#[error("Backend service unavailable: {0}")]
	BackendUnavailable(String),

	/// Local failure, e.g. a malformed request body. Detail is only logged.
	#[error("Internal error: {0}")]
	Internal(String),
}

impl From<GatewayError> for ServerError {
	fn from(err: GatewayError) -> Self {
		match err {
			GatewayError::Transport(_) | GatewayError::UnreadableBody(_) => {
				ServerError::BackendUnavailable(err.to_string())
			}
			GatewayError::InvalidUrl { .. } | GatewayError::Client(_) => {
				ServerError::Internal(err.to_string())
			}
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
		let (status, error_response) = match &self {
			ServerError::BackendUnavailable(cause) => {
				tracing::error!(error = %cause, "error communicating with backend service");
				(
					StatusCode::SERVICE_UNAVAILABLE,
					ErrorResponse {
						error: "service_unavailable".to_string(),
						message: format!("Backend service unavailable: {cause}"),
					},
				)
			}
			ServerError::Internal(msg) => {
				tracing::error!(error = %msg, "internal error");
				(
					StatusCode::INTERNAL_SERVER_ERROR,
					ErrorResponse {
						error: "internal_error".to_string(),
						message: "Internal server error in frontend proxy".to_string(),
					},
				)
			}
		};

		(status, Json(error_response)).into_response()
	}
}
