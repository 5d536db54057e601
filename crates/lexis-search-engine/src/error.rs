// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Error types for engine access.

use lexis_common_http::RetryableError;
use thiserror::Error;

/// Errors that can occur when talking to the search engine.
#[derive(Debug, Error)]
pub enum EngineError {
	/// The engine endpoint cannot be used as configured.
	#[error("Invalid engine configuration: {0}")]
	InvalidConfig(String),

	/// Network-level error during HTTP communication.
	#[error("Network error: {0}")]
	Network(#[from] reqwest::Error),

	/// Request timed out.
	#[error("Request timed out")]
	Timeout,

	/// The engine answered the liveness probe with a non-success status.
	#[error("Engine unavailable (status {status})")]
	Unavailable { status: u16 },

	/// The target index does not exist.
	#[error("Index '{index}' not found")]
	IndexNotFound { index: String },

	/// The engine refused the request as malformed.
	#[error("Engine rejected request ({kind}): {reason}")]
	Rejected {
		status: u16,
		kind: String,
		reason: String,
	},

	/// Any other error status.
	#[error("Engine error: {status} - {message}")]
	Api { status: u16, message: String },

	/// Invalid or unparseable response body.
	#[error("Invalid response from engine: {0}")]
	InvalidResponse(String),
}

impl RetryableError for EngineError {
	fn is_retryable(&self) -> bool {
		match self {
			EngineError::InvalidConfig(_) => false,
			EngineError::Network(_) => true,
			EngineError::Timeout => true,
			EngineError::Unavailable { .. } => true,
			EngineError::IndexNotFound { .. } => false,
			EngineError::Rejected { .. } => false,
			EngineError::Api { status, .. } => *status >= 500,
			EngineError::InvalidResponse(_) => false,
		}
	}
}
