// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! HTTP route handlers.

pub mod health;
pub mod insert;
pub mod root;
pub mod search;

use serde::Serialize;
use serde_json::Value;

use crate::error::{Operation, ServerError};

/// `{"message": ...}` body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
	pub message: String,
}

/// Pulls a required, non-empty string `field` out of a raw JSON body.
///
/// A body that is not a JSON object is an unclassified failure; a missing,
/// empty or non-string field is a bad request.
pub(crate) fn required_text(body: &[u8], field: &str, operation: Operation) -> Result<String, ServerError> {
	let value: Value = serde_json::from_slice(body).map_err(|e| ServerError::Internal {
		operation,
		detail: format!("malformed JSON body: {e}"),
	})?;
	let object = value.as_object().ok_or_else(|| ServerError::Internal {
		operation,
		detail: "request body is not a JSON object".to_string(),
	})?;

	match object.get(field) {
		Some(Value::String(text)) if !text.is_empty() => Ok(text.clone()),
		Some(Value::String(_)) | Some(Value::Null) | None => Err(ServerError::BadRequest(format!(
			"Missing '{field}' in request body"
		))),
		Some(_) => Err(ServerError::BadRequest(format!("'{field}' must be a string"))),
	}
}
