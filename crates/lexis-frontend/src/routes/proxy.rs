// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! JSON proxy handlers.
//!
//! The browser body is reduced to the one field the backend needs and
//! re-posted. The backend's status and body come back unchanged.

use axum::{
	body::Bytes,
	extract::State,
	response::{IntoResponse, Response},
	Json,
};
use serde_json::Value;
use tracing::info;

use crate::api::AppState;
use crate::error::ServerError;
use crate::gateway::BackendReply;

/// Reads `field` out of a JSON object body; absent fields become `null`.
fn forwarded_field(body: &[u8], field: &str) -> Result<Value, ServerError> {
	let value: Value = serde_json::from_slice(body)
		.map_err(|e| ServerError::Internal(format!("malformed JSON body: {e}")))?;
	match value {
		Value::Object(mut object) => Ok(object.remove(field).unwrap_or(Value::Null)),
		_ => Err(ServerError::Internal(
			"request body is not a JSON object".to_string(),
		)),
	}
}

fn relay(reply: BackendReply) -> Response {
	(reply.status, Json(reply.body)).into_response()
}

/// POST /get_best_match - forwards `{query}` to the backend search.
pub async fn get_best_match(
	State(state): State<AppState>,
	body: Bytes,
) -> Result<Response, ServerError> {
	let query = forwarded_field(&body, "query")?;
	info!(query = %query, "Received search request");

	let reply = state.backend.forward_search(query).await?;
	info!(status = %reply.status, "Backend search response");
	Ok(relay(reply))
}

/// POST /insert_document - forwards `{text}` to the backend insert.
pub async fn insert_document(
	State(state): State<AppState>,
	body: Bytes,
) -> Result<Response, ServerError> {
	let text = forwarded_field(&body, "text")?;
	info!("Received insert request");

	let reply = state.backend.forward_insert(text).await?;
	info!(status = %reply.status, "Backend insert response");
	Ok(relay(reply))
}
