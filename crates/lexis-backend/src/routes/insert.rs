// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use axum::{body::Bytes, extract::State, Json};
use lexis_search_engine::{Document, EngineError, SearchEngine};
use serde::Serialize;
use tracing::info;

use super::required_text;
use crate::api::AppState;
use crate::error::{Operation, ServerError};

/// Stand-in id when the engine does not report one.
pub const MISSING_ID: &str = "N/A";

#[derive(Debug, Serialize)]
pub struct InsertResponse {
	pub message: String,
	pub id: String,
}

/// Stores `text` under an engine-assigned id and returns that id.
pub async fn insert_text(
	engine: &dyn SearchEngine,
	index: &str,
	text: &str,
) -> Result<String, EngineError> {
	let indexed = engine.index_document(index, None, &Document::new(text)).await?;
	Ok(indexed.id.unwrap_or_else(|| MISSING_ID.to_string()))
}

/// POST /insert - `{text}` to a new document.
pub async fn insert_document(
	State(state): State<AppState>,
	body: Bytes,
) -> Result<Json<InsertResponse>, ServerError> {
	let text = required_text(&body, "text", Operation::Insert)?;
	let engine = state.connection.live().await?;

	info!(len = text.len(), "Received request to insert document");
	let id = insert_text(engine.as_ref(), &state.index, &text)
		.await
		.map_err(|e| ServerError::from_engine(Operation::Insert, e))?;
	info!(id = %id, "Document inserted successfully");

	Ok(Json(InsertResponse {
		message: "Document inserted successfully".to_string(),
		id,
	}))
}
