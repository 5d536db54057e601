// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Best-match search over the document index.

use axum::{
	body::Bytes,
	extract::State,
	response::{IntoResponse, Response},
	Json,
};
use lexis_search_engine::{EngineError, SearchEngine, SearchHit};
use serde::Serialize;
use tracing::info;

use super::{required_text, MessageResponse};
use crate::api::AppState;
use crate::error::{Operation, ServerError};

const TEXT_FIELD: &str = "text";

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
	Hit(SearchHit),
	Empty,
}

#[derive(Debug, Serialize)]
pub struct SearchHitResponse {
	pub id: String,
	pub text: String,
	pub score: f64,
}

impl From<SearchHit> for SearchHitResponse {
	fn from(hit: SearchHit) -> Self {
		Self {
			id: hit.id,
			text: hit.text,
			score: hit.score,
		}
	}
}

/// Full-text match of `query` on the text field, keeping only the top hit.
pub async fn best_match(
	engine: &dyn SearchEngine,
	index: &str,
	query: &str,
) -> Result<SearchOutcome, EngineError> {
	let hits = engine.search_match(index, TEXT_FIELD, query, 1).await?;
	Ok(match hits.into_iter().next() {
		Some(hit) => SearchOutcome::Hit(hit),
		None => SearchOutcome::Empty,
	})
}

/// POST /search - `{query}` to the single best-matching document.
pub async fn search_documents(
	State(state): State<AppState>,
	body: Bytes,
) -> Result<Response, ServerError> {
	let query = required_text(&body, "query", Operation::Search)?;
	let engine = state.connection.live().await?;

	info!(query = %query, "Received search query");
	let outcome = best_match(engine.as_ref(), &state.index, &query)
		.await
		.map_err(|e| ServerError::from_engine(Operation::Search, e))?;

	Ok(match outcome {
		SearchOutcome::Hit(hit) => {
			info!(id = %hit.id, score = hit.score, "Best match found");
			Json(SearchHitResponse::from(hit)).into_response()
		}
		SearchOutcome::Empty => {
			info!("No documents found matching the query");
			Json(MessageResponse {
				message: "No documents found".to_string(),
			})
			.into_response()
		}
	})
}
