// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! HTTP API router and shared state.

use std::sync::Arc;

use axum::{
	routing::{get, post},
	Router,
};

use crate::gateway::BackendClient;
use crate::routes;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
	pub backend: Arc<BackendClient>,
}

impl AppState {
	pub fn new(backend: BackendClient) -> Self {
		Self {
			backend: Arc::new(backend),
		}
	}
}

pub fn create_router(state: AppState) -> Router {
	Router::new()
		.route("/", get(routes::page::index_page))
		.route("/get_best_match", post(routes::proxy::get_best_match))
		.route("/insert_document", post(routes::proxy::insert_document))
		.with_state(state)
}
