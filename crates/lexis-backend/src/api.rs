// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! HTTP API router and shared state.

use std::sync::Arc;

use axum::{
	routing::{get, post},
	Router,
};

use crate::connection::EngineConnection;
use crate::routes;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
	pub connection: Arc<EngineConnection>,
	pub index: Arc<str>,
}

impl AppState {
	pub fn new(connection: EngineConnection, index: impl Into<String>) -> Self {
		Self {
			connection: Arc::new(connection),
			index: Arc::from(index.into()),
		}
	}
}

pub fn create_router(state: AppState) -> Router {
	Router::new()
		.route("/", get(routes::root::read_root))
		.route("/health", get(routes::health::health_check))
		.route("/search", post(routes::search::search_documents))
		.route("/insert", post(routes::insert::insert_document))
		.with_state(state)
}
