// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Search engine access for Lexis.
//!
//! This crate provides the [`SearchEngine`] abstraction the backend is written
//! against, and [`EsClient`], a typed client for the Elasticsearch REST API
//! encapsulating HTTP communication, response parsing and error
//! classification.

pub mod client;
pub mod error;
#[cfg(any(test, feature = "testing"))]
pub mod memory;
pub mod types;

use async_trait::async_trait;

pub use client::EsClient;
pub use error::EngineError;
pub use lexis_common_http::{RetryConfig, RetryableError};
#[cfg(any(test, feature = "testing"))]
pub use memory::InMemoryEngine;
pub use types::{Document, FieldType, IndexSchema, IndexedDocument, SearchHit};

/// Operations the services need from a document search engine.
#[async_trait]
pub trait SearchEngine: Send + Sync {
	/// Liveness probe. `Ok(())` means the engine answered and is usable.
	async fn ping(&self) -> Result<(), EngineError>;

	async fn index_exists(&self, index: &str) -> Result<bool, EngineError>;

	async fn create_index(&self, index: &str, schema: &IndexSchema) -> Result<(), EngineError>;

	/// Stores `document`, under `id` when given, otherwise under an
	/// engine-assigned id.
	async fn index_document(
		&self,
		index: &str,
		id: Option<&str>,
		document: &Document,
	) -> Result<IndexedDocument, EngineError>;

	/// Full-text match of `query` against `field`, best hit first.
	async fn search_match(
		&self,
		index: &str,
		field: &str,
		query: &str,
		size: usize,
	) -> Result<Vec<SearchHit>, EngineError>;
}
