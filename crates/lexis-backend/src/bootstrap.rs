// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Ensures the document index exists and seeds it on first creation.

use lexis_search_engine::{Document, EngineError, IndexSchema, SearchEngine};
use tracing::{error, info};

use crate::seed;

/// What a bootstrap run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
	/// Whether the index was created by this run.
	pub created: bool,
	pub seeded: Vec<String>,
	pub failed: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Bootstrapper {
	index: String,
	schema: IndexSchema,
	corpus: Vec<Document>,
}

impl Bootstrapper {
	pub fn new(index: impl Into<String>, schema: IndexSchema, corpus: Vec<Document>) -> Self {
		Self {
			index: index.into(),
			schema,
			corpus,
		}
	}

	/// The fixed `{id: keyword, text: text}` schema with the starter corpus.
	pub fn standard(index: impl Into<String>) -> Self {
		Self::new(index, seed::index_schema(), seed::seed_documents())
	}

	pub fn index(&self) -> &str {
		&self.index
	}

	/// Creates and seeds the index if it is absent; otherwise does nothing.
	///
	/// A failing existence check or index creation aborts the run. A failing
	/// seed document is recorded in the report and the rest are still written.
	pub async fn ensure(&self, engine: &dyn SearchEngine) -> Result<BootstrapReport, EngineError> {
		if engine.index_exists(&self.index).await? {
			info!(
				index = %self.index,
				"Index already exists. Skipping creation and initial data population"
			);
			return Ok(BootstrapReport::default());
		}

		info!(index = %self.index, "Index not found. Creating index");
		engine.create_index(&self.index, &self.schema).await?;
		info!(index = %self.index, "Index created");

		let mut report = BootstrapReport {
			created: true,
			..Default::default()
		};

		info!(count = self.corpus.len(), "Inserting initial documents");
		for document in &self.corpus {
			let label = document.id.clone().unwrap_or_else(|| "<auto>".to_string());
			match engine
				.index_document(&self.index, document.id.as_deref(), document)
				.await
			{
				Ok(_) => {
					info!(id = %label, "Document indexed");
					report.seeded.push(label);
				}
				Err(EngineError::Rejected { reason, .. }) => {
					error!(id = %label, reason = %reason, "Error indexing document");
					report.failed.push(label);
				}
				Err(e) => {
					error!(id = %label, error = %e, "Unexpected error indexing document");
					report.failed.push(label);
				}
			}
		}
		info!(
			seeded = report.seeded.len(),
			failed = report.failed.len(),
			"Initial data population complete"
		);

		Ok(report)
	}
}
