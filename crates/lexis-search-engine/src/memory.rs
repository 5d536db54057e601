// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! In-process [`SearchEngine`] for tests.
//!
//! Documents live in memory and a match query scores a document by how many
//! query terms its text contains. Failures can be injected to drive the
//! error paths of callers.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::EngineError;
use crate::types::{Document, IndexSchema, IndexedDocument, SearchHit};
use crate::SearchEngine;

#[derive(Debug, Default)]
struct StoredIndex {
	schema: IndexSchema,
	documents: Vec<(String, Document)>,
}

#[derive(Debug, Default)]
pub struct InMemoryEngine {
	indices: Mutex<HashMap<String, StoredIndex>>,
	reachable: AtomicBool,
	failing_pings: AtomicU32,
	failing_document_ids: Mutex<HashSet<String>>,
	next_search_error: Mutex<Option<EngineError>>,
	next_id: AtomicU64,
	calls: AtomicUsize,
	index_creations: AtomicUsize,
}

impl InMemoryEngine {
	pub fn new() -> Self {
		Self {
			reachable: AtomicBool::new(true),
			..Default::default()
		}
	}

	/// An engine whose every ping fails.
	pub fn unreachable() -> Self {
		let engine = Self::new();
		engine.set_reachable(false);
		engine
	}

	pub fn set_reachable(&self, reachable: bool) {
		self.reachable.store(reachable, Ordering::SeqCst);
	}

	/// The next `count` pings fail even while reachable.
	pub fn fail_next_pings(&self, count: u32) {
		self.failing_pings.store(count, Ordering::SeqCst);
	}

	/// Writes of a document with this id are rejected.
	pub async fn fail_document(&self, id: impl Into<String>) {
		self.failing_document_ids.lock().await.insert(id.into());
	}

	/// The next search returns `error`.
	pub async fn fail_next_search(&self, error: EngineError) {
		*self.next_search_error.lock().await = Some(error);
	}

	/// Total number of trait calls, pings included.
	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	pub fn index_creations(&self) -> usize {
		self.index_creations.load(Ordering::SeqCst)
	}

	pub async fn document_count(&self, index: &str) -> usize {
		self
			.indices
			.lock()
			.await
			.get(index)
			.map(|i| i.documents.len())
			.unwrap_or(0)
	}

	pub async fn get(&self, index: &str, id: &str) -> Option<Document> {
		self.indices.lock().await.get(index).and_then(|i| {
			i.documents
				.iter()
				.find(|(doc_id, _)| doc_id == id)
				.map(|(_, doc)| doc.clone())
		})
	}

	pub async fn schema(&self, index: &str) -> Option<IndexSchema> {
		self.indices.lock().await.get(index).map(|i| i.schema.clone())
	}

	fn record_call(&self) {
		self.calls.fetch_add(1, Ordering::SeqCst);
	}
}

fn terms(text: &str) -> Vec<String> {
	text
		.split(|c: char| !c.is_alphanumeric())
		.filter(|t| !t.is_empty())
		.map(str::to_lowercase)
		.collect()
}

#[async_trait]
impl SearchEngine for InMemoryEngine {
	async fn ping(&self) -> Result<(), EngineError> {
		self.record_call();
		if !self.reachable.load(Ordering::SeqCst) {
			return Err(EngineError::Unavailable { status: 503 });
		}
		let pending = self.failing_pings.load(Ordering::SeqCst);
		if pending > 0 {
			self.failing_pings.store(pending - 1, Ordering::SeqCst);
			return Err(EngineError::Unavailable { status: 503 });
		}
		Ok(())
	}

	async fn index_exists(&self, index: &str) -> Result<bool, EngineError> {
		self.record_call();
		Ok(self.indices.lock().await.contains_key(index))
	}

	async fn create_index(&self, index: &str, schema: &IndexSchema) -> Result<(), EngineError> {
		self.record_call();
		let mut indices = self.indices.lock().await;
		if indices.contains_key(index) {
			return Err(EngineError::Rejected {
				status: 400,
				kind: "resource_already_exists_exception".to_string(),
				reason: format!("index [{index}] already exists"),
			});
		}
		indices.insert(
			index.to_string(),
			StoredIndex {
				schema: schema.clone(),
				documents: Vec::new(),
			},
		);
		self.index_creations.fetch_add(1, Ordering::SeqCst);
		Ok(())
	}

	async fn index_document(
		&self,
		index: &str,
		id: Option<&str>,
		document: &Document,
	) -> Result<IndexedDocument, EngineError> {
		self.record_call();
		if let Some(id) = id {
			if self.failing_document_ids.lock().await.contains(id) {
				return Err(EngineError::Rejected {
					status: 400,
					kind: "mapper_parsing_exception".to_string(),
					reason: format!("failed to parse document [{id}]"),
				});
			}
		}

		let mut indices = self.indices.lock().await;
		let stored = indices.get_mut(index).ok_or_else(|| EngineError::IndexNotFound {
			index: index.to_string(),
		})?;

		let id = match id {
			Some(id) => id.to_string(),
			None => format!("mem-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1),
		};

		let result = match stored.documents.iter_mut().find(|(doc_id, _)| *doc_id == id) {
			Some(existing) => {
				existing.1 = document.clone();
				"updated"
			}
			None => {
				stored.documents.push((id.clone(), document.clone()));
				"created"
			}
		};

		Ok(IndexedDocument {
			id: Some(id),
			result: Some(result.to_string()),
		})
	}

	async fn search_match(
		&self,
		index: &str,
		field: &str,
		query: &str,
		size: usize,
	) -> Result<Vec<SearchHit>, EngineError> {
		self.record_call();
		if let Some(error) = self.next_search_error.lock().await.take() {
			return Err(error);
		}

		let indices = self.indices.lock().await;
		let stored = indices.get(index).ok_or_else(|| EngineError::IndexNotFound {
			index: index.to_string(),
		})?;

		if field != "text" {
			return Ok(Vec::new());
		}

		let query_terms = terms(query);
		let mut hits: Vec<SearchHit> = stored
			.documents
			.iter()
			.filter_map(|(id, doc)| {
				let doc_terms = terms(&doc.text);
				let score = query_terms
					.iter()
					.map(|q| doc_terms.iter().filter(|t| *t == q).count())
					.sum::<usize>() as f64;
				(score > 0.0).then(|| SearchHit {
					id: id.clone(),
					score,
					text: doc.text.clone(),
				})
			})
			.collect();

		hits.sort_by(|a, b| b.score.total_cmp(&a.score));
		hits.truncate(size);
		Ok(hits)
	}
}
