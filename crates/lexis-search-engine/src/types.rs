// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Request and response types shared by engine implementations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A stored document. `id` is only present when the caller chose it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	pub text: String,
}

impl Document {
	pub fn new(text: impl Into<String>) -> Self {
		Self {
			id: None,
			text: text.into(),
		}
	}

	pub fn with_id(id: impl Into<String>, text: impl Into<String>) -> Self {
		Self {
			id: Some(id.into()),
			text: text.into(),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
	/// Exact-value field, not analyzed.
	Keyword,
	/// Analyzed full-text field.
	Text,
}

impl FieldType {
	pub fn as_str(&self) -> &'static str {
		match self {
			FieldType::Keyword => "keyword",
			FieldType::Text => "text",
		}
	}
}

/// Field mappings an index is created with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexSchema {
	fields: BTreeMap<String, FieldType>,
}

impl IndexSchema {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn field(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
		self.fields.insert(name.into(), field_type);
		self
	}

	pub fn fields(&self) -> impl Iterator<Item = (&str, FieldType)> {
		self.fields.iter().map(|(name, ty)| (name.as_str(), *ty))
	}

	/// Body of an index-create request.
	pub fn to_create_body(&self) -> Value {
		let properties: serde_json::Map<String, Value> = self
			.fields
			.iter()
			.map(|(name, ty)| (name.clone(), json!({ "type": ty.as_str() })))
			.collect();
		json!({ "mappings": { "properties": properties } })
	}
}

/// Acknowledgement of a document write.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IndexedDocument {
	#[serde(rename = "_id", default)]
	pub id: Option<String>,
	#[serde(default)]
	pub result: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
	pub id: String,
	pub score: f64,
	pub text: String,
}
