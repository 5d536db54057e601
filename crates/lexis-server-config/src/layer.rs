// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration layer for merging from multiple sources.

use serde::Deserialize;

use crate::sections::{EngineConfigLayer, HttpConfigLayer, LoggingConfigLayer, ProxyConfigLayer};

/// Service configuration layer - all fields are Option for merging.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceConfigLayer {
	#[serde(default)]
	pub http: Option<HttpConfigLayer>,
	#[serde(default)]
	pub engine: Option<EngineConfigLayer>,
	#[serde(default)]
	pub proxy: Option<ProxyConfigLayer>,
	#[serde(default)]
	pub logging: Option<LoggingConfigLayer>,
}

impl ServiceConfigLayer {
	/// Merge another layer into this one. Other layer takes precedence.
	pub fn merge(&mut self, other: ServiceConfigLayer) {
		merge_option(&mut self.http, other.http, HttpConfigLayer::merge);
		merge_option(&mut self.engine, other.engine, EngineConfigLayer::merge);
		merge_option(&mut self.proxy, other.proxy, ProxyConfigLayer::merge);
		merge_option(&mut self.logging, other.logging, LoggingConfigLayer::merge);
	}
}

fn merge_option<T, F>(base: &mut Option<T>, other: Option<T>, merge_fn: F)
where
	F: FnOnce(&mut T, T),
{
	match (base.as_mut(), other) {
		(Some(b), Some(o)) => merge_fn(b, o),
		(None, Some(o)) => *base = Some(o),
		_ => {}
	}
}
