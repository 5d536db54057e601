// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Centralized configuration management for the Lexis services.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Type-safe configuration with validation
//! - The deployment variables `ELASTICSEARCH_HOSTS` and `BACKEND_URL`, plus
//!   `LEXIS_*` for everything else
//!
//! # Usage
//!
//! ```ignore
//! use lexis_server_config::load_config;
//!
//! let config = load_config()?;
//! println!("listening on {}", config.socket_addr());
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::ServiceConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use std::path::PathBuf;

use tracing::{debug, info};

/// Fully resolved configuration shared by the backend and frontend binaries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceConfig {
	pub http: HttpConfig,
	pub engine: EngineConfig,
	pub proxy: ProxyConfig,
	pub logging: LoggingConfig,
}

impl ServiceConfig {
	/// Get the socket address string for binding.
	pub fn socket_addr(&self) -> String {
		format!("{}:{}", self.http.host, self.http.port)
	}
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables
/// 2. Config file (`/etc/lexis/lexis.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<ServiceConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(config_path: impl Into<PathBuf>) -> Result<ServiceConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

fn load_from_sources(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<ServiceConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ServiceConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
pub fn finalize(layer: ServiceConfigLayer) -> Result<ServiceConfig, ConfigError> {
	let config = ServiceConfig {
		http: layer.http.unwrap_or_default().finalize(),
		engine: layer.engine.unwrap_or_default().finalize(),
		proxy: layer.proxy.unwrap_or_default().finalize(),
		logging: layer.logging.unwrap_or_default().finalize(),
	};

	validate_config(&config)?;

	info!(
		host = %config.http.host,
		port = config.http.port,
		engine_url = %config.engine.url,
		index = %config.engine.index,
		connect_attempts = config.engine.connect_attempts,
		connect_delay_secs = config.engine.connect_delay.as_secs(),
		backend_url = %config.proxy.backend_url,
		"Service configuration loaded"
	);

	Ok(config)
}

/// Validate cross-field configuration rules.
///
/// Endpoint URLs are not checked here: each binary only uses one of them and
/// decides itself what an unusable endpoint means.
fn validate_config(config: &ServiceConfig) -> Result<(), ConfigError> {
	if config.engine.connect_attempts == 0 {
		return Err(ConfigError::Validation(
			"LEXIS_ENGINE_CONNECT_ATTEMPTS must be at least 1".to_string(),
		));
	}

	if config.engine.index.is_empty() {
		return Err(ConfigError::Validation(
			"LEXIS_ENGINE_INDEX must not be empty".to_string(),
		));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn test_defaults_are_valid() {
		let config = finalize(ServiceConfigLayer::default()).unwrap();
		assert_eq!(config, ServiceConfig::default());
		assert_eq!(config.socket_addr(), "0.0.0.0:8080");
	}

	#[test]
	fn test_zero_connect_attempts_rejected() {
		let layer = ServiceConfigLayer {
			engine: Some(EngineConfigLayer {
				connect_attempts: Some(0),
				..Default::default()
			}),
			..Default::default()
		};
		let err = finalize(layer).unwrap_err();
		assert!(err.to_string().contains("at least 1"));
	}

	#[test]
	fn test_unusable_endpoints_still_load() {
		let env = EnvSource::load_with(|name| match name {
			"ELASTICSEARCH_HOSTS" => Some("not a url".to_string()),
			"BACKEND_URL" => Some("backend:8080".to_string()),
			_ => None,
		})
		.unwrap();
		let mut merged = ServiceConfigLayer::default();
		merged.merge(env);

		let config = finalize(merged).unwrap();
		assert_eq!(config.engine.url, "not a url");
		assert_eq!(config.proxy.backend_url, "backend:8080");
	}

	#[test]
	fn test_file_then_env_precedence() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("lexis.toml");
		std::fs::write(
			&path,
			"[engine]\nindex = \"from_file\"\nurl = \"http://file:9200\"\n",
		)
		.unwrap();

		let env = EnvSource::load_with(|name| match name {
			"ELASTICSEARCH_HOSTS" => Some("http://env:9200".to_string()),
			_ => None,
		})
		.unwrap();

		let mut merged = ServiceConfigLayer::default();
		merged.merge(TomlSource::new(&path).load().unwrap());
		merged.merge(env);
		let config = finalize(merged).unwrap();

		assert_eq!(config.engine.url, "http://env:9200");
		assert_eq!(config.engine.index, "from_file");
	}

	proptest! {
		#[test]
		fn prop_any_port_resolves_into_socket_addr(port in 1u16..) {
			let layer = ServiceConfigLayer {
				http: Some(HttpConfigLayer { host: Some("127.0.0.1".to_string()), port: Some(port) }),
				..Default::default()
			};
			let config = finalize(layer).unwrap();
			prop_assert_eq!(config.socket_addr(), format!("127.0.0.1:{port}"));
		}
	}
}
