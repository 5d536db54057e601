// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: environment variables and TOML files.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::ServiceConfigLayer;
use crate::sections::{
	first_host, EngineConfigLayer, HttpConfigLayer, LoggingConfigLayer, ProxyConfigLayer,
};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<ServiceConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ServiceConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(ServiceConfigLayer::default())
	}
}

/// TOML file configuration source.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new("/etc/lexis/lexis.toml")
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<ServiceConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(ServiceConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: ServiceConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// The engine and backend endpoints keep their deployment names
/// (`ELASTICSEARCH_HOSTS`, `BACKEND_URL`); everything else follows
/// `LEXIS_<SECTION>_<FIELD>`.
pub struct EnvSource;

impl EnvSource {
	/// Builds a layer from an arbitrary variable lookup.
	pub fn load_with<F>(lookup: F) -> Result<ServiceConfigLayer, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let env = Env(lookup);
		Ok(ServiceConfigLayer {
			http: Some(HttpConfigLayer {
				host: env.var("LEXIS_HOST"),
				port: env.parse("LEXIS_PORT")?,
			}),
			engine: Some(EngineConfigLayer {
				url: env.var("ELASTICSEARCH_HOSTS").and_then(|h| first_host(&h)),
				index: env.var("LEXIS_ENGINE_INDEX"),
				connect_attempts: env.parse("LEXIS_ENGINE_CONNECT_ATTEMPTS")?,
				connect_delay_secs: env.parse("LEXIS_ENGINE_CONNECT_DELAY_SECS")?,
				request_timeout_secs: env.parse("LEXIS_ENGINE_REQUEST_TIMEOUT_SECS")?,
				refresh_on_write: env.bool("LEXIS_ENGINE_REFRESH_ON_WRITE"),
			}),
			proxy: Some(ProxyConfigLayer {
				backend_url: env.var("BACKEND_URL"),
				timeout_secs: env.parse("LEXIS_PROXY_TIMEOUT_SECS")?,
			}),
			logging: Some(LoggingConfigLayer {
				level: env.var("LEXIS_LOG_LEVEL"),
			}),
		})
	}
}

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ServiceConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Self::load_with(|name| std::env::var(name).ok())
	}
}

struct Env<F>(F);

impl<F> Env<F>
where
	F: Fn(&str) -> Option<String>,
{
	fn var(&self, name: &str) -> Option<String> {
		(self.0)(name).filter(|s| !s.is_empty())
	}

	fn bool(&self, name: &str) -> Option<bool> {
		self
			.var(name)
			.map(|v| v.eq_ignore_ascii_case("true") || v == "1")
	}

	fn parse<T: std::str::FromStr>(&self, name: &str) -> Result<Option<T>, ConfigError> {
		match self.var(name) {
			Some(v) => v.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
				key: name.to_string(),
				message: format!(
					"invalid {} value '{v}'",
					std::any::type_name::<T>()
				),
			}),
			None => Ok(None),
		}
	}
}
