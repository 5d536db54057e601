// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections shared by the Lexis binaries.

pub mod engine;
pub mod http;
pub mod logging;
pub mod proxy;

pub use engine::{first_host, EngineConfig, EngineConfigLayer};
pub use http::{HttpConfig, HttpConfigLayer};
pub use logging::{LoggingConfig, LoggingConfigLayer};
pub use proxy::{ProxyConfig, ProxyConfigLayer};
