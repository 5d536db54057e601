// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Lexis frontend: serves the web page and proxies search and insert
//! requests to the backend.

pub mod api;
pub mod error;
pub mod gateway;
pub mod routes;
pub mod version;

pub use api::{create_router, AppState};
pub use error::{ErrorResponse, ServerError};
pub use gateway::{BackendClient, BackendReply, GatewayError};
