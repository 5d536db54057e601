// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Lexis backend: search and insert over a document index.
//!
//! At startup the [`Supervisor`] connects to the search engine and bootstraps
//! the index; the router then serves requests against the resulting
//! [`EngineConnection`].

pub mod api;
pub mod bootstrap;
pub mod connection;
pub mod error;
pub mod health;
pub mod routes;
pub mod seed;
pub mod supervisor;
pub mod version;

pub use api::{create_router, AppState};
pub use bootstrap::{BootstrapReport, Bootstrapper};
pub use connection::{ConnectionState, EngineConnection};
pub use error::{ErrorResponse, Operation, ServerError};
pub use supervisor::Supervisor;
