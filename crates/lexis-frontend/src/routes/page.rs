// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../templates/index.html");

/// GET / - The search and insert page.
pub async fn index_page() -> Html<&'static str> {
	tracing::info!("Serving index page");
	Html(INDEX_HTML)
}
