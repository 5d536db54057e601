// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use axum::Json;

use super::MessageResponse;

/// GET / - Liveness message. Does not touch the engine.
pub async fn read_root() -> Json<MessageResponse> {
	Json(MessageResponse {
		message: "Backend is running".to_string(),
	})
}
