// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Retry logic with a fixed delay between attempts.

use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
	pub max_attempts: u32,
	pub delay: Duration,
}

impl RetryConfig {
	/// Same delay between every attempt.
	pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
		Self {
			max_attempts,
			delay,
		}
	}
}

pub trait RetryableError {
	fn is_retryable(&self) -> bool;
}

/// Runs `f` until it succeeds, fails with a non-retryable error, or
/// `max_attempts` is exhausted. The delay is only slept between attempts.
pub async fn retry<F, Fut, T, E>(cfg: &RetryConfig, mut f: F) -> Result<T, E>
where
	F: FnMut() -> Fut,
	Fut: std::future::Future<Output = Result<T, E>>,
	E: RetryableError + std::fmt::Display,
{
	let mut attempt = 0;

	loop {
		match f().await {
			Ok(result) => return Ok(result),
			Err(err) => {
				attempt += 1;

				if !err.is_retryable() {
					warn!(
							error = %err,
							attempt = attempt,
							"non-retryable error encountered"
					);
					return Err(err);
				}

				if attempt >= cfg.max_attempts {
					warn!(
							error = %err,
							attempt = attempt,
							max_attempts = cfg.max_attempts,
							"max retry attempts exhausted"
					);
					return Err(err);
				}

				warn!(
						error = %err,
						attempt = attempt,
						max_attempts = cfg.max_attempts,
						delay_ms = cfg.delay.as_millis(),
						"retrying after error"
				);

				tokio::time::sleep(cfg.delay).await;
			}
		}
	}
}
