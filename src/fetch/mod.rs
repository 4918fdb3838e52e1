// src/fetch/mod.rs

//! Outbound page fetching with bounded retry.
//!
//! The [`PageFetcher`] trait is the seam between the pipelines and the
//! network. Two backends implement it: a plain HTTP session
//! ([`HttpFetcher`]) and a headless-browser session ([`BrowserFetcher`],
//! behind the `browser` feature). Retry behavior is shared via
//! [`with_retry`].

#[cfg(feature = "browser")]
mod browser;
mod http;

#[cfg(feature = "browser")]
pub use browser::BrowserFetcher;
pub use http::HttpFetcher;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::HttpConfig;

/// One request header pair attached to a fetch.
pub type Header = (&'static str, String);

/// Fetches the body of a remote page or API endpoint.
///
/// Implementations retry transient failures internally; an `Err` means the
/// retry budget is exhausted and the caller should treat the page as empty.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` with the backend's default headers.
    async fn fetch(&self, url: &str) -> Result<String> {
        self.fetch_with_headers(url, &[]).await
    }

    /// Fetch `url` with additional per-request headers.
    async fn fetch_with_headers(&self, url: &str, headers: &[Header]) -> Result<String>;
}

/// Fixed-delay retry settings. No exponential backoff.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &HttpConfig) -> Self {
        Self {
            attempts: config.retries.max(1),
            delay: Duration::from_secs(config.retry_delay_secs),
        }
    }
}

/// Run `op` up to `policy.attempts` times, sleeping the fixed delay between
/// attempts. Returns the last error once the budget is exhausted.
pub async fn with_retry<T, F, Fut>(policy: RetryPolicy, context: &str, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let attempts = policy.attempts.max(1);
    let mut last_error = None;

    for attempt in 1..=attempts {
        match op().await {
            Ok(value) => return Ok(value),
            Err(error) => {
                log::warn!("Attempt {attempt}/{attempts} failed for {context}: {error}");
                last_error = Some(error);
                if attempt < attempts {
                    tokio::time::sleep(policy.delay).await;
                }
            }
        }
    }

    Err(last_error.unwrap_or_else(|| AppError::scrape(context, "retry budget is zero")))
}
