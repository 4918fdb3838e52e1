// src/services/mod.rs

//! High-level search services.
//!
//! A service owns the shared [`Config`] and a search throttle. Each search
//! opens a fresh fetcher session, runs the pipeline, and releases the
//! session before returning, so no connection state leaks between
//! invocations.

pub mod courses;
pub mod jobs;

pub use courses::CourseService;
pub use jobs::JobService;

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::error::Result;
use crate::fetch::{HttpFetcher, PageFetcher};
use crate::models::{Config, FetchBackend, ServiceConfig};

#[cfg(feature = "browser")]
use crate::fetch::BrowserFetcher;
#[cfg(not(feature = "browser"))]
use crate::error::AppError;

/// Coarse serializer spacing consecutive searches on one service instance.
///
/// The lock is held across the sleep, so concurrent callers queue up instead
/// of racing the interval check.
pub(crate) struct Throttle {
    interval: Duration,
    last: Mutex<Option<Instant>>,
}

impl Throttle {
    pub(crate) fn new(config: &ServiceConfig) -> Self {
        Self {
            interval: Duration::from_secs(config.min_search_interval_secs),
            last: Mutex::new(None),
        }
    }

    /// Wait until the minimum interval since the previous search has passed,
    /// then claim the slot.
    pub(crate) async fn wait(&self) {
        let mut last = self.last.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.interval {
                tokio::time::sleep(self.interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}

/// Fetcher session opened for one pipeline invocation.
pub(crate) enum SessionFetcher {
    Http(HttpFetcher),
    #[cfg(feature = "browser")]
    Browser(BrowserFetcher),
}

impl SessionFetcher {
    /// Open a plain HTTP session regardless of the configured backend.
    ///
    /// The JSON course APIs need per-request header shaping that a browser
    /// session cannot attach, so the course pipelines use this
    /// unconditionally.
    pub(crate) fn open_http(config: &Config) -> Result<Self> {
        Ok(SessionFetcher::Http(HttpFetcher::new(&config.http)?))
    }

    /// Open the backend the configuration selects.
    pub(crate) async fn open(config: &Config) -> Result<Self> {
        match config.scrape.backend {
            FetchBackend::Http => Self::open_http(config),
            #[cfg(feature = "browser")]
            FetchBackend::Browser => {
                Ok(SessionFetcher::Browser(BrowserFetcher::connect(config).await?))
            }
            #[cfg(not(feature = "browser"))]
            FetchBackend::Browser => Err(AppError::config(
                "scrape.backend = \"browser\" requires the `browser` feature",
            )),
        }
    }

    pub(crate) fn as_fetcher(&self) -> &dyn PageFetcher {
        match self {
            SessionFetcher::Http(fetcher) => fetcher,
            #[cfg(feature = "browser")]
            SessionFetcher::Browser(fetcher) => fetcher,
        }
    }

    /// Release session resources. Runs on success and failure paths alike.
    pub(crate) async fn close(self) {
        match self {
            SessionFetcher::Http(_) => {}
            #[cfg(feature = "browser")]
            SessionFetcher::Browser(fetcher) => {
                if let Err(error) = fetcher.quit().await {
                    log::warn!("Browser session release failed: {error}");
                }
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn throttle_spaces_consecutive_searches() {
        let throttle = Throttle::new(&ServiceConfig {
            min_search_interval_secs: 6,
        });

        let start = Instant::now();
        throttle.wait().await;
        assert!(start.elapsed() < Duration::from_secs(1));

        throttle.wait().await;
        assert!(start.elapsed() >= Duration::from_secs(6));
    }
}
