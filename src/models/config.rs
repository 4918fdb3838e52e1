//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
///
/// Injected explicitly into every service; nothing in the pipeline reads the
/// process environment.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Outbound HTTP behavior settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Scraping behavior settings
    #[serde(default)]
    pub scrape: ScrapeConfig,

    /// Service-level throttling settings
    #[serde(default)]
    pub service: ServiceConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.http.retries == 0 {
            return Err(AppError::validation("http.retries must be > 0"));
        }
        if self.scrape.max_concurrent == 0 {
            return Err(AppError::validation("scrape.max_concurrent must be > 0"));
        }
        if self.scrape.backend == FetchBackend::Browser
            && self.scrape.webdriver_url.trim().is_empty()
        {
            return Err(AppError::validation(
                "scrape.webdriver_url is required for the browser backend",
            ));
        }
        Ok(())
    }
}

/// Outbound HTTP behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for outbound requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Retry attempts per fetch before the page is treated as empty
    #[serde(default = "defaults::retries")]
    pub retries: u32,

    /// Fixed delay between retry attempts in seconds
    #[serde(default = "defaults::retry_delay")]
    pub retry_delay_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            retries: defaults::retries(),
            retry_delay_secs: defaults::retry_delay(),
        }
    }
}

/// Which fetcher backend a pipeline invocation uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FetchBackend {
    /// Plain HTTP session (reqwest)
    #[default]
    Http,
    /// Headless-browser session driven over WebDriver
    Browser,
}

/// Scraping behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Fetcher backend selection
    #[serde(default)]
    pub backend: FetchBackend,

    /// WebDriver endpoint for the browser backend
    #[serde(default = "defaults::webdriver_url")]
    pub webdriver_url: String,

    /// Seconds to wait for client-side rendering in the browser backend
    #[serde(default = "defaults::render_wait")]
    pub render_wait_secs: u64,

    /// Bound on concurrent detail-page fetches
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,

    /// Delay between successive listing-page requests in milliseconds
    #[serde(default = "defaults::page_delay")]
    pub page_delay_ms: u64,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            backend: FetchBackend::default(),
            webdriver_url: defaults::webdriver_url(),
            render_wait_secs: defaults::render_wait(),
            max_concurrent: defaults::max_concurrent(),
            page_delay_ms: defaults::page_delay(),
        }
    }
}

/// Service-level throttling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Minimum spacing between consecutive searches on one service instance.
    /// Coarse serialization, not a precise rate limiter.
    #[serde(default = "defaults::search_interval")]
    pub min_search_interval_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            min_search_interval_secs: defaults::search_interval(),
        }
    }
}

mod defaults {
    // HTTP defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
            .into()
    }
    pub fn timeout() -> u64 {
        10
    }
    pub fn retries() -> u32 {
        3
    }
    pub fn retry_delay() -> u64 {
        2
    }

    // Scrape defaults
    pub fn webdriver_url() -> String {
        "http://localhost:9515".into()
    }
    pub fn render_wait() -> u64 {
        2
    }
    pub fn max_concurrent() -> usize {
        4
    }
    pub fn page_delay() -> u64 {
        1000
    }

    // Service defaults
    pub fn search_interval() -> u64 {
        6
    }
}
