// src/fetch/browser.rs

//! Headless-browser fetcher backend.
//!
//! Drives a Chrome session over WebDriver for pages that block plain HTTP
//! clients. The session is connected at pipeline start and must be released
//! with [`BrowserFetcher::quit`] when the invocation scope ends.

use std::time::Duration;

use async_trait::async_trait;
use thirtyfour::prelude::*;

use crate::error::{AppError, Result};
use crate::models::Config;

use super::{Header, PageFetcher, RetryPolicy, with_retry};

/// Fetcher backed by a WebDriver browser session.
pub struct BrowserFetcher {
    driver: WebDriver,
    policy: RetryPolicy,
    render_wait: Duration,
}

impl BrowserFetcher {
    /// Connect a fresh headless Chrome session.
    pub async fn connect(config: &Config) -> Result<Self> {
        let mut caps = DesiredCapabilities::chrome();
        caps.add_chrome_option(
            "args",
            vec![
                "--headless=new",
                "--no-sandbox",
                "--disable-dev-shm-usage",
                "--disable-gpu",
                "--window-size=1920,1080",
            ],
        )
        .map_err(AppError::browser)?;

        let driver = WebDriver::new(&config.scrape.webdriver_url, caps)
            .await
            .map_err(AppError::browser)?;

        Ok(Self {
            driver,
            policy: RetryPolicy::from_config(&config.http),
            render_wait: Duration::from_secs(config.scrape.render_wait_secs),
        })
    }

    /// Release the browser session. Must be called when the pipeline
    /// invocation ends, success or failure.
    pub async fn quit(self) -> Result<()> {
        self.driver.quit().await.map_err(AppError::browser)
    }

    async fn load_page(&self, url: &str) -> Result<String> {
        self.driver.goto(url).await.map_err(AppError::browser)?;

        // Wait until the document body exists, then give client-side
        // rendering a fixed grace period.
        self.driver
            .query(By::Tag("body"))
            .first()
            .await
            .map_err(AppError::browser)?;
        tokio::time::sleep(self.render_wait).await;

        self.driver.source().await.map_err(AppError::browser)
    }
}

#[async_trait]
impl PageFetcher for BrowserFetcher {
    /// The browser session controls its own request shaping and cannot
    /// attach per-request headers. Callers that depend on them must use an
    /// HTTP session instead.
    async fn fetch_with_headers(&self, url: &str, headers: &[Header]) -> Result<String> {
        if !headers.is_empty() {
            log::warn!(
                "Browser session cannot attach {} per-request header(s) for {url}",
                headers.len()
            );
        }
        with_retry(self.policy, url, move || self.load_page(url)).await
    }
}
