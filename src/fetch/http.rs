// src/fetch/http.rs

//! Plain HTTP fetcher backend.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::HttpConfig;

use super::{Header, PageFetcher, RetryPolicy, with_retry};

/// Fetcher backed by a reqwest client session.
///
/// One instance is built per pipeline invocation so no connection state is
/// shared across requests.
pub struct HttpFetcher {
    client: reqwest::Client,
    policy: RetryPolicy,
}

impl HttpFetcher {
    /// Create a fetcher with the configured identity header and timeout.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            policy: RetryPolicy::from_config(config),
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_with_headers(&self, url: &str, headers: &[Header]) -> Result<String> {
        with_retry(self.policy, url, move || async move {
            let mut request = self.client.get(url);
            for (name, value) in headers {
                request = request.header(*name, value);
            }

            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(AppError::Status {
                    status: status.as_u16(),
                    url: url.to_string(),
                });
            }
            Ok(response.text().await?)
        })
        .await
    }
}
