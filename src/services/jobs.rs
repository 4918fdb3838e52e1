// src/services/jobs.rs

//! Job search pipeline service.
//!
//! Orchestrates one search end to end: paginate the listing endpoint, dedup
//! overlapping cards, expand each surviving card into a full record with a
//! bounded-concurrency detail pass, then apply the request filters.

use std::sync::{Arc, LazyLock};
use std::time::Duration;

use futures::StreamExt;
use futures::stream;
use regex::Regex;

use crate::error::{AppError, Result};
use crate::fetch::PageFetcher;
use crate::models::{Config, Job, JobSearchCriteria};
use crate::pipeline::{apply_job_filters, collect_pages, dedup_by_key};
use crate::scrape::linkedin::{self, JobBoardScraper};

use super::{SessionFetcher, Throttle};

/// Stand-in description for cards whose detail page could not be read.
pub const DESCRIPTION_PLACEHOLDER: &str = "Description unavailable.";

/// Accepted id shapes: a bare numeric posting id or one carrying the
/// platform prefix.
static JOB_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:linkedin_)?(\d+)$").expect("valid pattern"));

fn parse_job_id(job_id: &str) -> Result<&str> {
    JOB_ID
        .captures(job_id)
        .and_then(|captures| captures.get(1))
        .map(|native| native.as_str())
        .ok_or_else(|| AppError::validation(format!("Invalid job id '{job_id}'")))
}

/// Job search and lookup over the job-board guest endpoints.
pub struct JobService {
    config: Arc<Config>,
    throttle: Throttle,
}

impl JobService {
    pub fn new(config: Arc<Config>) -> Self {
        let throttle = Throttle::new(&config.service);
        Self { config, throttle }
    }

    /// Run one throttled search over a fresh fetcher session.
    pub async fn search(&self, criteria: &JobSearchCriteria) -> Result<Vec<Job>> {
        self.throttle.wait().await;
        let session = SessionFetcher::open(&self.config).await?;
        let result = self.search_with(criteria, session.as_fetcher()).await;
        session.close().await;
        result
    }

    /// Search pipeline over a caller-provided fetcher session.
    pub async fn search_with(
        &self,
        criteria: &JobSearchCriteria,
        fetcher: &dyn PageFetcher,
    ) -> Result<Vec<Job>> {
        let scraper = JobBoardScraper::new(fetcher);
        let scraper_ref = &scraper;
        let query = criteria.query();
        let location = criteria.location().unwrap_or("");
        let page_delay = Duration::from_millis(self.config.scrape.page_delay_ms);

        let cards = collect_pages(criteria.limit(), linkedin::PAGE_SIZE, move |page| async move {
            if page > 0 {
                tokio::time::sleep(page_delay).await;
            }
            scraper_ref.fetch_cards(query, location, page).await
        })
        .await;

        let mut cards = dedup_by_key(cards, |c| (c.title.clone(), c.company.clone()));
        cards.truncate(criteria.limit());
        log::info!("Expanding {} job cards for '{query}'", cards.len());

        // Bounded-concurrency detail pass; `buffered` keeps the card order.
        let jobs: Vec<Job> = stream::iter(cards)
            .map(move |card| async move {
                let description = scraper_ref
                    .fetch_description(&card.url)
                    .await
                    .unwrap_or_else(|| DESCRIPTION_PLACEHOLDER.to_string());
                Job::from_card(card, description)
            })
            .buffered(self.config.scrape.max_concurrent)
            .collect()
            .await;

        Ok(apply_job_filters(jobs, criteria))
    }

    /// Look up one posting by id over a fresh fetcher session.
    pub async fn details(&self, job_id: &str) -> Result<Option<Job>> {
        let session = SessionFetcher::open(&self.config).await?;
        let result = self.details_with(job_id, session.as_fetcher()).await;
        session.close().await;
        result
    }

    /// Posting lookup over a caller-provided fetcher session.
    pub async fn details_with(
        &self,
        job_id: &str,
        fetcher: &dyn PageFetcher,
    ) -> Result<Option<Job>> {
        let native_id = parse_job_id(job_id)?;
        JobBoardScraper::new(fetcher).fetch_job(native_id).await
    }
}
