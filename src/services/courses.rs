// src/services/courses.rs

//! Course search pipeline service.
//!
//! Fans a search out across the selected platforms, merges the results, and
//! ranks the merged set before filtering. A single failing platform is
//! logged and skipped so the others still answer.

use std::sync::Arc;
use std::time::Duration;

use crate::error::{AppError, Result};
use crate::fetch::PageFetcher;
use crate::models::{Config, Course, CourseDetail, CourseSearchCriteria, Platform};
use crate::pipeline::{apply_course_filters, collect_pages, dedup_by_key, rank_courses};
use crate::scrape::coursera::CourseraClient;
use crate::scrape::edx::EdxClient;
use crate::scrape::udemy::{self, UdemyClient};

use super::{SessionFetcher, Throttle};

fn parse_course_id(course_id: &str) -> Result<(Platform, &str)> {
    let invalid = || {
        AppError::validation(format!(
            "Invalid course id '{course_id}', expected <platform>_<native_id>"
        ))
    };
    let (prefix, native_id) = course_id.split_once('_').ok_or_else(invalid)?;
    let platform = prefix.parse::<Platform>().map_err(|_| invalid())?;
    if platform == Platform::All || native_id.is_empty() {
        return Err(invalid());
    }
    Ok((platform, native_id))
}

/// Course search and lookup across the supported marketplaces.
pub struct CourseService {
    config: Arc<Config>,
    throttle: Throttle,
}

impl CourseService {
    pub fn new(config: Arc<Config>) -> Self {
        let throttle = Throttle::new(&config.service);
        Self { config, throttle }
    }

    /// Run one throttled search over a fresh HTTP session. The browser
    /// backend is never used here: the course providers are JSON APIs and
    /// need the bypass headers only an HTTP session can attach.
    pub async fn search(&self, criteria: &CourseSearchCriteria) -> Result<Vec<Course>> {
        self.throttle.wait().await;
        let session = SessionFetcher::open_http(&self.config)?;
        let result = self.search_with(criteria, session.as_fetcher()).await;
        session.close().await;
        result
    }

    /// Search pipeline over a caller-provided fetcher session.
    pub async fn search_with(
        &self,
        criteria: &CourseSearchCriteria,
        fetcher: &dyn PageFetcher,
    ) -> Result<Vec<Course>> {
        let mut merged = Vec::new();

        for platform in criteria.platform().expand() {
            let fetched = match platform {
                Platform::Udemy => Ok(self.collect_udemy(criteria, fetcher).await),
                Platform::Coursera => {
                    CourseraClient::new(fetcher)
                        .search(criteria.query(), criteria.limit())
                        .await
                }
                Platform::Edx => {
                    EdxClient::new(fetcher)
                        .search(criteria.query(), criteria.limit())
                        .await
                }
                Platform::All => continue,
            };

            match fetched {
                Ok(courses) => {
                    log::info!("{platform}: {} results for '{}'", courses.len(), criteria.query());
                    // Dedup targets pagination overlap, so it runs inside
                    // each platform batch. The same title on two platforms
                    // is two distinct listings and survives the merge.
                    merged.extend(dedup_by_key(courses, |c| {
                        (c.title.clone(), c.instructor.clone())
                    }));
                }
                Err(error) => log::warn!("{platform} search failed, skipping: {error}"),
            }
        }

        let ranked = rank_courses(merged, criteria.limit());
        Ok(apply_course_filters(ranked, criteria))
    }

    async fn collect_udemy(
        &self,
        criteria: &CourseSearchCriteria,
        fetcher: &dyn PageFetcher,
    ) -> Vec<Course> {
        let client = UdemyClient::new(fetcher);
        let client_ref = &client;
        let query = criteria.query();
        let page_delay = Duration::from_millis(self.config.scrape.page_delay_ms);

        collect_pages(criteria.limit(), udemy::PAGE_SIZE, move |page| async move {
            if page > 0 {
                tokio::time::sleep(page_delay).await;
            }
            client_ref.fetch_page(query, page).await
        })
        .await
    }

    /// Look up one course by prefixed id over a fresh HTTP session.
    pub async fn details(&self, course_id: &str) -> Result<Option<CourseDetail>> {
        let session = SessionFetcher::open_http(&self.config)?;
        let result = self.details_with(course_id, session.as_fetcher()).await;
        session.close().await;
        result
    }

    /// Course lookup over a caller-provided fetcher session.
    ///
    /// Only the udemy detail API is reachable without credentials; ids for
    /// the other platforms resolve to `None`.
    pub async fn details_with(
        &self,
        course_id: &str,
        fetcher: &dyn PageFetcher,
    ) -> Result<Option<CourseDetail>> {
        let (platform, native_id) = parse_course_id(course_id)?;
        match platform {
            Platform::Udemy => UdemyClient::new(fetcher).fetch_detail(native_id).await,
            _ => {
                log::info!("Detail lookups are not available for {platform}");
                Ok(None)
            }
        }
    }
}
