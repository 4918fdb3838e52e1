// src/scrape/linkedin.rs

//! Job-board guest-search scraper.
//!
//! Extracts job cards from the public guest-search listing endpoint and
//! long-form descriptions from individual posting pages. Every field is
//! optional: a missing sub-element defaults the field instead of failing
//! the parse.

use scraper::{ElementRef, Html};

use crate::error::Result;
use crate::fetch::PageFetcher;
use crate::models::{Job, JobCard, Source};
use crate::utils::encode_query;

use super::selector;

/// Cards per listing page, fixed by the site.
pub const PAGE_SIZE: usize = 25;

const SEARCH_URL: &str =
    "https://www.linkedin.com/jobs-guest/jobs/api/seeMoreJobPostings/search";
const VIEW_URL: &str = "https://www.linkedin.com/jobs/view";

/// Listing-page URL for one result page (0-based).
pub fn listing_url(query: &str, location: &str, page: usize) -> String {
    format!(
        "{SEARCH_URL}?keywords={}&location={}&start={}",
        encode_query(query),
        encode_query(location),
        page * PAGE_SIZE
    )
}

/// Canonical detail-page URL for a native job id.
pub fn view_url(job_id: &str) -> String {
    format!("{VIEW_URL}/{job_id}/")
}

/// Scraper over one fetcher session.
pub struct JobBoardScraper<'a> {
    fetcher: &'a dyn PageFetcher,
}

impl<'a> JobBoardScraper<'a> {
    pub fn new(fetcher: &'a dyn PageFetcher) -> Self {
        Self { fetcher }
    }

    /// Fetch and parse one listing page. A fetch failure propagates so the
    /// paginator can count the page as empty.
    pub async fn fetch_cards(
        &self,
        query: &str,
        location: &str,
        page: usize,
    ) -> Result<Vec<JobCard>> {
        let html = self.fetcher.fetch(&listing_url(query, location, page)).await?;
        parse_job_cards(&html)
    }

    /// Fetch the long-form description for one card. Degrades to `None` on
    /// any failure; the caller substitutes a placeholder.
    pub async fn fetch_description(&self, url: &str) -> Option<String> {
        if url.is_empty() {
            return None;
        }
        match self.fetcher.fetch(url).await {
            Ok(html) => parse_job_description(&html).ok().flatten(),
            Err(error) => {
                log::warn!("Detail fetch failed for {url}: {error}");
                None
            }
        }
    }

    /// Fetch one posting page directly by native id. `None` when the page
    /// comes back without any recognizable posting content.
    pub async fn fetch_job(&self, job_id: &str) -> Result<Option<Job>> {
        let url = view_url(job_id);
        let html = match self.fetcher.fetch(&url).await {
            Ok(html) => html,
            Err(error) => {
                log::warn!("Posting fetch failed for {url}: {error}");
                return Ok(None);
            }
        };
        parse_posting_page(&html, job_id)
    }
}

/// Extract job cards from a listing page.
pub fn parse_job_cards(html: &str) -> Result<Vec<JobCard>> {
    let document = Html::parse_document(html);

    let card_sel = selector("div.base-card")?;
    let info_sel = selector("div.base-search-card__info")?;
    let title_sel = selector("h3")?;
    let company_sel = selector("a.hidden-nested-link")?;
    let location_sel = selector("span.job-search-card__location")?;
    let date_sel = selector(
        "time.job-search-card__listdate, time.job-search-card__listdate--new",
    )?;

    let mut cards = Vec::new();
    for container in document.select(&card_sel) {
        let Some(info) = container.select(&info_sel).next() else {
            continue;
        };

        // Native id comes from the container's entity URN; its last `:`
        // segment is the numeric posting id.
        let native_id = container
            .value()
            .attr("data-entity-urn")
            .and_then(|urn| urn.rsplit(':').next())
            .unwrap_or("")
            .to_string();

        // Cards without a native id keep a synthetic index-based id so the
        // page's card count stays intact for pagination accounting. Such
        // ids are not stable across pages.
        let (id, url) = if native_id.is_empty() {
            (format!("job_{}", cards.len()), String::new())
        } else {
            let url = view_url(&native_id);
            (native_id, url)
        };

        let posted_date = info
            .select(&date_sel)
            .next()
            .and_then(|el| el.value().attr("datetime"))
            .unwrap_or("")
            .to_string();

        cards.push(JobCard {
            id,
            title: text_of(info.select(&title_sel).next()),
            company: text_of(info.select(&company_sel).next()),
            location: text_of(info.select(&location_sel).next()),
            posted_date,
            url,
        });
    }
    Ok(cards)
}

/// Extract the long-form description from a posting page.
pub fn parse_job_description(html: &str) -> Result<Option<String>> {
    let document = Html::parse_document(html);
    let description_sel = selector("div.description__text")?;

    let description = document.select(&description_sel).next().map(|el| {
        el.text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    });
    Ok(description.filter(|d| !d.is_empty()))
}

/// Extract a full job record from a posting page.
fn parse_posting_page(html: &str, job_id: &str) -> Result<Option<Job>> {
    let document = Html::parse_document(html);

    let title_sel = selector("h1.top-card-layout__title, h1.topcard__title")?;
    let company_sel = selector("a.topcard__org-name-link")?;
    let location_sel = selector("span.topcard__flavor--bullet")?;

    let title = text_of(document.select(&title_sel).next());
    let description = parse_job_description(html)?;

    if title.is_empty() && description.is_none() {
        return Ok(None);
    }

    Ok(Some(Job {
        id: job_id.to_string(),
        title,
        company: text_of(document.select(&company_sel).next()),
        location: text_of(document.select(&location_sel).next()),
        description: description.unwrap_or_default(),
        url: view_url(job_id),
        posted_date: None,
        experience_level: None,
        job_type: None,
        source: Source::Linkedin,
    }))
}

fn text_of(element: Option<ElementRef<'_>>) -> String {
    element
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING_PAGE: &str = r#"
        <ul>
          <li>
            <div class="base-card" data-entity-urn="urn:li:jobPosting:4001">
              <div class="base-search-card__info">
                <h3> Data Engineer </h3>
                <a class="hidden-nested-link">Acme Corp</a>
                <span class="job-search-card__location">Recife, Pernambuco</span>
                <time class="job-search-card__listdate" datetime="2025-06-01">1 week ago</time>
              </div>
            </div>
          </li>
          <li>
            <div class="base-card">
              <div class="base-search-card__info">
                <h3>Untracked Role</h3>
              </div>
            </div>
          </li>
          <li>
            <div class="base-card" data-entity-urn="urn:li:jobPosting:4002">
              <div class="base-search-card__info">
                <h3>Backend Developer</h3>
                <a class="hidden-nested-link">Globex</a>
                <time class="job-search-card__listdate--new" datetime="2025-06-03">new</time>
              </div>
            </div>
          </li>
        </ul>
    "#;

    #[test]
    fn parses_complete_card() {
        let cards = parse_job_cards(LISTING_PAGE).unwrap();
        assert_eq!(cards.len(), 3);

        let first = &cards[0];
        assert_eq!(first.id, "4001");
        assert_eq!(first.title, "Data Engineer");
        assert_eq!(first.company, "Acme Corp");
        assert_eq!(first.location, "Recife, Pernambuco");
        assert_eq!(first.posted_date, "2025-06-01");
        assert_eq!(first.url, "https://www.linkedin.com/jobs/view/4001/");
    }

    #[test]
    fn card_without_id_gets_synthetic_id_and_empty_url() {
        let cards = parse_job_cards(LISTING_PAGE).unwrap();
        assert_eq!(cards[1].id, "job_1");
        assert!(cards[1].url.is_empty());
        assert!(cards[1].company.is_empty());
        assert!(cards[1].location.is_empty());
    }

    #[test]
    fn new_style_date_tag_is_read() {
        let cards = parse_job_cards(LISTING_PAGE).unwrap();
        assert_eq!(cards[2].posted_date, "2025-06-03");
    }

    #[test]
    fn empty_page_yields_no_cards() {
        let cards = parse_job_cards("<html><body></body></html>").unwrap();
        assert!(cards.is_empty());
    }

    #[test]
    fn description_text_is_joined_and_trimmed() {
        let html = r#"
            <div class="description__text">
              <p> We build pipelines. </p>
              <p>Requirements: Rust.</p>
            </div>
        "#;
        let description = parse_job_description(html).unwrap().unwrap();
        assert_eq!(description, "We build pipelines.\nRequirements: Rust.");
    }

    #[test]
    fn missing_description_is_none() {
        assert_eq!(parse_job_description("<div>nothing here</div>").unwrap(), None);
    }

    #[test]
    fn posting_page_without_content_is_none() {
        let job = parse_posting_page("<html><body>blocked</body></html>", "4001").unwrap();
        assert!(job.is_none());
    }

    #[test]
    fn posting_page_parses_top_card() {
        let html = r#"
            <h1 class="top-card-layout__title">Data Engineer</h1>
            <a class="topcard__org-name-link">Acme Corp</a>
            <span class="topcard__flavor--bullet">Recife</span>
            <div class="description__text">Build pipelines.</div>
        "#;
        let job = parse_posting_page(html, "4001").unwrap().unwrap();
        assert_eq!(job.title, "Data Engineer");
        assert_eq!(job.company, "Acme Corp");
        assert_eq!(job.description, "Build pipelines.");
        assert_eq!(job.source, Source::Linkedin);
    }

    #[test]
    fn listing_url_encodes_parameters() {
        let url = listing_url("data engineer", "São Paulo", 2);
        assert!(url.contains("keywords=data+engineer"));
        assert!(url.contains("start=50"));
    }
}
