//! Job listing data structures.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Source;

/// Partial record extracted from one card on a search-results page.
///
/// Lives only inside a pipeline invocation: it is either expanded into a
/// [`Job`] during the detail pass or dropped by deduplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobCard {
    /// Platform-assigned identifier, or a synthetic `job_<index>` when the
    /// card carried none
    pub id: String,

    /// Listing title
    pub title: String,

    /// Hiring organization
    pub company: String,

    /// Location text as shown on the card
    pub location: String,

    /// Posted date in platform-native format
    pub posted_date: String,

    /// Canonical detail-page URL; empty when no platform id could be derived
    pub url: String,
}

/// A normalized job listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub url: String,

    /// Posted date, absent when the platform string could not be parsed
    pub posted_date: Option<NaiveDate>,

    pub experience_level: Option<String>,
    pub job_type: Option<String>,
    pub source: Source,
}

impl Job {
    /// Build a normalized job from a card and its expanded description.
    pub fn from_card(card: JobCard, description: String) -> Self {
        let posted_date = crate::utils::parse_listing_date(&card.posted_date);
        Self {
            id: card.id,
            title: card.title,
            company: card.company,
            location: card.location,
            description,
            url: card.url,
            posted_date,
            experience_level: None,
            job_type: None,
            source: Source::Linkedin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_card_parses_iso_date() {
        let card = JobCard {
            id: "123".to_string(),
            title: "Data Engineer".to_string(),
            company: "Acme".to_string(),
            location: "Recife".to_string(),
            posted_date: "2025-06-01".to_string(),
            url: "https://example.com/jobs/view/123/".to_string(),
        };
        let job = Job::from_card(card, "desc".to_string());
        assert_eq!(job.posted_date, NaiveDate::from_ymd_opt(2025, 6, 1));
        assert_eq!(job.source, Source::Linkedin);
    }

    #[test]
    fn from_card_keeps_unparseable_date_absent() {
        let card = JobCard {
            id: "job_0".to_string(),
            title: "t".to_string(),
            company: String::new(),
            location: String::new(),
            posted_date: "3 days ago".to_string(),
            url: String::new(),
        };
        let job = Job::from_card(card, String::new());
        assert!(job.posted_date.is_none());
    }
}
