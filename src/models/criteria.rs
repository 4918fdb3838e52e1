//! Validated search criteria.
//!
//! Criteria are immutable value objects: validation and clamping happen at
//! construction, and pipelines only read from them.

use std::str::FromStr;

use crate::error::{AppError, Result};

use super::Platform;

/// Result-count bounds applied to every search.
const LIMIT_MIN: usize = 1;
const LIMIT_MAX: usize = 50;

const EXPERIENCE_LEVELS: &[&str] = &[
    "entry",
    "entry level",
    "associate",
    "mid-senior",
    "senior",
    "executive",
    "director",
    "internship",
];

const JOB_TYPES: &[&str] = &[
    "full-time",
    "part-time",
    "contract",
    "temporary",
    "internship",
];

const COURSE_LEVELS: &[&str] = &["beginner", "intermediate", "advanced", "all"];

fn validated_query(query: &str) -> Result<String> {
    let trimmed = query.trim();
    if trimmed.chars().count() < 2 {
        return Err(AppError::validation(
            "Query must be at least 2 characters long",
        ));
    }
    Ok(trimmed.to_string())
}

fn validated_choice(value: &str, allowed: &[&str], field: &str) -> Result<String> {
    let lowered = value.to_ascii_lowercase();
    if allowed.contains(&lowered.as_str()) {
        Ok(lowered)
    } else {
        Err(AppError::validation(format!(
            "{field} must be one of: {}",
            allowed.join(", ")
        )))
    }
}

/// Criteria for one job search.
#[derive(Debug, Clone)]
pub struct JobSearchCriteria {
    query: String,
    location: Option<String>,
    limit: usize,
    experience_level: Option<String>,
    job_type: Option<String>,
}

impl JobSearchCriteria {
    /// Build criteria. The query must be at least 2 characters after
    /// trimming; `limit` is clamped to [1, 50].
    pub fn new(query: &str, location: Option<&str>, limit: usize) -> Result<Self> {
        Ok(Self {
            query: validated_query(query)?,
            location: location
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(String::from),
            limit: limit.clamp(LIMIT_MIN, LIMIT_MAX),
            experience_level: None,
            job_type: None,
        })
    }

    /// Restrict results to one experience level.
    pub fn with_experience_level(mut self, level: &str) -> Result<Self> {
        self.experience_level = Some(validated_choice(
            level,
            EXPERIENCE_LEVELS,
            "Experience level",
        )?);
        Ok(self)
    }

    /// Restrict results to one employment type.
    pub fn with_job_type(mut self, job_type: &str) -> Result<Self> {
        self.job_type = Some(validated_choice(job_type, JOB_TYPES, "Job type")?);
        Ok(self)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn experience_level(&self) -> Option<&str> {
        self.experience_level.as_deref()
    }

    pub fn job_type(&self) -> Option<&str> {
        self.job_type.as_deref()
    }
}

/// Price bucket filter for course searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceRange {
    #[default]
    All,
    Free,
    Paid,
}

impl FromStr for PriceRange {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(PriceRange::All),
            "free" => Ok(PriceRange::Free),
            "paid" => Ok(PriceRange::Paid),
            _ => Err(AppError::validation(
                "Price range must be one of: all, free, paid",
            )),
        }
    }
}

/// Criteria for one course search.
#[derive(Debug, Clone)]
pub struct CourseSearchCriteria {
    query: String,
    platform: Platform,
    limit: usize,
    level: Option<String>,
    language: Option<String>,
    price_range: PriceRange,
}

impl CourseSearchCriteria {
    /// Build criteria. Same query/limit rules as for jobs.
    pub fn new(query: &str, platform: Platform, limit: usize) -> Result<Self> {
        Ok(Self {
            query: validated_query(query)?,
            platform,
            limit: limit.clamp(LIMIT_MIN, LIMIT_MAX),
            level: None,
            language: None,
            price_range: PriceRange::All,
        })
    }

    /// Restrict results to one difficulty level ("all" disables the filter).
    pub fn with_level(mut self, level: &str) -> Result<Self> {
        let level = validated_choice(level, COURSE_LEVELS, "Level")?;
        self.level = (level != "all").then_some(level);
        Ok(self)
    }

    /// Restrict results to languages containing this substring.
    pub fn with_language(mut self, language: &str) -> Self {
        let trimmed = language.trim();
        if !trimmed.is_empty() {
            self.language = Some(trimmed.to_string());
        }
        self
    }

    /// Restrict results to a price bucket.
    pub fn with_price_range(mut self, price_range: PriceRange) -> Self {
        self.price_range = price_range;
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn level(&self) -> Option<&str> {
        self.level.as_deref()
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn price_range(&self) -> PriceRange {
        self.price_range
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_must_have_two_characters() {
        assert!(JobSearchCriteria::new(" r ", None, 10).is_err());
        assert!(JobSearchCriteria::new("rust", None, 10).is_ok());
    }

    #[test]
    fn query_length_counts_characters_not_bytes() {
        // "é" is two bytes but one character.
        assert!(JobSearchCriteria::new("é", None, 10).is_err());
        assert!(JobSearchCriteria::new("éé", None, 10).is_ok());
    }

    #[test]
    fn limit_is_clamped() {
        let low = JobSearchCriteria::new("rust", None, 0).unwrap();
        assert_eq!(low.limit(), 1);
        let high = CourseSearchCriteria::new("rust", Platform::All, 500).unwrap();
        assert_eq!(high.limit(), 50);
    }

    #[test]
    fn experience_level_vocabulary_is_enforced() {
        let criteria = JobSearchCriteria::new("rust", None, 10).unwrap();
        assert!(criteria.clone().with_experience_level("Senior").is_ok());
        assert!(criteria.with_experience_level("wizard").is_err());
    }

    #[test]
    fn blank_location_is_dropped() {
        let criteria = JobSearchCriteria::new("rust", Some("  "), 10).unwrap();
        assert!(criteria.location().is_none());
    }

    #[test]
    fn level_all_disables_filter() {
        let criteria = CourseSearchCriteria::new("rust", Platform::Udemy, 10)
            .unwrap()
            .with_level("all")
            .unwrap();
        assert!(criteria.level().is_none());
    }

    #[test]
    fn price_range_from_str() {
        assert_eq!("free".parse::<PriceRange>().unwrap(), PriceRange::Free);
        assert!("cheap".parse::<PriceRange>().is_err());
    }
}
