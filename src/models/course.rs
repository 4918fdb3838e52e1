//! Course listing data structures.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

use super::Source;

/// A normalized course listing.
///
/// Numeric fields are either a valid number or absent. A provider value that
/// fails to parse is mapped to `None`, never to zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Globally unique id, `<platform>_<native_id>`
    pub id: String,

    pub title: String,
    pub instructor: String,
    pub num_reviews: Option<u64>,
    pub rating: Option<f64>,
    pub students_count: Option<u64>,
    pub price: Option<f64>,
    pub original_price: Option<f64>,
    pub language: Option<String>,
    pub duration: Option<String>,
    pub level: Option<String>,
    pub url: String,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub source: Source,
}

/// Full course record returned by a detail lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseDetail {
    #[serde(flatten)]
    pub course: Course,

    /// Curriculum block as delivered by the provider
    pub curriculum: Option<serde_json::Value>,

    pub requirements: Option<Vec<String>>,
    pub objectives: Option<Vec<String>>,
}

/// Course platform selector for a search request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    All,
    Udemy,
    Coursera,
    Edx,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::All => "all",
            Platform::Udemy => "udemy",
            Platform::Coursera => "coursera",
            Platform::Edx => "edx",
        }
    }

    /// Concrete platforms covered by this selector, in fan-out order.
    pub fn expand(&self) -> &'static [Platform] {
        match self {
            Platform::All => &[Platform::Udemy, Platform::Coursera, Platform::Edx],
            Platform::Udemy => &[Platform::Udemy],
            Platform::Coursera => &[Platform::Coursera],
            Platform::Edx => &[Platform::Edx],
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Platform::All),
            "udemy" => Ok(Platform::Udemy),
            "coursera" => Ok(Platform::Coursera),
            "edx" => Ok(Platform::Edx),
            other => Err(AppError::validation(format!(
                "Platform must be one of: all, udemy, coursera, edx (got '{other}')"
            ))),
        }
    }
}
