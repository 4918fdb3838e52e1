// src/models/mod.rs

//! Domain models for the careerscout application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod course;
mod criteria;
mod job;

use std::fmt;

use serde::{Deserialize, Serialize};

// Re-export all public types
pub use config::{Config, FetchBackend, HttpConfig, ScrapeConfig, ServiceConfig};
pub use course::{Course, CourseDetail, Platform};
pub use criteria::{CourseSearchCriteria, JobSearchCriteria, PriceRange};
pub use job::{Job, JobCard};

/// Site a normalized record was scraped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Linkedin,
    Udemy,
    Coursera,
    Edx,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Linkedin => "linkedin",
            Source::Udemy => "udemy",
            Source::Coursera => "coursera",
            Source::Edx => "edx",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
