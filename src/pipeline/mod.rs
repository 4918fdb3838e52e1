// src/pipeline/mod.rs

//! Domain-independent pipeline stages.
//!
//! Each search composes these in order: paginate, deduplicate, expand
//! details, rank, filter. The stages know nothing about any provider.

mod dedup;
mod filter;
mod paginate;
mod rank;

pub use dedup::dedup_by_key;
pub use filter::{apply_course_filters, apply_job_filters};
pub use paginate::collect_pages;
pub use rank::rank_courses;
