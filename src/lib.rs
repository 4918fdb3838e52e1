// src/lib.rs

//! careerscout library
//!
//! Scrapes a job board and several online-course marketplaces on request and
//! returns normalized listing records. Entry points live in [`services`];
//! site-specific field extraction is isolated in [`scrape`].

pub mod error;
pub mod fetch;
pub mod models;
pub mod pipeline;
pub mod scrape;
pub mod services;
pub mod utils;
