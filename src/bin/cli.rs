//! careerscout CLI
//!
//! Local execution entry point. Results are printed as pretty JSON on
//! stdout; logs go to stderr.

use std::path::PathBuf;
use std::sync::Arc;

use careerscout::{
    error::Result,
    models::{Config, CourseSearchCriteria, JobSearchCriteria, Platform, PriceRange},
    services::{CourseService, JobService},
};
use clap::{Parser, Subcommand};
use serde::Serialize;

/// careerscout - job and course search scraper
#[derive(Parser, Debug)]
#[command(
    name = "careerscout",
    version,
    about = "Searches a job board and online-course marketplaces"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "careerscout.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search job listings
    SearchJobs {
        /// Search keywords
        query: String,

        /// Location filter (substring match)
        #[arg(short, long)]
        location: Option<String>,

        /// Maximum number of results (clamped to 1..=50)
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: usize,

        /// Experience level filter (entry, associate, senior, ...)
        #[arg(long)]
        experience_level: Option<String>,

        /// Employment type filter (full-time, part-time, contract, ...)
        #[arg(long)]
        job_type: Option<String>,
    },

    /// Search courses across marketplaces
    SearchCourses {
        /// Search keywords
        query: String,

        /// Platform to search: all, udemy, coursera, edx
        #[arg(short, long, default_value = "all")]
        platform: String,

        /// Maximum number of results (clamped to 1..=50)
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: usize,

        /// Difficulty filter: beginner, intermediate, advanced, all
        #[arg(long)]
        level: Option<String>,

        /// Language filter (substring match)
        #[arg(long)]
        language: Option<String>,

        /// Price filter: all, free, paid
        #[arg(long)]
        price_range: Option<String>,
    },

    /// Look up one job posting by id
    Job {
        /// Posting id, bare or `linkedin_` prefixed
        id: String,
    },

    /// Look up one course by prefixed id (e.g. udemy_567828)
    Course {
        /// Course id, `<platform>_<native_id>`
        id: String,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);
    config.validate()?;
    let config = Arc::new(config);

    match cli.command {
        Command::SearchJobs {
            query,
            location,
            limit,
            experience_level,
            job_type,
        } => {
            let mut criteria = JobSearchCriteria::new(&query, location.as_deref(), limit)?;
            if let Some(level) = experience_level {
                criteria = criteria.with_experience_level(&level)?;
            }
            if let Some(job_type) = job_type {
                criteria = criteria.with_job_type(&job_type)?;
            }

            let jobs = JobService::new(config).search(&criteria).await?;
            log::info!("Found {} jobs for '{query}'", jobs.len());
            print_json(&jobs)?;
        }

        Command::SearchCourses {
            query,
            platform,
            limit,
            level,
            language,
            price_range,
        } => {
            let platform = platform.parse::<Platform>()?;
            let mut criteria = CourseSearchCriteria::new(&query, platform, limit)?;
            if let Some(level) = level {
                criteria = criteria.with_level(&level)?;
            }
            if let Some(language) = language {
                criteria = criteria.with_language(&language);
            }
            if let Some(price_range) = price_range {
                criteria = criteria.with_price_range(price_range.parse::<PriceRange>()?);
            }

            let courses = CourseService::new(config).search(&criteria).await?;
            log::info!("Found {} courses for '{query}'", courses.len());
            print_json(&courses)?;
        }

        Command::Job { id } => {
            match JobService::new(config).details(&id).await? {
                Some(job) => print_json(&job)?,
                None => log::warn!("No job found for id '{id}'"),
            }
        }

        Command::Course { id } => {
            match CourseService::new(config).details(&id).await? {
                Some(detail) => print_json(&detail)?,
                None => log::warn!("No course details available for id '{id}'"),
            }
        }

        Command::Validate => {
            log::info!("Configuration at {} is valid", cli.config.display());
        }
    }

    Ok(())
}
