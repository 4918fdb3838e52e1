// src/pipeline/filter.rs

//! Request-time predicate filters.
//!
//! Filters run over the already-fetched, already-limited result set. They
//! narrow only and never trigger additional fetches, so a filtered response
//! can hold fewer records than the requested limit.

use crate::models::{Course, CourseSearchCriteria, Job, JobSearchCriteria, PriceRange};

fn eq_ignore_case(value: Option<&str>, wanted: &str) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case(wanted))
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn job_matches(job: &Job, criteria: &JobSearchCriteria) -> bool {
    if let Some(level) = criteria.experience_level() {
        if !eq_ignore_case(job.experience_level.as_deref(), level) {
            return false;
        }
    }
    if let Some(job_type) = criteria.job_type() {
        if !eq_ignore_case(job.job_type.as_deref(), job_type) {
            return false;
        }
    }
    if let Some(location) = criteria.location() {
        if !contains_ignore_case(&job.location, location) {
            return false;
        }
    }
    true
}

/// Apply the criteria's optional job filters as a pure predicate pass.
pub fn apply_job_filters(jobs: Vec<Job>, criteria: &JobSearchCriteria) -> Vec<Job> {
    jobs.into_iter()
        .filter(|job| job_matches(job, criteria))
        .collect()
}

fn course_matches(course: &Course, criteria: &CourseSearchCriteria) -> bool {
    if let Some(level) = criteria.level() {
        if !eq_ignore_case(course.level.as_deref(), level) {
            return false;
        }
    }
    if let Some(language) = criteria.language() {
        let matches = course
            .language
            .as_deref()
            .is_some_and(|l| contains_ignore_case(l, language));
        if !matches {
            return false;
        }
    }
    match criteria.price_range() {
        PriceRange::All => true,
        PriceRange::Free => course.price.is_none_or(|p| p == 0.0),
        PriceRange::Paid => course.price.is_some_and(|p| p > 0.0),
    }
}

/// Apply the criteria's optional course filters as a pure predicate pass.
pub fn apply_course_filters(
    courses: Vec<Course>,
    criteria: &CourseSearchCriteria,
) -> Vec<Course> {
    courses
        .into_iter()
        .filter(|course| course_matches(course, criteria))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Platform, Source};

    fn job(location: &str) -> Job {
        Job {
            id: "1".to_string(),
            title: "Engineer".to_string(),
            company: "Acme".to_string(),
            location: location.to_string(),
            description: String::new(),
            url: String::new(),
            posted_date: None,
            experience_level: None,
            job_type: None,
            source: Source::Linkedin,
        }
    }

    fn course(language: Option<&str>, price: Option<f64>) -> Course {
        Course {
            id: "udemy_1".to_string(),
            title: "Course".to_string(),
            instructor: String::new(),
            num_reviews: None,
            rating: None,
            students_count: None,
            price,
            original_price: None,
            language: language.map(String::from),
            duration: None,
            level: None,
            url: String::new(),
            image_url: None,
            description: None,
            source: Source::Udemy,
        }
    }

    #[test]
    fn location_filter_narrows_below_limit() {
        let criteria = JobSearchCriteria::new("rust", Some("Recife"), 10).unwrap();
        let jobs = vec![
            job("Recife, Pernambuco"),
            job("São Paulo"),
            job("recife"),
            job("Lisboa"),
        ];
        let filtered = apply_job_filters(jobs, &criteria);
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn experience_filter_rejects_jobs_without_the_field() {
        // Listing cards never carry an experience level, so this filter can
        // empty the result set.
        let criteria = JobSearchCriteria::new("rust", None, 10)
            .unwrap()
            .with_experience_level("senior")
            .unwrap();
        let filtered = apply_job_filters(vec![job("anywhere")], &criteria);
        assert!(filtered.is_empty());
    }

    #[test]
    fn free_bucket_keeps_absent_prices() {
        let criteria = CourseSearchCriteria::new("rust", Platform::All, 10)
            .unwrap()
            .with_price_range(PriceRange::Free);
        let filtered = apply_course_filters(
            vec![
                course(None, None),
                course(None, Some(0.0)),
                course(None, Some(19.99)),
            ],
            &criteria,
        );
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn language_filter_is_substring_match() {
        let criteria = CourseSearchCriteria::new("rust", Platform::All, 10)
            .unwrap()
            .with_language("en");
        let filtered = apply_course_filters(
            vec![
                course(Some("English"), None),
                course(Some("Português"), None),
                course(None, None),
            ],
            &criteria,
        );
        assert_eq!(filtered.len(), 1);
    }
}
