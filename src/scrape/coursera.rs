// src/scrape/coursera.rs

//! Course marketplace search client (public JSON API).
//!
//! Search only: the platform's detail API needs an entitlement this client
//! does not carry, so detail lookups resolve to not-found at the service
//! layer.

use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;
use crate::fetch::PageFetcher;
use crate::models::{Course, Source};
use crate::utils::encode_query;

use super::price_from_value;

const SEARCH_URL: &str = "https://www.coursera.org/api/searchQuery";
const LEARN_URL: &str = "https://www.coursera.org/learn";

/// Search client over one fetcher session.
pub struct CourseraClient<'a> {
    fetcher: &'a dyn PageFetcher,
}

impl<'a> CourseraClient<'a> {
    pub fn new(fetcher: &'a dyn PageFetcher) -> Self {
        Self { fetcher }
    }

    /// Run one search call. The API takes the limit directly, so no
    /// pagination loop is needed.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<Course>> {
        let url = format!(
            "{SEARCH_URL}?query={}&start=0&limit={limit}",
            encode_query(query)
        );
        let body = self.fetcher.fetch(&url).await?;
        parse_search_response(&body)
    }
}

#[derive(Debug, Deserialize, Default)]
struct SearchResponse {
    #[serde(default)]
    linked: Linked,
}

#[derive(Debug, Deserialize, Default)]
struct Linked {
    #[serde(rename = "onDemandCourses", default)]
    on_demand_courses: OnDemandCourses,
}

#[derive(Debug, Deserialize, Default)]
struct OnDemandCourses {
    #[serde(default)]
    v1: Vec<ApiCourse>,
}

#[derive(Debug, Deserialize)]
struct ApiCourse {
    id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(rename = "instructorIds", default)]
    instructor_ids: Vec<String>,
    #[serde(rename = "averageFiveStarRating")]
    average_five_star_rating: Option<f64>,
    #[serde(rename = "enrolledLearnersCount")]
    enrolled_learners_count: Option<u64>,
    price: Option<Value>,
    language: Option<String>,
    duration: Option<String>,
    level: Option<String>,
    slug: Option<String>,
    #[serde(rename = "photoUrl")]
    photo_url: Option<String>,
    description: Option<String>,
}

fn parse_search_response(body: &str) -> Result<Vec<Course>> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response
        .linked
        .on_demand_courses
        .v1
        .into_iter()
        .filter_map(map_course)
        .collect())
}

fn map_course(api: ApiCourse) -> Option<Course> {
    let native_id = api.id?;

    Some(Course {
        id: format!("coursera_{native_id}"),
        title: api.name,
        instructor: api.instructor_ids.join(", "),
        num_reviews: None,
        rating: api.average_five_star_rating,
        students_count: api.enrolled_learners_count,
        price: price_from_value(api.price.as_ref()),
        original_price: None,
        language: api.language,
        duration: api.duration,
        level: api.level,
        url: api
            .slug
            .map(|slug| format!("{LEARN_URL}/{slug}"))
            .unwrap_or_default(),
        image_url: api.photo_url,
        description: api.description,
        source: Source::Coursera,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_provider_fields_onto_course() {
        let body = r#"{
            "linked": {
                "onDemandCourses": {
                    "v1": [
                        {
                            "id": "abc-123",
                            "name": "Rust Fundamentals",
                            "instructorIds": ["77", "78"],
                            "averageFiveStarRating": 4.6,
                            "enrolledLearnersCount": 12000,
                            "language": "en",
                            "slug": "rust-fundamentals",
                            "photoUrl": "https://img.example/c.jpg",
                            "description": "Learn the basics"
                        }
                    ]
                }
            }
        }"#;
        let courses = parse_search_response(body).unwrap();
        assert_eq!(courses.len(), 1);

        let course = &courses[0];
        assert_eq!(course.id, "coursera_abc-123");
        assert_eq!(course.instructor, "77, 78");
        assert_eq!(course.rating, Some(4.6));
        assert_eq!(course.url, "https://www.coursera.org/learn/rust-fundamentals");
        assert_eq!(course.source, Source::Coursera);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        assert!(parse_search_response("{}").unwrap().is_empty());
        assert!(parse_search_response(r#"{"linked": {}}"#).unwrap().is_empty());
    }
}
