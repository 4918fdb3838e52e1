// src/scrape/edx.rs

//! Course marketplace search client (public catalog API).
//!
//! Search only; detail lookups resolve to not-found at the service layer.

use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;
use crate::fetch::PageFetcher;
use crate::models::{Course, Source};
use crate::utils::encode_query;

use super::price_from_value;

const SEARCH_URL: &str = "https://www.edx.org/api/v1/search/catalog/";
const SITE_URL: &str = "https://www.edx.org";

/// Search client over one fetcher session.
pub struct EdxClient<'a> {
    fetcher: &'a dyn PageFetcher,
}

impl<'a> EdxClient<'a> {
    pub fn new(fetcher: &'a dyn PageFetcher) -> Self {
        Self { fetcher }
    }

    /// Run one search call with the limit as the page size.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<Course>> {
        let url = format!(
            "{SEARCH_URL}?q={}&page=1&page_size={limit}",
            encode_query(query)
        );
        let body = self.fetcher.fetch(&url).await?;
        parse_search_response(&body)
    }
}

#[derive(Debug, Deserialize, Default)]
struct SearchResponse {
    #[serde(default)]
    objects: Objects,
}

#[derive(Debug, Deserialize, Default)]
struct Objects {
    #[serde(default)]
    results: Vec<ApiCourse>,
}

#[derive(Debug, Deserialize)]
struct ApiCourse {
    key: Option<String>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    staff: Vec<String>,
    rating: Option<f64>,
    enrollment_count: Option<u64>,
    price: Option<Value>,
    language: Option<String>,
    effort: Option<String>,
    level: Option<String>,
    url: Option<String>,
    image: Option<ApiImage>,
    short_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiImage {
    src: Option<String>,
}

fn parse_search_response(body: &str) -> Result<Vec<Course>> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response
        .objects
        .results
        .into_iter()
        .filter_map(map_course)
        .collect())
}

fn map_course(api: ApiCourse) -> Option<Course> {
    let native_key = api.key?;

    Some(Course {
        id: format!("edx_{native_key}"),
        title: api.title,
        instructor: api.staff.join(", "),
        num_reviews: None,
        rating: api.rating,
        students_count: api.enrollment_count,
        price: price_from_value(api.price.as_ref()),
        original_price: None,
        language: api.language,
        duration: api.effort,
        level: api.level,
        url: api
            .url
            .map(|path| format!("{SITE_URL}{path}"))
            .unwrap_or_default(),
        image_url: api.image.and_then(|i| i.src),
        description: api.short_description,
        source: Source::Edx,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_provider_fields_onto_course() {
        let body = r#"{
            "objects": {
                "results": [
                    {
                        "key": "MITx+6.0001x",
                        "title": "Introduction to CS",
                        "staff": ["Ana Bell"],
                        "enrollment_count": 250000,
                        "price": "49.00",
                        "language": "English",
                        "effort": "9 weeks",
                        "level": "Introductory",
                        "url": "/course/introduction-to-cs",
                        "image": {"src": "https://img.example/e.jpg"},
                        "short_description": "CS with Python"
                    }
                ]
            }
        }"#;
        let courses = parse_search_response(body).unwrap();
        assert_eq!(courses.len(), 1);

        let course = &courses[0];
        assert_eq!(course.id, "edx_MITx+6.0001x");
        assert_eq!(course.price, Some(49.0));
        assert_eq!(course.url, "https://www.edx.org/course/introduction-to-cs");
        assert_eq!(course.source, Source::Edx);
    }

    #[test]
    fn result_without_key_is_skipped() {
        let body = r#"{"objects": {"results": [{"title": "No key"}]}}"#;
        assert!(parse_search_response(body).unwrap().is_empty());
    }
}
