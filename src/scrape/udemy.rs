// src/scrape/udemy.rs

//! Course marketplace API client (cloud-protected).
//!
//! The marketplace sits behind a cloud-protection layer that rejects bare
//! API calls. Requests are shaped to look like the site's own search page:
//! a pinned browser identity plus a Referer built from the URL-encoded
//! query.

use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;
use crate::fetch::{Header, PageFetcher};
use crate::models::{Course, CourseDetail, Source};
use crate::utils::encode_query;

use super::{price_from_value, string_list};

/// Courses per API page, fixed by the platform.
pub const PAGE_SIZE: usize = 12;

const API_URL: &str = "https://www.udemy.com/api-2.0";
const SITE_URL: &str = "https://www.udemy.com";

/// Browser identity the protection layer accepts.
const BYPASS_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/127.0.0.0 Safari/537.36";

fn bypass_headers(referer: String) -> Vec<Header> {
    vec![
        ("Accept", "application/json, text/plain, */*".to_string()),
        ("Accept-Language", "en-US,en;q=0.9".to_string()),
        ("Referer", referer),
        ("Cache-Control", "no-cache".to_string()),
        ("Pragma", "no-cache".to_string()),
        ("User-Agent", BYPASS_USER_AGENT.to_string()),
    ]
}

/// API client over one fetcher session.
pub struct UdemyClient<'a> {
    fetcher: &'a dyn PageFetcher,
}

impl<'a> UdemyClient<'a> {
    pub fn new(fetcher: &'a dyn PageFetcher) -> Self {
        Self { fetcher }
    }

    /// Fetch and decode one search page (0-based). A failure propagates so
    /// the paginator can count the page as empty.
    pub async fn fetch_page(&self, query: &str, page: usize) -> Result<Vec<Course>> {
        let encoded = encode_query(query);
        let api_page = page + 1; // the API is 1-based
        let url = format!("{API_URL}/search-courses/?src=ukw&q={encoded}&p={api_page}");
        let referer = format!("{SITE_URL}/courses/search/?q={encoded}&src=ukw&p={api_page}");

        let body = self
            .fetcher
            .fetch_with_headers(&url, &bypass_headers(referer))
            .await?;
        parse_search_response(&body)
    }

    /// Fetch a full course record by native id. `None` when the platform
    /// has nothing usable for that id.
    pub async fn fetch_detail(&self, native_id: &str) -> Result<Option<CourseDetail>> {
        let url = format!("{API_URL}/courses/{native_id}/");
        let referer = format!("{SITE_URL}/course/{native_id}/");

        let body = match self
            .fetcher
            .fetch_with_headers(&url, &bypass_headers(referer))
            .await
        {
            Ok(body) => body,
            Err(error) => {
                log::warn!("Course detail fetch failed for {native_id}: {error}");
                return Ok(None);
            }
        };
        Ok(parse_detail_response(&body, native_id))
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    courses: Vec<ApiCourse>,
}

#[derive(Debug, Deserialize)]
struct ApiCourse {
    id: Option<u64>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    visible_instructors: Vec<ApiInstructor>,
    num_reviews: Option<u64>,
    rating: Option<f64>,
    num_students: Option<u64>,
    price: Option<Value>,
    price_detail: Option<ApiPriceDetail>,
    lang_s: Option<String>,
    content_info: Option<String>,
    instructional_level: Option<String>,
    url: Option<String>,
    image_480x270: Option<String>,
    headline: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct ApiInstructor {
    #[serde(default)]
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct ApiPriceDetail {
    list_price: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ApiCourseDetail {
    #[serde(default)]
    title: String,
    #[serde(default)]
    visible_instructors: Vec<ApiInstructor>,
    num_reviews: Option<u64>,
    rating: Option<f64>,
    num_students: Option<u64>,
    price: Option<Value>,
    price_detail: Option<ApiPriceDetail>,
    locale: Option<ApiLocale>,
    content_info: Option<String>,
    instructional_level: Option<String>,
    url: Option<String>,
    image_480x270: Option<String>,
    description: Option<String>,
    curriculum: Option<Value>,
    requirements: Option<Value>,
    objectives: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ApiLocale {
    title: Option<String>,
}

fn parse_search_response(body: &str) -> Result<Vec<Course>> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response
        .courses
        .into_iter()
        .filter_map(map_course)
        .collect())
}

fn map_course(api: ApiCourse) -> Option<Course> {
    let Some(native_id) = api.id else {
        log::debug!("Skipping course card without an id: {}", api.title);
        return None;
    };

    Some(Course {
        id: format!("udemy_{native_id}"),
        title: api.title,
        instructor: api
            .visible_instructors
            .first()
            .map(|i| i.display_name.clone())
            .unwrap_or_default(),
        num_reviews: api.num_reviews,
        rating: api.rating,
        students_count: api.num_students,
        price: price_from_value(api.price.as_ref()),
        original_price: price_from_value(
            api.price_detail.as_ref().and_then(|d| d.list_price.as_ref()),
        ),
        language: api.lang_s,
        duration: api.content_info,
        level: api.instructional_level,
        url: api
            .url
            .map(|path| format!("{SITE_URL}{path}"))
            .unwrap_or_default(),
        image_url: api.image_480x270,
        description: api.headline,
        source: Source::Udemy,
    })
}

fn parse_detail_response(body: &str, native_id: &str) -> Option<CourseDetail> {
    let api: ApiCourseDetail = match serde_json::from_str(body) {
        Ok(api) => api,
        Err(error) => {
            log::warn!("Course detail decode failed for {native_id}: {error}");
            return None;
        }
    };

    Some(CourseDetail {
        course: Course {
            id: format!("udemy_{native_id}"),
            title: api.title,
            instructor: api
                .visible_instructors
                .first()
                .map(|i| i.display_name.clone())
                .unwrap_or_default(),
            num_reviews: api.num_reviews,
            rating: api.rating,
            students_count: api.num_students,
            price: price_from_value(api.price.as_ref()),
            original_price: price_from_value(
                api.price_detail.as_ref().and_then(|d| d.list_price.as_ref()),
            ),
            language: api.locale.and_then(|l| l.title),
            duration: api.content_info,
            level: api.instructional_level,
            url: api
                .url
                .map(|path| format!("{SITE_URL}{path}"))
                .unwrap_or_default(),
            image_url: api.image_480x270,
            description: api.description,
            source: Source::Udemy,
        },
        curriculum: api.curriculum,
        requirements: string_list(api.requirements),
        objectives: string_list(api.objectives),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_BODY: &str = r#"{
        "courses": [
            {
                "id": 567828,
                "title": "The Complete Rust Course",
                "visible_instructors": [{"display_name": "Jane Doe"}],
                "num_reviews": 1234,
                "rating": 4.7,
                "num_students": 50000,
                "price": "R$ 79,90",
                "price_detail": {"list_price": 199.90},
                "lang_s": "English",
                "content_info": "12 total hours",
                "instructional_level": "Beginner",
                "url": "/course/complete-rust/",
                "image_480x270": "https://img.example/1.jpg",
                "headline": "Learn Rust from scratch"
            },
            {
                "title": "Card with no id"
            }
        ]
    }"#;

    #[test]
    fn maps_provider_fields_onto_course() {
        let courses = parse_search_response(SEARCH_BODY).unwrap();
        assert_eq!(courses.len(), 1);

        let course = &courses[0];
        assert_eq!(course.id, "udemy_567828");
        assert_eq!(course.instructor, "Jane Doe");
        assert_eq!(course.price, Some(79.90));
        assert_eq!(course.original_price, Some(199.90));
        assert_eq!(course.url, "https://www.udemy.com/course/complete-rust/");
        assert_eq!(course.source, Source::Udemy);
    }

    #[test]
    fn empty_course_array_is_ok() {
        assert!(parse_search_response(r#"{"courses": []}"#).unwrap().is_empty());
        assert!(parse_search_response("{}").unwrap().is_empty());
    }

    #[test]
    fn malformed_body_is_an_error() {
        assert!(parse_search_response("<html>blocked</html>").is_err());
    }

    #[test]
    fn detail_response_keeps_curriculum_raw() {
        let body = r#"{
            "title": "The Complete Rust Course",
            "locale": {"title": "English (US)"},
            "curriculum": [{"title": "Intro", "items": 4}],
            "objectives": ["Write Rust programs"]
        }"#;
        let detail = parse_detail_response(body, "567828").unwrap();
        assert_eq!(detail.course.id, "udemy_567828");
        assert_eq!(detail.course.language.as_deref(), Some("English (US)"));
        assert!(detail.curriculum.is_some());
        assert_eq!(detail.objectives.unwrap(), vec!["Write Rust programs"]);
    }
}
