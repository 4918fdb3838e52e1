// src/pipeline/rank.rs

//! Ranking of concatenated course results.

use std::cmp::Ordering;

use crate::models::Course;

fn descending_rating(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn descending_reviews(a: Option<u64>, b: Option<u64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable multi-key descending sort by (rating, review count), then truncate
/// to `limit`.
///
/// Courses without a rating are not dropped, only sorted to the end. Ties
/// keep their original relative order, so the udemy/coursera/edx fan-out
/// order survives ranking.
pub fn rank_courses(mut courses: Vec<Course>, limit: usize) -> Vec<Course> {
    courses.sort_by(|a, b| {
        descending_rating(a.rating, b.rating)
            .then_with(|| descending_reviews(a.num_reviews, b.num_reviews))
    });
    courses.truncate(limit);
    courses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Source;

    fn course(id: &str, rating: Option<f64>, num_reviews: Option<u64>) -> Course {
        Course {
            id: id.to_string(),
            title: format!("Course {id}"),
            instructor: String::new(),
            num_reviews,
            rating,
            students_count: None,
            price: None,
            original_price: None,
            language: None,
            duration: None,
            level: None,
            url: String::new(),
            image_url: None,
            description: None,
            source: Source::Udemy,
        }
    }

    #[test]
    fn sorts_by_rating_with_nulls_last() {
        let ranked = rank_courses(
            vec![
                course("a", Some(4.8), Some(10)),
                course("b", None, Some(999)),
                course("c", Some(4.2), None),
                course("d", Some(4.8), Some(10)),
            ],
            10,
        );
        let ids: Vec<&str> = ranked.iter().map(|c| c.id.as_str()).collect();
        // The two 4.8s keep their original relative order.
        assert_eq!(ids, vec!["a", "d", "c", "b"]);
    }

    #[test]
    fn review_count_breaks_rating_ties() {
        let ranked = rank_courses(
            vec![
                course("few", Some(4.5), Some(3)),
                course("many", Some(4.5), Some(300)),
                course("none", Some(4.5), None),
            ],
            10,
        );
        let ids: Vec<&str> = ranked.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["many", "few", "none"]);
    }

    #[test]
    fn truncates_to_limit() {
        let ranked = rank_courses(
            (0..10).map(|i| course(&i.to_string(), None, None)).collect(),
            3,
        );
        assert_eq!(ranked.len(), 3);
    }
}
