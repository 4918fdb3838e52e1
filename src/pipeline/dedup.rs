// src/pipeline/dedup.rs

//! Key-based record deduplication.

/// Collapse records sharing a key: stable sort by key, then keep the first
/// occurrence of each key.
///
/// Exact match only; near-duplicate text is intentionally not merged.
pub fn dedup_by_key<T, K, F>(mut items: Vec<T>, key: F) -> Vec<T>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    items.sort_by(|a, b| key(a).cmp(&key(b)));
    items.dedup_by(|a, b| key(a) == key(b));
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::JobCard;

    fn card(id: &str, title: &str, company: &str) -> JobCard {
        JobCard {
            id: id.to_string(),
            title: title.to_string(),
            company: company.to_string(),
            location: String::new(),
            posted_date: String::new(),
            url: String::new(),
        }
    }

    #[test]
    fn collapses_identical_title_and_company() {
        let cards = vec![
            card("1", "Rust Developer", "Acme"),
            card("2", "Rust Developer", "Acme"),
            card("3", "Rust Developer", "Globex"),
        ];
        let deduped = dedup_by_key(cards, |c| (c.title.clone(), c.company.clone()));
        assert_eq!(deduped.len(), 2);
    }

    #[test]
    fn keeps_first_occurrence() {
        let deduped = dedup_by_key(
            vec![card("first", "Engineer", "Acme"), card("second", "Engineer", "Acme")],
            |c| (c.title.clone(), c.company.clone()),
        );
        assert_eq!(deduped[0].id, "first");
    }

    #[test]
    fn same_title_different_company_survives() {
        let deduped = dedup_by_key(
            vec![card("1", "Engineer", "Acme"), card("2", "Engineer", "Globex")],
            |c| (c.title.clone(), c.company.clone()),
        );
        assert_eq!(deduped.len(), 2);
    }
}
