// src/pipeline/paginate.rs

//! Page-collection loop shared by the job and course pipelines.

use crate::error::Result;

/// Drive `fetch_page` across successive pages until a result-count target is
/// met.
///
/// Stop conditions, in priority order:
/// 1. accumulated item count reaches `limit`;
/// 2. a fetched page yields zero items (end of results);
/// 3. the hard cap of `limit / page_size + 2` pages is reached.
///
/// A failed page counts as empty but does not stop the loop. Duplicates are
/// not collapsed here; pagination overlap is removed by a separate dedup
/// pass once all pages are collected.
pub async fn collect_pages<T, F, Fut>(limit: usize, page_size: usize, mut fetch_page: F) -> Vec<T>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    let max_pages = limit / page_size.max(1) + 2;
    let mut items = Vec::new();

    for page in 0..max_pages {
        if items.len() >= limit {
            break;
        }

        match fetch_page(page).await {
            Ok(page_items) if page_items.is_empty() => {
                log::debug!("Page {page} returned no items, assuming end of results");
                break;
            }
            Ok(page_items) => items.extend(page_items),
            Err(error) => {
                log::warn!("Page {page} failed, treating as empty: {error}");
            }
        }
    }

    items
}
