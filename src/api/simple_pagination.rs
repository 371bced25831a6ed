// src/api/simple_pagination.rs
//! Cursor pagination over Notion list endpoints.

use super::types::{PaginatedResponse, PaginationResult};
use crate::constants::NOTION_API_PAGE_SIZE;
use crate::error::AppError;

/// Fetches all pages using async closures directly.
///
/// `fetch_fn` receives the page size and the cursor returned by the
/// previous page (`None` for the first request).
pub async fn fetch_all_pages_simple<T, F, Fut>(
    mut fetch_fn: F,
    max_pages: Option<u32>,
) -> Result<PaginationResult<T>, AppError>
where
    F: FnMut(u32, Option<String>) -> Fut,
    Fut: std::future::Future<Output = Result<PaginatedResponse<T>, AppError>>,
{
    let mut all_items = Vec::new();
    let mut cursor = None;
    let mut pages_fetched = 0u32;

    loop {
        if let Some(max) = max_pages {
            if pages_fetched >= max {
                log::debug!("Reached maximum page limit: {}", max);
                break;
            }
        }

        let response = fetch_fn(NOTION_API_PAGE_SIZE as u32, cursor).await?;

        let has_more = response.has_more;
        cursor = response.next_cursor;
        all_items.extend(response.results);
        pages_fetched += 1;

        if !has_more || cursor.is_none() {
            break;
        }
    }

    Ok(PaginationResult {
        items: all_items,
        pages_fetched,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn page(results: Vec<u32>, next: Option<&str>) -> PaginatedResponse<u32> {
        PaginatedResponse {
            object: "list".to_string(),
            results,
            next_cursor: next.map(str::to_string),
            has_more: next.is_some(),
        }
    }

    #[tokio::test]
    async fn follows_cursors_until_exhausted() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_in_fetch = Arc::clone(&seen);

        let result = fetch_all_pages_simple(
            move |page_size, cursor| {
                assert_eq!(page_size, 100);
                seen_in_fetch.lock().unwrap().push(cursor.clone());
                async move {
                    Ok(match cursor.as_deref() {
                        None => page(vec![1, 2], Some("c1")),
                        Some("c1") => page(vec![3], Some("c2")),
                        _ => page(vec![4], None),
                    })
                }
            },
            None,
        )
        .await
        .unwrap();

        assert_eq!(result.items, vec![1, 2, 3, 4]);
        assert_eq!(result.pages_fetched, 3);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![None, Some("c1".to_string()), Some("c2".to_string())]
        );
    }

    #[tokio::test]
    async fn respects_page_limit() {
        let result = fetch_all_pages_simple(
            |_, _| async { Ok(page(vec![7], Some("more"))) },
            Some(2),
        )
        .await
        .unwrap();
        assert_eq!(result.items, vec![7, 7]);
    }

    #[tokio::test]
    async fn propagates_errors() {
        let result: Result<PaginationResult<u32>, _> = fetch_all_pages_simple(
            |_, _| async { Err(AppError::InvalidInput("boom".into())) },
            None,
        )
        .await;
        assert!(result.is_err());
    }
}
