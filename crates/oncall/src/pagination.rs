//! Offset/limit pagination shared by every list operation.
//!
//! The backend pages results by a numeric starting position and a fixed
//! page size. These helpers hide that protocol from the operations: each
//! call owns its own offset counter, fetches pages strictly in sequence,
//! and stops at the first empty page. There is no iteration cap beyond
//! exhaustion; termination relies on the backend reporting an empty final
//! page.

use std::future::Future;

use crate::backends::ProviderError;

/// Fixed page size requested from the backend.
pub(crate) const PAGE_LIMIT: u32 = 100;

/// Fetch pages at `offset`, `offset + PAGE_LIMIT`, ... and concatenate
/// them until the backend returns an empty page.
pub(crate) async fn fetch_all<T, F, Fut>(mut fetch_page: F) -> Result<Vec<T>, ProviderError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Vec<T>, ProviderError>>,
{
    let mut items = Vec::new();
    let mut offset = 0;
    loop {
        let page = fetch_page(offset).await?;
        if page.is_empty() {
            break;
        }
        items.extend(page);
        offset += PAGE_LIMIT;
    }
    Ok(items)
}

/// Walk pages until `probe` yields a value for some item, or the backend
/// reports an empty page. Pages after the first hit are never fetched.
pub(crate) async fn find_first<T, R, F, Fut, P>(
    mut fetch_page: F,
    mut probe: P,
) -> Result<Option<R>, ProviderError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Vec<T>, ProviderError>>,
    P: FnMut(&T) -> Option<R>,
{
    let mut offset = 0;
    loop {
        let page = fetch_page(offset).await?;
        if page.is_empty() {
            return Ok(None);
        }
        for item in &page {
            if let Some(found) = probe(item) {
                return Ok(Some(found));
            }
        }
        offset += PAGE_LIMIT;
    }
}
