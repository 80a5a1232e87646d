pub mod filters;

use chrono::{SecondsFormat, Utc};
use tracing::debug;

use crate::api::{PageQuery, SearchHit, YouTubeApi};
use crate::error::Result;
use filters::SearchFilter;

/// The upstream's own per-page maximum for `search.list`.
pub const PAGE_SIZE: u64 = 50;

/// Run a paginated search, following the continuation token until either the
/// token runs out or `max_results` hits have accumulated.
///
/// A failed page request aborts the whole search; there is no partial-result
/// fallback. Zero hits is an `Ok(empty)` outcome, not an error — the caller
/// owes the user a distinct "no results" message for it.
pub fn run_search(api: &dyn YouTubeApi, filter: &SearchFilter) -> Result<Vec<SearchHit>> {
    let published_after = filter
        .period
        .published_after(Utc::now())
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true));

    let mut hits: Vec<SearchHit> = Vec::new();
    let mut page_token: Option<String> = None;

    loop {
        let remaining = filter.max_results - hits.len() as u64;
        let query = PageQuery {
            keyword: filter.keyword.clone(),
            order: filter.order.api_value().to_string(),
            published_after: published_after.clone(),
            video_duration: filter.duration.api_value().to_string(),
            max_results: remaining.min(PAGE_SIZE),
            page_token: page_token.clone(),
        };

        let page = api.search_page(&query)?;
        debug!(
            "search page returned {} hits (token: {:?})",
            page.items.len(),
            page.next_page_token
        );
        let contributed = page.items.len();
        hits.extend(page.items);

        // An empty page with a continuation token would otherwise loop forever.
        match page.next_page_token {
            Some(token) if contributed > 0 && (hits.len() as u64) < filter.max_results => {
                page_token = Some(token);
            }
            _ => break,
        }
    }

    hits.truncate(filter.max_results as usize);
    Ok(hits)
}
