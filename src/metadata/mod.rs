pub mod duration;

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::warn;

use crate::api::{SearchHit, VideoItem, YouTubeApi};
use crate::error::Result;
use crate::search::filters::SortOrder;

/// The upstream's per-call limit on `videos.list` ids.
pub const BATCH_SIZE: usize = 50;

/// One row of the comparison grid: a search hit merged with its metadata
/// lookup. `selected` is mutable session state; everything else is fixed at
/// build time.
#[derive(Debug, Clone, Serialize)]
pub struct VideoRecord {
    pub id: String,
    pub thumbnail_url: String,
    pub title: String,
    pub channel_name: String,
    pub published_date: String,
    pub view_count: u64,
    pub comment_count: u64,
    pub duration_seconds: u64,
    pub url: String,
    #[serde(skip)]
    pub selected: bool,
}

impl VideoRecord {
    pub fn watch_url(id: &str) -> String {
        format!("https://www.youtube.com/watch?v={id}")
    }
}

/// Look up metadata for `ids`, batching into calls of at most [`BATCH_SIZE`].
/// Any failing batch aborts the whole join. Result order is whatever the
/// upstream returns; callers join by id.
pub fn fetch_metadata(api: &dyn YouTubeApi, ids: &[String]) -> Result<HashMap<String, VideoItem>> {
    let mut by_id = HashMap::with_capacity(ids.len());
    for chunk in ids.chunks(BATCH_SIZE) {
        for item in api.list_videos(chunk)? {
            by_id.insert(item.id.clone(), item);
        }
    }
    Ok(by_id)
}

/// Merge search hits with their metadata into flat records. Hits whose id is
/// missing from `metadata` are dropped; the count is logged so partial
/// upstream failures are at least visible. One record per unique video id:
/// pagination can surface the same video on more than one page, and only the
/// first occurrence counts.
pub fn build_records(
    hits: &[SearchHit],
    metadata: &HashMap<String, VideoItem>,
    order: SortOrder,
) -> Vec<VideoRecord> {
    let mut records = Vec::with_capacity(hits.len());
    let mut seen: HashSet<&str> = HashSet::with_capacity(hits.len());
    let mut dropped = 0usize;

    for hit in hits {
        let Some(vid) = hit.video_id() else { continue };
        if !seen.insert(vid) {
            continue;
        }
        let Some(item) = metadata.get(vid) else {
            dropped += 1;
            continue;
        };

        let sn = &item.snippet;
        records.push(VideoRecord {
            id: vid.to_string(),
            thumbnail_url: sn.thumbnail_url().to_string(),
            title: sn.title.clone(),
            channel_name: sn.channel_title.clone(),
            published_date: sn.published_at.chars().take(10).collect(),
            view_count: item.statistics.view_count(),
            comment_count: item.statistics.comment_count(),
            duration_seconds: duration::parse_iso8601(item.content_details.duration()),
            url: VideoRecord::watch_url(vid),
            selected: false,
        });
    }

    if dropped > 0 {
        warn!("{dropped} search hit(s) had no metadata and were dropped");
    }

    // Inherited quirk, preserved until product intent says otherwise:
    // descending only for the view-count sort, ascending for every other.
    match order {
        SortOrder::ViewCount => records.sort_by(|a, b| b.view_count.cmp(&a.view_count)),
        _ => records.sort_by(|a, b| a.view_count.cmp(&b.view_count)),
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use crate::api::{ContentDetails, PageQuery, SearchPage, Snippet, Statistics};

    struct CountingApi {
        items: Vec<VideoItem>,
        batch_sizes: RefCell<Vec<usize>>,
    }

    impl YouTubeApi for CountingApi {
        fn search_page(&self, _query: &PageQuery) -> Result<SearchPage> {
            Ok(SearchPage::default())
        }

        fn list_videos(&self, ids: &[String]) -> Result<Vec<VideoItem>> {
            self.batch_sizes.borrow_mut().push(ids.len());
            Ok(self
                .items
                .iter()
                .filter(|i| ids.contains(&i.id))
                .cloned()
                .collect())
        }
    }

    fn item(id: &str, views: u64, duration: &str) -> VideoItem {
        VideoItem {
            id: id.to_string(),
            snippet: Snippet {
                title: format!("title-{id}"),
                channel_title: "channel".to_string(),
                published_at: "2026-08-01T12:00:00Z".to_string(),
                ..Default::default()
            },
            content_details: ContentDetails {
                duration: Some(duration.to_string()),
            },
            statistics: Statistics {
                view_count: Some(views.to_string()),
                comment_count: None,
            },
        }
    }

    #[test]
    fn batches_never_exceed_fifty_ids() {
        let ids: Vec<String> = (0..120).map(|i| format!("vid{i:03}")).collect();
        let api = CountingApi {
            items: Vec::new(),
            batch_sizes: RefCell::new(Vec::new()),
        };
        fetch_metadata(&api, &ids).unwrap();
        assert_eq!(*api.batch_sizes.borrow(), vec![50, 50, 20]);
    }

    #[test]
    fn joins_by_id_and_drops_unresolved() {
        let hits = vec![
            SearchHit::from_video_id("a"),
            SearchHit::from_video_id("missing"),
            SearchHit::from_video_id("b"),
        ];
        let mut metadata = HashMap::new();
        metadata.insert("a".to_string(), item("a", 10, "PT45S"));
        metadata.insert("b".to_string(), item("b", 20, "PT1H2M10S"));

        let records = build_records(&hits, &metadata, SortOrder::Relevance);
        assert_eq!(records.len(), 2);
        assert!(records.len() <= hits.len());
        assert_eq!(records[0].duration_seconds, duration::parse_iso8601("PT45S"));
        assert_eq!(records[1].duration_seconds, duration::parse_iso8601("PT1H2M10S"));
        assert_eq!(records[0].url, "https://www.youtube.com/watch?v=a");
        assert_eq!(records[0].published_date, "2026-08-01");
        assert_eq!(records[0].comment_count, 0);
    }

    #[test]
    fn repeated_hits_collapse_to_one_record_per_video_id() {
        // The same video can come back on two different result pages.
        let hits = vec![
            SearchHit::from_video_id("a"),
            SearchHit::from_video_id("b"),
            SearchHit::from_video_id("a"),
        ];
        let mut metadata = HashMap::new();
        metadata.insert("a".to_string(), item("a", 10, "PT45S"));
        metadata.insert("b".to_string(), item("b", 20, "PT45S"));

        let records = build_records(&hits, &metadata, SortOrder::Relevance);
        assert_eq!(records.len(), 2);
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn view_count_order_sorts_descending() {
        let hits = vec![
            SearchHit::from_video_id("a"),
            SearchHit::from_video_id("b"),
            SearchHit::from_video_id("c"),
        ];
        let mut metadata = HashMap::new();
        metadata.insert("a".to_string(), item("a", 5, "PT10S"));
        metadata.insert("b".to_string(), item("b", 50, "PT10S"));
        metadata.insert("c".to_string(), item("c", 20, "PT10S"));

        let records = build_records(&hits, &metadata, SortOrder::ViewCount);
        let views: Vec<u64> = records.iter().map(|r| r.view_count).collect();
        assert_eq!(views, vec![50, 20, 5]);
    }

    #[test]
    fn other_orders_sort_ascending() {
        let hits = vec![SearchHit::from_video_id("a"), SearchHit::from_video_id("b")];
        let mut metadata = HashMap::new();
        metadata.insert("a".to_string(), item("a", 50, "PT10S"));
        metadata.insert("b".to_string(), item("b", 5, "PT10S"));

        let records = build_records(&hits, &metadata, SortOrder::Date);
        let views: Vec<u64> = records.iter().map(|r| r.view_count).collect();
        assert_eq!(views, vec![5, 50]);
    }
}
