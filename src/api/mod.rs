pub mod data_api;

use serde::Deserialize;

use crate::error::Result;

/// One page worth of search parameters. Every page of a search carries the
/// same filter values; only `page_token` and `max_results` (the remaining
/// count, capped at the per-page limit) change between pages.
#[derive(Debug, Clone)]
pub struct PageQuery {
    pub keyword: Option<String>,
    pub order: String,
    pub published_after: Option<String>,
    pub video_duration: String,
    pub max_results: u64,
    pub page_token: Option<String>,
}

/// The two Data API calls the tool makes. Implemented over HTTP by
/// [`data_api::DataApiClient`]; tests substitute their own implementation.
pub trait YouTubeApi {
    /// One page of `search.list` results.
    fn search_page(&self, query: &PageQuery) -> Result<SearchPage>;

    /// `videos.list` for up to 50 ids (snippet, contentDetails, statistics).
    fn list_videos(&self, ids: &[String]) -> Result<Vec<VideoItem>>;
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    #[serde(default)]
    pub items: Vec<SearchHit>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub id: SearchHitId,
}

impl SearchHit {
    /// Convenience for building a hit from a bare video id.
    pub fn from_video_id(id: &str) -> Self {
        SearchHit {
            id: SearchHitId {
                video_id: Some(id.to_string()),
            },
        }
    }

    pub fn video_id(&self) -> Option<&str> {
        self.id.video_id.as_deref()
    }
}

/// `search.list` can return channels and playlists too; those carry no
/// `videoId` and are skipped downstream.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHitId {
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoItem {
    pub id: String,
    #[serde(default)]
    pub snippet: Snippet,
    #[serde(default)]
    pub content_details: ContentDetails,
    #[serde(default)]
    pub statistics: Statistics,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub channel_title: String,
    #[serde(default)]
    pub published_at: String,
    #[serde(default)]
    pub thumbnails: Thumbnails,
}

impl Snippet {
    pub fn thumbnail_url(&self) -> &str {
        self.thumbnails
            .default
            .as_ref()
            .map(|t| t.url.as_str())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Thumbnails {
    pub default: Option<Thumbnail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnail {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDetails {
    /// ISO-8601 duration, e.g. "PT1H2M10S". Absent for upcoming streams.
    pub duration: Option<String>,
}

impl ContentDetails {
    pub fn duration(&self) -> &str {
        self.duration.as_deref().unwrap_or("PT0S")
    }
}

/// Statistics come back as decimal strings, and either count can be absent
/// (comments disabled, views hidden). Absent means zero here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub view_count: Option<String>,
    pub comment_count: Option<String>,
}

impl Statistics {
    pub fn view_count(&self) -> u64 {
        parse_count(self.view_count.as_deref())
    }

    pub fn comment_count(&self) -> u64 {
        parse_count(self.comment_count.as_deref())
    }
}

fn parse_count(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.parse().ok()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statistics_default_to_zero() {
        let stats = Statistics {
            view_count: Some("1234".into()),
            comment_count: None,
        };
        assert_eq!(stats.view_count(), 1234);
        assert_eq!(stats.comment_count(), 0);
    }

    #[test]
    fn deserializes_search_page() {
        let json = r#"{
            "items": [
                {"id": {"kind": "youtube#video", "videoId": "abc123def45"}},
                {"id": {"kind": "youtube#channel", "channelId": "UCxyz"}}
            ],
            "nextPageToken": "CAUQAA"
        }"#;
        let page: SearchPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].video_id(), Some("abc123def45"));
        assert_eq!(page.items[1].video_id(), None);
        assert_eq!(page.next_page_token.as_deref(), Some("CAUQAA"));
    }

    #[test]
    fn deserializes_video_item_with_missing_fields() {
        let json = r#"{"items": [{"id": "abc123def45", "snippet": {"title": "t"}}]}"#;
        let resp: VideoListResponse = serde_json::from_str(json).unwrap();
        let item = &resp.items[0];
        assert_eq!(item.content_details.duration(), "PT0S");
        assert_eq!(item.statistics.view_count(), 0);
        assert_eq!(item.snippet.thumbnail_url(), "");
    }
}
