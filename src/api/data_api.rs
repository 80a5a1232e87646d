use std::time::Duration;

use crate::error::{Error, Result};

use super::{PageQuery, SearchPage, VideoItem, VideoListResponse, YouTubeApi};

const SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";
const VIDEOS_URL: &str = "https://www.googleapis.com/youtube/v3/videos";

/// Blocking client for the YouTube Data API v3. Both endpoints run on a fixed
/// 20-second socket timeout and fail outright on expiry.
pub struct DataApiClient {
    api_key: String,
    client: reqwest::blocking::Client,
}

impl DataApiClient {
    pub fn new(api_key: String) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(20))
            .build()?;
        Ok(Self { api_key, client })
    }

    fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let resp = self.client.get(url).query(params).send()?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(Error::Upstream { status, body });
        }
        Ok(resp.json()?)
    }
}

impl YouTubeApi for DataApiClient {
    fn search_page(&self, query: &PageQuery) -> Result<SearchPage> {
        let mut params: Vec<(&str, String)> = vec![
            ("part", "snippet".to_string()),
            ("type", "video".to_string()),
            ("maxResults", query.max_results.to_string()),
            ("order", query.order.clone()),
            ("videoDuration", query.video_duration.clone()),
            ("key", self.api_key.clone()),
        ];
        if let Some(ref q) = query.keyword {
            params.push(("q", q.clone()));
        }
        if let Some(ref after) = query.published_after {
            params.push(("publishedAfter", after.clone()));
        }
        if let Some(ref token) = query.page_token {
            params.push(("pageToken", token.clone()));
        }

        self.get_json(SEARCH_URL, &params)
    }

    fn list_videos(&self, ids: &[String]) -> Result<Vec<VideoItem>> {
        let params: Vec<(&str, String)> = vec![
            ("part", "snippet,contentDetails,statistics".to_string()),
            ("id", ids.join(",")),
            ("key", self.api_key.clone()),
        ];

        let resp: VideoListResponse = self.get_json(VIDEOS_URL, &params)?;
        Ok(resp.items)
    }
}
