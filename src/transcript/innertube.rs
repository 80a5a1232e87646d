use regex::Regex;
use serde_json::Value;

use super::{CaptionTrack, Segment, TrackList, TranscriptError, TranscriptSource};

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";
const PLAYER_URL: &str = "https://www.youtube.com/youtubei/v1/player?key=";
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Transcript access through YouTube's InnerTube player endpoint: fetch the
/// watch page, lift the InnerTube API key out of it, ask the player endpoint
/// for the caption track list, then pull individual tracks as json3.
///
/// No request timeout here — a long transcript batch is allowed to take as
/// long as it takes.
pub struct InnertubeClient {
    client: reqwest::blocking::Client,
}

impl InnertubeClient {
    pub fn new() -> Result<Self, crate::error::Error> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(None::<std::time::Duration>)
            .build()?;
        Ok(Self { client })
    }

    fn get_text(&self, url: &str) -> Result<String, TranscriptError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| TranscriptError::Fetch(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(TranscriptError::Fetch(format!("request returned {status}")));
        }
        resp.text().map_err(|e| TranscriptError::Fetch(e.to_string()))
    }

    fn fetch_player_response(&self, video_id: &str, api_key: &str) -> Result<Value, TranscriptError> {
        let body = serde_json::json!({
            "context": {
                "client": { "clientName": "ANDROID", "clientVersion": "20.10.38" }
            },
            "videoId": video_id,
        });

        let resp = self
            .client
            .post(format!("{PLAYER_URL}{api_key}"))
            .json(&body)
            .send()
            .map_err(|e| TranscriptError::Fetch(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(TranscriptError::Fetch(format!(
                "player endpoint returned {status}"
            )));
        }
        resp.json().map_err(|e| TranscriptError::Fetch(e.to_string()))
    }
}

impl TranscriptSource for InnertubeClient {
    fn list_tracks(&self, video_id: &str) -> Result<TrackList, TranscriptError> {
        let html = self.get_text(&format!("{WATCH_URL}{video_id}"))?;

        if html.contains("class=\"g-recaptcha\"") {
            return Err(TranscriptError::Fetch(
                "YouTube is asking for a captcha from this IP".to_string(),
            ));
        }

        let api_key = extract_innertube_api_key(&html).ok_or_else(|| {
            TranscriptError::Fetch(format!("could not locate InnerTube API key for {video_id}"))
        })?;

        let player = self.fetch_player_response(video_id, &api_key)?;
        parse_caption_tracks(video_id, &player)
    }

    fn fetch_track(&self, track: &CaptionTrack) -> Result<Vec<Segment>, TranscriptError> {
        let url = format!("{}&fmt=json3", track.base_url);
        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| TranscriptError::Fetch(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(TranscriptError::Fetch(format!(
                "caption track returned {status}"
            )));
        }
        let body: Value = resp.json().map_err(|e| TranscriptError::Fetch(e.to_string()))?;
        Ok(parse_json3_events(&body))
    }
}

fn extract_innertube_api_key(html: &str) -> Option<String> {
    let re = Regex::new(r#""INNERTUBE_API_KEY":\s*"([a-zA-Z0-9_-]+)""#).ok()?;
    re.captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

fn parse_caption_tracks(video_id: &str, player: &Value) -> Result<TrackList, TranscriptError> {
    let renderer = player
        .get("captions")
        .and_then(|c| c.get("playerCaptionsTracklistRenderer"))
        .ok_or_else(|| TranscriptError::Disabled(video_id.to_string()))?;

    let mut tracks = Vec::new();
    if let Some(arr) = renderer.get("captionTracks").and_then(|t| t.as_array()) {
        for caption in arr {
            let Some(language_code) = caption.get("languageCode").and_then(|v| v.as_str()) else {
                continue;
            };
            let Some(base_url) = caption.get("baseUrl").and_then(|v| v.as_str()) else {
                continue;
            };

            let language = caption
                .get("name")
                .and_then(|n| n.get("runs"))
                .and_then(|r| r.as_array())
                .and_then(|arr| arr.first())
                .and_then(|r| r.get("text"))
                .and_then(|t| t.as_str())
                .unwrap_or(language_code);

            let is_generated = caption
                .get("kind")
                .and_then(|k| k.as_str())
                .map(|k| k == "asr")
                .unwrap_or(false);

            tracks.push(CaptionTrack {
                language_code: language_code.to_string(),
                language: language.to_string(),
                is_generated,
                base_url: base_url.replace("&fmt=srv3", ""),
            });
        }
    }

    if tracks.is_empty() {
        return Err(TranscriptError::NotFound(video_id.to_string()));
    }
    Ok(TrackList { tracks })
}

fn parse_json3_events(body: &Value) -> Vec<Segment> {
    let mut segments = Vec::new();
    let Some(events) = body.get("events").and_then(|e| e.as_array()) else {
        return segments;
    };

    for event in events {
        let Some(segs) = event.get("segs").and_then(|s| s.as_array()) else {
            continue;
        };
        let text: String = segs
            .iter()
            .filter_map(|s| s.get("utf8").and_then(|u| u.as_str()))
            .collect();
        let text = text.trim();
        if text.is_empty() {
            continue;
        }

        segments.push(Segment {
            text: text.replace('\n', " "),
            start: event.get("tStartMs").and_then(|v| v.as_f64()).unwrap_or(0.0) / 1000.0,
            duration: event
                .get("dDurationMs")
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0)
                / 1000.0,
        });
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_innertube_api_key() {
        let html = r#"..."INNERTUBE_API_KEY": "AIzaSyAO_x-y_z123",..."#;
        assert_eq!(
            extract_innertube_api_key(html).as_deref(),
            Some("AIzaSyAO_x-y_z123")
        );
        assert_eq!(extract_innertube_api_key("<html></html>"), None);
    }

    #[test]
    fn missing_renderer_means_disabled() {
        let player = serde_json::json!({ "videoDetails": {} });
        match parse_caption_tracks("vid", &player) {
            Err(TranscriptError::Disabled(id)) => assert_eq!(id, "vid"),
            other => panic!("expected Disabled, got {other:?}"),
        }
    }

    #[test]
    fn parses_tracks_in_listing_order() {
        let player = serde_json::json!({
            "captions": {
                "playerCaptionsTracklistRenderer": {
                    "captionTracks": [
                        {
                            "baseUrl": "https://yt/api/timedtext?a=1&fmt=srv3",
                            "languageCode": "en",
                            "kind": "asr",
                            "name": { "runs": [{ "text": "English (auto-generated)" }] }
                        },
                        {
                            "baseUrl": "https://yt/api/timedtext?a=2",
                            "languageCode": "ko",
                            "name": { "runs": [{ "text": "Korean" }] }
                        }
                    ]
                }
            }
        });
        let list = parse_caption_tracks("vid", &player).unwrap();
        assert_eq!(list.tracks.len(), 2);
        assert!(list.tracks[0].is_generated);
        assert_eq!(list.tracks[0].base_url, "https://yt/api/timedtext?a=1");
        assert!(!list.tracks[1].is_generated);
        assert_eq!(list.manual("ko").unwrap().language, "Korean");
        assert_eq!(list.first_generated().unwrap().language_code, "en");
    }

    #[test]
    fn empty_track_array_means_not_found() {
        let player = serde_json::json!({
            "captions": { "playerCaptionsTracklistRenderer": { "audioTracks": [] } }
        });
        assert!(matches!(
            parse_caption_tracks("vid", &player),
            Err(TranscriptError::NotFound(_))
        ));
    }

    #[test]
    fn parses_json3_events() {
        let body = serde_json::json!({
            "events": [
                { "tStartMs": 0, "dDurationMs": 1500,
                  "segs": [{ "utf8": "hello " }, { "utf8": "there" }] },
                { "tStartMs": 1500, "aAppend": 1 },
                { "tStartMs": 3000, "dDurationMs": 2000, "segs": [{ "utf8": "\n" }] },
                { "tStartMs": 5000, "dDurationMs": 1000, "segs": [{ "utf8": "world" }] }
            ]
        });
        let segments = parse_json3_events(&body);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "hello there");
        assert_eq!(segments[0].start, 0.0);
        assert_eq!(segments[1].text, "world");
        assert_eq!(segments[1].start, 5.0);
        assert_eq!(segments[1].duration, 1.0);
    }
}
