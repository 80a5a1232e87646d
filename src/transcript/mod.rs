pub mod innertube;

use serde::Serialize;
use tracing::{debug, warn};

use crate::metadata::VideoRecord;

/// Preferred transcript languages, tried in order against manually-created
/// tracks before falling back to any auto-generated one.
pub const DEFAULT_LANGUAGE_PRIORITY: [&str; 3] = ["ko", "ja", "en"];

/// Placeholder text when a video has no transcript at all.
pub const NO_TRANSCRIPT_SENTINEL: &str = "(자막 없음)";

/// One available caption stream for a video.
#[derive(Debug, Clone)]
pub struct CaptionTrack {
    pub language_code: String,
    pub language: String,
    /// True for auto-generated (ASR) tracks.
    pub is_generated: bool,
    pub base_url: String,
}

/// Caption tracks in the order the platform lists them. Order matters: the
/// generated-track fallback takes the first one listed, whatever its language.
#[derive(Debug, Clone, Default)]
pub struct TrackList {
    pub tracks: Vec<CaptionTrack>,
}

impl TrackList {
    pub fn manual(&self, lang: &str) -> Option<&CaptionTrack> {
        self.tracks
            .iter()
            .find(|t| !t.is_generated && t.language_code == lang)
    }

    pub fn first_generated(&self) -> Option<&CaptionTrack> {
        self.tracks.iter().find(|t| t.is_generated)
    }
}

#[derive(Debug, Clone)]
pub struct Segment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    #[error("transcripts are disabled for video {0}")]
    Disabled(String),
    #[error("no transcript available for video {0}")]
    NotFound(String),
    #[error("{0}")]
    Fetch(String),
}

/// Transcript access for a single video. Implemented over HTTP by
/// [`innertube::InnertubeClient`]; tests substitute their own implementation.
pub trait TranscriptSource {
    fn list_tracks(&self, video_id: &str) -> Result<TrackList, TranscriptError>;
    fn fetch_track(&self, track: &CaptionTrack) -> Result<Vec<Segment>, TranscriptError>;
}

/// What happened for one video, as data rather than control flow.
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptOutcome {
    Found { language: String, text: String },
    NotFound,
    Errored { message: String },
}

/// One collected transcript. The text may be a sentinel when the video had no
/// transcript or the fetch failed. Lives only for the export session.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptRecord {
    pub title: String,
    pub url: String,
    pub text: String,
}

/// Resolve one video: manually-created track in priority-language order first,
/// then the first auto-generated track in listing order regardless of
/// language.
pub fn fetch_one(
    source: &dyn TranscriptSource,
    video_id: &str,
    priority: &[&str],
) -> TranscriptOutcome {
    let tracks = match source.list_tracks(video_id) {
        Ok(t) => t,
        Err(TranscriptError::Disabled(_)) | Err(TranscriptError::NotFound(_)) => {
            return TranscriptOutcome::NotFound;
        }
        Err(e) => {
            return TranscriptOutcome::Errored {
                message: e.to_string(),
            };
        }
    };

    let track = priority
        .iter()
        .copied()
        .find_map(|lang| tracks.manual(lang))
        .or_else(|| tracks.first_generated());

    let Some(track) = track else {
        return TranscriptOutcome::NotFound;
    };

    match source.fetch_track(track) {
        Ok(segments) => TranscriptOutcome::Found {
            language: track.language_code.clone(),
            text: segments
                .iter()
                .map(|s| s.text.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        },
        Err(e) => TranscriptOutcome::Errored {
            message: e.to_string(),
        },
    }
}

/// Collect transcripts for an already-capped selection. One failure affects
/// only that record — partial success is the expected outcome here, never a
/// reason to abort the batch.
pub fn collect(
    source: &dyn TranscriptSource,
    selected: &[VideoRecord],
    priority: &[&str],
) -> Vec<TranscriptRecord> {
    let total = selected.len();
    let width = total.to_string().len();
    let mut out = Vec::with_capacity(total);

    for (i, record) in selected.iter().enumerate() {
        let text = match fetch_one(source, &record.id, priority) {
            TranscriptOutcome::Found { language, text } => {
                debug!("transcript for {} resolved in '{}'", record.id, language);
                eprintln!("  [{:>width$}/{total}] {}", i + 1, record.title);
                text
            }
            TranscriptOutcome::NotFound => {
                eprintln!(
                    "  [{:>width$}/{total}] {} — no transcript",
                    i + 1,
                    record.title
                );
                NO_TRANSCRIPT_SENTINEL.to_string()
            }
            TranscriptOutcome::Errored { message } => {
                warn!("transcript fetch failed for {}: {}", record.id, message);
                eprintln!(
                    "  [{:>width$}/{total}] {} — FAILED: {}",
                    i + 1,
                    record.title,
                    message
                );
                format!("(에러: {message})")
            }
        };

        out.push(TranscriptRecord {
            title: record.title.clone(),
            url: record.url.clone(),
            text,
        });
    }

    out
}
