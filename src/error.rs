use reqwest::StatusCode;

/// Failures that abort the current action.
///
/// Transcript-level trouble is deliberately *not* here: a missing or broken
/// transcript is recovered into a sentinel text value per record and never
/// aborts a batch (see `crate::transcript`).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No API key found. Provide via --api-key, YOUTUBE_API_KEY env var, or ~/.ytpick/config.toml")]
    MissingApiKey,

    #[error("YouTube API returned {status}: {body}")]
    Upstream { status: StatusCode, body: String },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{selected} rows selected — the per-batch cap is {cap}")]
    SelectionCap { selected: usize, cap: usize },

    #[error("invalid selection: {0}")]
    InvalidSelection(String),
}

pub type Result<T> = std::result::Result<T, Error>;
