//! Wire types exchanged with the video backend.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Url;
use serde::{Deserialize, Deserializer, Serialize};

/// Catalog identifier of a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(pub u64);

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for VideoId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(VideoId)
    }
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: VideoId,
    pub title: String,
    /// Media file, either an absolute URL or a path relative to the media root
    pub video_file: String,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub uploaded_at: Option<DateTime<Utc>>,
}

impl Video {
    /// URL the media element should load.
    ///
    /// Absolute URLs are used as-is; relative paths are resolved against
    /// `media_base`. Falls back to the raw value if resolution fails.
    pub fn source_url(&self, media_base: &str) -> String {
        Url::parse(media_base)
            .and_then(|base| base.join(&self.video_file))
            .map(String::from)
            .unwrap_or_else(|_| self.video_file.clone())
    }
}

/// A subtitle language available for a video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// ISO code (e.g. `eng`, `rus`, `und`)
    pub code: String,
    /// Display name, may be empty for undetermined languages
    #[serde(default)]
    pub name: String,
}

impl Language {
    /// Name for display, falling back to the code.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.code
        } else {
            &self.name
        }
    }
}

/// Language of the subtitle a hit came from.
///
/// The search endpoint sends the language row's primary key; other backends
/// send the ISO code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubtitleLanguage {
    Id(u64),
    Code(String),
}

impl fmt::Display for SubtitleLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{id}"),
            Self::Code(code) => f.write_str(code),
        }
    }
}

/// One subtitle search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireSearchResult")]
pub struct SearchResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Matching subtitle text
    pub content: String,
    /// Subtitle track the hit came from, when the backend says
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<SubtitleLanguage>,
    /// Start of the subtitle, as sent by the backend
    #[serde(rename = "timestamp")]
    pub raw_timestamp: String,
}

impl SearchResult {
    pub fn new(content: impl Into<String>, raw_timestamp: impl Into<String>) -> Self {
        Self {
            id: None,
            content: content.into(),
            language: None,
            raw_timestamp: raw_timestamp.into(),
        }
    }
}

/// Search hit as it arrives. Serializers that expose the model directly
/// name the start `timestamp_start`; when both keys are present,
/// `timestamp` wins.
#[derive(Deserialize)]
struct WireSearchResult {
    #[serde(default)]
    id: Option<u64>,
    content: String,
    #[serde(default)]
    language: Option<SubtitleLanguage>,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    timestamp_start: Option<String>,
}

impl From<WireSearchResult> for SearchResult {
    fn from(wire: WireSearchResult) -> Self {
        Self {
            id: wire.id,
            content: wire.content,
            language: wire.language,
            // Missing timestamps become empty strings, which later fail to
            // parse for that result alone instead of failing the response
            raw_timestamp: wire.timestamp.or(wire.timestamp_start).unwrap_or_default(),
        }
    }
}

/// Accepts RFC 3339 and naive (`YYYY-MM-DDTHH:MM:SS[.f]`, taken as UTC)
/// timestamps. Anything else is treated as absent.
fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(parsed.with_timezone(&Utc)));
    }

    Ok(NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc()))
}
