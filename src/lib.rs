//! subseek - subtitle search and synchronized seeking
//!
//! Finds lines in a video's subtitles through the backend's search API and
//! seeks a media element to the matching timestamp, waiting for the element's
//! metadata when it has not loaded yet.

pub mod api;
pub mod cli;
pub mod config;
pub mod media;
pub mod notice;
pub mod player;
pub mod render;
pub mod search;
pub mod theme;
pub mod timestamp;
pub mod tracks;

pub use config::Config;
pub use notice::{Notice, Severity};
pub use player::{SeekController, SeekOutcome};
pub use search::{SearchOutcome, SubtitleSearchClient};
pub use timestamp::Timestamp;
