//! User-facing messages.
//!
//! Every failure is turned into a [`Notice`] at the operation that produced it;
//! nothing is allowed to abort the session.

use std::fmt;

use crate::api::{TransportError, UploadError};
use crate::player::{PlaybackStart, SeekApplied, SeekError, SeekOutcome};
use crate::search::{SearchError, SearchOutcome};
use crate::timestamp::Timestamp;
use crate::tracks::TrackError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
    /// Whether repeating the action may help
    pub retryable: bool,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            retryable: false,
        }
    }

    fn retryable(mut self, retryable: bool) -> Self {
        self.retryable = retryable;
        self
    }

    pub fn seek_outcome(outcome: &SeekOutcome) -> Self {
        match outcome {
            SeekOutcome::Applied(applied) => Self::seek_applied(applied),
            SeekOutcome::Deferred { offset } => Self::info(format!(
                "Will jump to {} once the video is ready",
                clock(*offset)
            )),
        }
    }

    pub fn seek_applied(applied: &SeekApplied) -> Self {
        match &applied.playback {
            PlaybackStart::Started => Self::info(format!("Playing from {}", clock(applied.offset))),
            PlaybackStart::Blocked(err) => Self::warning(format!(
                "Jumped to {} but playback did not start ({}); press play to continue",
                clock(applied.offset),
                err.reason
            )),
        }
    }

    pub fn seek_error(err: &SeekError) -> Self {
        match err {
            SeekError::Parse(parse) => Self::warning(format!(
                "Could not seek to this result: unrecognized timestamp {:?}",
                parse.raw()
            )),
            SeekError::NoVideoSelected => Self::warning("Select a video before jumping to a result"),
        }
    }

    pub fn search_outcome(query: &str, outcome: &SearchOutcome) -> Self {
        match outcome {
            SearchOutcome::NoResults => Self::info(format!("No results for {:?}", query.trim())),
            SearchOutcome::Results(targets) => Self::info(format!(
                "{} result{} for {:?}",
                targets.len(),
                if targets.len() == 1 { "" } else { "s" },
                query.trim()
            )),
        }
    }

    pub fn search_error(err: &SearchError) -> Self {
        match err {
            SearchError::EmptyQuery => Self::warning("Enter something to search for"),
            SearchError::NoVideoSelected => Self::warning("Select a video before searching"),
            SearchError::Transport(transport) => Self::transport("Search failed", transport),
        }
    }

    pub fn transport(action: &str, err: &TransportError) -> Self {
        Self::error(format!("{action}: {err}")).retryable(err.is_retryable())
    }

    pub fn upload_error(err: &UploadError) -> Self {
        match err {
            UploadError::Transport(transport) => Self::transport("Upload failed", transport),
            other => Self::error(format!("Upload failed: {other}")),
        }
    }

    pub fn track_error(err: &TrackError) -> Self {
        Self::warning(err.to_string())
    }

    /// A seek that was still waiting when the metadata timeout ran out.
    pub fn seek_timed_out(offset: f64, waited_secs: u64) -> Self {
        Self::warning(format!(
            "Gave up jumping to {} after waiting {}s for the video to load",
            clock(offset),
            waited_secs
        ))
        .retryable(true)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if self.retryable {
            f.write_str(" (try again)")?;
        }
        Ok(())
    }
}

fn clock(offset: f64) -> String {
    Timestamp::from_secs(offset)
        .map(|t| t.to_string())
        .unwrap_or_else(|_| format!("{offset}s"))
}
