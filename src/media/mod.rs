//! Media element abstraction.
//!
//! The controller never talks to a concrete player. Anything that can report
//! an HTML-style `readyState`, accept a playback position and attempt to start
//! playback implements [`MediaElement`]. The crate ships [`HeadlessMedia`], an
//! in-memory element used by the CLI and by tests.

mod headless;

pub use headless::HeadlessMedia;

use std::fmt;

/// Native readiness signal of a media element, mirroring `HTMLMediaElement.readyState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ReadyState {
    /// No information about the media resource
    #[default]
    HaveNothing = 0,
    /// Duration and dimensions are known; seeking is possible
    HaveMetadata = 1,
    /// Data for the current position is available
    HaveCurrentData = 2,
    /// Enough data to advance playback a little
    HaveFutureData = 3,
    /// Enough data to play through without stalling
    HaveEnoughData = 4,
}

/// Readiness levels the controller cares about.
///
/// Ordered, so thresholds compare with `>=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MediaReadiness {
    /// No metadata yet; the element cannot accept a position
    Unstarted,
    /// Metadata is available; seeking is safe
    MetadataLoaded,
    /// Enough is buffered to start playing
    CanPlay,
}

impl From<ReadyState> for MediaReadiness {
    fn from(state: ReadyState) -> Self {
        match state {
            ReadyState::HaveNothing => Self::Unstarted,
            ReadyState::HaveMetadata | ReadyState::HaveCurrentData => Self::MetadataLoaded,
            ReadyState::HaveFutureData | ReadyState::HaveEnoughData => Self::CanPlay,
        }
    }
}

impl fmt::Display for MediaReadiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unstarted => "unstarted",
            Self::MetadataLoaded => "metadata loaded",
            Self::CanPlay => "can play",
        };
        f.write_str(name)
    }
}

/// Identifier of one media load cycle.
///
/// A cycle starts when a source is set on the element and ends when it is
/// replaced. Readiness registrations and media events carry the cycle they
/// belong to so late arrivals from an old source can be recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LoadCycle(u64);

impl LoadCycle {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LoadCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cycle#{}", self.0)
    }
}

/// Events a media element fires while loading and playing.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEventKind {
    /// `loadedmetadata`
    LoadedMetadata,
    /// `loadeddata`
    LoadedData,
    /// `canplay`
    CanPlay,
    /// `canplaythrough`
    CanPlayThrough,
    /// The pending `play()` request was rejected after the fact
    PlayRejected(PlaybackPolicyError),
}

/// A media event tagged with the load cycle it was fired for.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaEvent {
    pub cycle: LoadCycle,
    pub kind: MediaEventKind,
}

impl MediaEvent {
    pub fn new(cycle: LoadCycle, kind: MediaEventKind) -> Self {
        Self { cycle, kind }
    }
}

/// Autoplay was refused by the runtime.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("playback was not allowed to start: {reason}")]
pub struct PlaybackPolicyError {
    pub reason: String,
}

impl PlaybackPolicyError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Display mode of a text track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackMode {
    Showing,
    Hidden,
    Disabled,
}

/// A subtitle track attached to a media element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextTrack {
    /// ISO language code (e.g. `eng`)
    pub language: String,
    /// Human-readable label
    pub label: String,
    /// URL of the subtitle file
    pub src: String,
    pub mode: TrackMode,
}

/// A playable media element.
///
/// Implementations wrap a real player (browser element, native pipeline) or a
/// simulated one. All methods are synchronous and must not block.
pub trait MediaElement {
    /// Current native readiness.
    fn ready_state(&self) -> ReadyState;

    /// Replace the media source. Readiness drops back to
    /// [`ReadyState::HaveNothing`] and playback stops.
    fn load(&mut self, source: &str);

    /// The currently loaded source, if any.
    fn source(&self) -> Option<&str>;

    /// Playback position in seconds.
    fn current_time(&self) -> f64;

    /// Move the playback position.
    fn set_current_time(&mut self, seconds: f64);

    /// Ask the element to start playing.
    ///
    /// May be refused by an autoplay policy. The position is unaffected.
    fn play(&mut self) -> Result<(), PlaybackPolicyError>;

    fn pause(&mut self);

    fn is_paused(&self) -> bool;

    fn add_text_track(&mut self, track: TextTrack);

    fn clear_text_tracks(&mut self);

    fn text_tracks(&self) -> &[TextTrack];
}
