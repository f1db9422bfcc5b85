//! In-memory media element.
//!
//! Behaves like a browser `<video>` element without decoding anything: the
//! host drives loading progress with [`HeadlessMedia::advance`], which returns
//! the events a real element would fire. Every position change is recorded so
//! callers can check exactly which seeks happened.

use super::{MediaElement, MediaEventKind, PlaybackPolicyError, ReadyState, TextTrack};

#[derive(Debug, Clone)]
pub struct HeadlessMedia {
    source: Option<String>,
    ready_state: ReadyState,
    position: f64,
    paused: bool,
    autoplay_allowed: bool,
    tracks: Vec<TextTrack>,
    seek_log: Vec<f64>,
    loads: usize,
}

impl HeadlessMedia {
    /// Create an element with nothing loaded and autoplay permitted.
    pub fn new() -> Self {
        Self {
            source: None,
            ready_state: ReadyState::HaveNothing,
            position: 0.0,
            paused: true,
            autoplay_allowed: true,
            tracks: Vec::new(),
            seek_log: Vec::new(),
            loads: 0,
        }
    }

    /// Simulate an autoplay policy: when false, every `play()` is refused.
    pub fn with_autoplay(mut self, allowed: bool) -> Self {
        self.autoplay_allowed = allowed;
        self
    }

    pub fn set_autoplay_allowed(&mut self, allowed: bool) {
        self.autoplay_allowed = allowed;
    }

    /// Move loading forward to `target`, returning the events fired on the way.
    ///
    /// Readiness never goes backwards within a load, and nothing happens
    /// while no source is set.
    pub fn advance(&mut self, target: ReadyState) -> Vec<MediaEventKind> {
        if self.source.is_none() || target <= self.ready_state {
            return Vec::new();
        }

        let mut events = Vec::new();
        for level in [
            ReadyState::HaveMetadata,
            ReadyState::HaveCurrentData,
            ReadyState::HaveFutureData,
            ReadyState::HaveEnoughData,
        ] {
            if level > self.ready_state && level <= target {
                events.push(event_for(level));
            }
        }

        self.ready_state = target;
        events
    }

    /// Every position that was set since creation, in order.
    pub fn seek_log(&self) -> &[f64] {
        &self.seek_log
    }

    /// Number of times a source was loaded.
    pub fn load_count(&self) -> usize {
        self.loads
    }
}

fn event_for(level: ReadyState) -> MediaEventKind {
    match level {
        ReadyState::HaveNothing | ReadyState::HaveMetadata => MediaEventKind::LoadedMetadata,
        ReadyState::HaveCurrentData => MediaEventKind::LoadedData,
        ReadyState::HaveFutureData => MediaEventKind::CanPlay,
        ReadyState::HaveEnoughData => MediaEventKind::CanPlayThrough,
    }
}

impl Default for HeadlessMedia {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaElement for HeadlessMedia {
    fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    fn load(&mut self, source: &str) {
        self.source = Some(source.to_string());
        self.ready_state = ReadyState::HaveNothing;
        self.position = 0.0;
        self.paused = true;
        self.loads += 1;
    }

    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn current_time(&self) -> f64 {
        self.position
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.position = seconds;
        self.seek_log.push(seconds);
    }

    fn play(&mut self) -> Result<(), PlaybackPolicyError> {
        if !self.autoplay_allowed {
            return Err(PlaybackPolicyError::new(
                "autoplay is blocked until the user interacts with the page",
            ));
        }
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn add_text_track(&mut self, track: TextTrack) {
        self.tracks.push(track);
    }

    fn clear_text_tracks(&mut self) {
        self.tracks.clear();
    }

    fn text_tracks(&self) -> &[TextTrack] {
        &self.tracks
    }
}
