//! Seek controller: jump to a subtitle timestamp and start playing.

use tracing::{debug, info, warn};

use crate::media::{LoadCycle, MediaElement, MediaEvent, MediaEventKind, MediaReadiness, PlaybackPolicyError};
use crate::player::gate::{Dispatch, ReadinessGate, Subscription, SubscriptionToken};
use crate::player::session::{SelectedVideo, VideoSession};
use crate::timestamp::{self, ParseError};

/// Errors from [`SeekController::seek_to_timestamp`].
///
/// Neither touches the media element.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeekError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("no video is loaded")]
    NoVideoSelected,
}

/// Whether playback started after a seek.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackStart {
    Started,
    /// The position was set but the runtime refused to start playback
    Blocked(PlaybackPolicyError),
}

/// A seek that reached the element.
#[derive(Debug, Clone, PartialEq)]
pub struct SeekApplied {
    /// Offset in seconds the element was moved to
    pub offset: f64,
    pub playback: PlaybackStart,
}

/// Result of a seek request.
#[derive(Debug, Clone, PartialEq)]
pub enum SeekOutcome {
    /// Metadata was available; the seek happened within the call.
    Applied(SeekApplied),
    /// Waiting for metadata. Replaced by any later request.
    Deferred { offset: f64 },
}

/// The one outstanding seek waiting for metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSeek {
    /// Timestamp string as requested
    pub raw: String,
    /// Canonical offset in seconds
    pub offset: f64,
    /// Load cycle the request was made in
    pub cycle: LoadCycle,
    token: SubscriptionToken,
}

/// What a media event did.
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    /// The pending seek was applied.
    SeekApplied(SeekApplied),
    /// A play request was refused after the fact.
    PlaybackRejected(PlaybackPolicyError),
    /// A seek is pending but metadata has not arrived.
    Waiting,
    /// Nothing was waiting on this event.
    Idle,
    /// The event belongs to a source that has since been replaced.
    StaleCycleIgnored,
}

/// Seeks one media element to subtitle timestamps.
///
/// Owns the [`VideoSession`] and the readiness gate in front of it. Only the
/// latest seek request is kept: earlier ones that have not been applied yet
/// are dropped, never queued.
pub struct SeekController<M> {
    session: VideoSession<M>,
    gate: ReadinessGate<M, SeekApplied>,
    pending: Option<PendingSeek>,
}

impl<M: MediaElement + 'static> SeekController<M> {
    pub fn new(media: M) -> Self {
        Self {
            session: VideoSession::new(media),
            gate: ReadinessGate::new(),
            pending: None,
        }
    }

    pub fn session(&self) -> &VideoSession<M> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut VideoSession<M> {
        &mut self.session
    }

    /// The current load cycle. Hosts tag media events with it.
    pub fn cycle(&self) -> LoadCycle {
        self.gate.cycle()
    }

    pub fn readiness(&self) -> MediaReadiness {
        self.gate.current_readiness(self.session.media())
    }

    pub fn pending_seek(&self) -> Option<&PendingSeek> {
        self.pending.as_ref()
    }

    /// Load a new video. Starts a new load cycle and cancels any pending seek.
    pub fn select_video(&mut self, video: SelectedVideo) -> LoadCycle {
        if let Some(cancelled) = self.pending.take() {
            debug!(offset = cancelled.offset, "source changed, dropping pending seek");
        }
        info!(video = %video.id, source = %video.source, "loading video");
        self.session.load(video);
        self.gate.begin_cycle()
    }

    /// Seek to `raw` and start playback.
    ///
    /// Applied within the call when metadata is already available, otherwise
    /// deferred until it is. A bad timestamp leaves the element untouched.
    pub fn seek_to_timestamp(&mut self, raw: &str) -> Result<SeekOutcome, SeekError> {
        let offset = timestamp::parse(raw)?.as_secs_f64();
        if self.session.video().is_none() {
            return Err(SeekError::NoVideoSelected);
        }

        if let Some(previous) = self.pending.take() {
            debug!(previous = previous.offset, next = offset, "superseding pending seek");
        }

        let subscription = self.gate.once_ready(
            self.session.media_mut(),
            MediaReadiness::MetadataLoaded,
            move |media: &mut M| apply_seek(media, offset),
        );

        match subscription {
            Subscription::Fired(applied) => Ok(SeekOutcome::Applied(applied)),
            Subscription::Pending(token) => {
                debug!(offset, cycle = %self.gate.cycle(), "seek deferred until metadata loads");
                self.pending = Some(PendingSeek {
                    raw: raw.to_string(),
                    offset,
                    cycle: self.gate.cycle(),
                    token,
                });
                Ok(SeekOutcome::Deferred { offset })
            }
        }
    }

    /// Feed an event fired by the media element.
    pub fn handle_media_event(&mut self, event: &MediaEvent) -> EventOutcome {
        if let MediaEventKind::PlayRejected(err) = &event.kind {
            if event.cycle != self.gate.cycle() {
                return EventOutcome::StaleCycleIgnored;
            }
            warn!(%err, "playback rejected");
            return EventOutcome::PlaybackRejected(err.clone());
        }

        match self.gate.dispatch(self.session.media_mut(), event) {
            Dispatch::Fired(token, applied) => {
                if self.pending.as_ref().is_some_and(|p| p.token == token) {
                    self.pending = None;
                }
                EventOutcome::SeekApplied(applied)
            }
            Dispatch::Waiting => EventOutcome::Waiting,
            Dispatch::Idle => EventOutcome::Idle,
            Dispatch::StaleCycleIgnored => EventOutcome::StaleCycleIgnored,
        }
    }

    /// Give up on the pending seek, if any.
    pub fn cancel_pending_seek(&mut self) -> Option<PendingSeek> {
        let pending = self.pending.take()?;
        self.gate.cancel(pending.token);
        Some(pending)
    }
}

fn apply_seek<M: MediaElement>(media: &mut M, offset: f64) -> SeekApplied {
    media.set_current_time(offset);
    let playback = match media.play() {
        Ok(()) => PlaybackStart::Started,
        Err(err) => {
            warn!(%err, offset, "seek applied but playback did not start");
            PlaybackStart::Blocked(err)
        }
    };
    info!(offset, "seek applied");
    SeekApplied { offset, playback }
}
