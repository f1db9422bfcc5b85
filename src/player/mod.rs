//! Playback control for a single media element.
//!
//! # Architecture
//!
//! The player is organized into submodules:
//! - `gate`: readiness state machine with a one-shot "run when ready" primitive
//! - `session`: the media element plus the video currently loaded on it
//! - `seek`: `SeekController`, which parses subtitle timestamps and seeks
//!   through the gate
//! - `loader`: steps a `HeadlessMedia` element through a simulated load
//!
//! The controller is synchronous. Hosts feed media events in with
//! [`SeekController::handle_media_event`], tagging each with the load cycle
//! returned by [`SeekController::cycle`].
//!
//! # Usage
//!
//! ```
//! use subseek::api::VideoId;
//! use subseek::media::{HeadlessMedia, MediaEvent, ReadyState};
//! use subseek::player::{EventOutcome, SeekController, SeekOutcome, SelectedVideo};
//!
//! let mut controller = SeekController::new(HeadlessMedia::new());
//! controller.select_video(SelectedVideo {
//!     id: VideoId(1),
//!     title: "Demo".to_string(),
//!     source: "http://localhost/media/videos/demo.mp4".to_string(),
//! });
//!
//! // No metadata yet: the seek waits
//! let outcome = controller.seek_to_timestamp("00:01:30").unwrap();
//! assert_eq!(outcome, SeekOutcome::Deferred { offset: 90.0 });
//!
//! let cycle = controller.cycle();
//! for kind in controller.session_mut().media_mut().advance(ReadyState::HaveMetadata) {
//!     let result = controller.handle_media_event(&MediaEvent::new(cycle, kind));
//!     assert!(matches!(result, EventOutcome::SeekApplied(_)));
//! }
//! ```

pub mod gate;
mod loader;
mod seek;
mod session;

pub use gate::{Dispatch, ReadinessGate, Subscription, SubscriptionToken};
pub use loader::{HeadlessLoader, LoadReport};
pub use seek::{
    EventOutcome, PendingSeek, PlaybackStart, SeekApplied, SeekController, SeekError, SeekOutcome,
};
pub use session::{SelectedVideo, VideoSession};
