//! Simulated loading for a [`HeadlessMedia`] element.
//!
//! Steps the element through each readiness level with a fixed delay and feeds
//! the resulting events to the controller, the way a browser would fire them
//! while a video loads.

use std::time::Duration;

use tracing::{debug, warn};

use super::seek::{EventOutcome, PendingSeek, SeekApplied, SeekController};
use crate::media::{HeadlessMedia, MediaEvent, PlaybackPolicyError, ReadyState};

const LOAD_STEPS: [ReadyState; 4] = [
    ReadyState::HaveMetadata,
    ReadyState::HaveCurrentData,
    ReadyState::HaveFutureData,
    ReadyState::HaveEnoughData,
];

/// What happened while loading.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Seeks applied by readiness events, in order
    pub applied: Vec<SeekApplied>,
    /// The seek cancelled because metadata did not arrive in time
    pub timed_out: Option<PendingSeek>,
    pub rejected: Vec<PlaybackPolicyError>,
    /// Events delivered to the controller
    pub events: usize,
}

#[derive(Debug, Clone)]
pub struct HeadlessLoader {
    step: Duration,
    metadata_timeout: Option<Duration>,
}

impl HeadlessLoader {
    pub fn new(step: Duration) -> Self {
        Self {
            step,
            metadata_timeout: None,
        }
    }

    /// Cancel a pending seek if metadata takes longer than `timeout`.
    pub fn with_metadata_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.metadata_timeout = timeout;
        self
    }

    /// Load the controller's current source to completion.
    ///
    /// When the metadata timeout expires first, the pending seek is cancelled
    /// and loading stops there.
    pub async fn run(&self, controller: &mut SeekController<HeadlessMedia>) -> LoadReport {
        let mut report = LoadReport::default();
        let (first, rest) = LOAD_STEPS.split_at(1);

        let metadata = self.step_through(controller, first, &mut report);
        let reached = match self.metadata_timeout {
            Some(limit) => tokio::time::timeout(limit, metadata).await.is_ok(),
            None => {
                metadata.await;
                true
            }
        };

        if !reached {
            if let Some(pending) = controller.cancel_pending_seek() {
                warn!(offset = pending.offset, "metadata timeout, pending seek cancelled");
                report.timed_out = Some(pending);
            }
            return report;
        }

        self.step_through(controller, rest, &mut report).await;
        report
    }

    async fn step_through(
        &self,
        controller: &mut SeekController<HeadlessMedia>,
        levels: &[ReadyState],
        report: &mut LoadReport,
    ) {
        for &level in levels {
            tokio::time::sleep(self.step).await;

            let cycle = controller.cycle();
            let kinds = controller.session_mut().media_mut().advance(level);
            for kind in kinds {
                report.events += 1;
                record(report, controller.handle_media_event(&MediaEvent::new(cycle, kind)));
            }
            debug!(?level, %cycle, "load step");
        }
    }
}

fn record(report: &mut LoadReport, outcome: EventOutcome) {
    match outcome {
        EventOutcome::SeekApplied(applied) => report.applied.push(applied),
        EventOutcome::PlaybackRejected(err) => report.rejected.push(err),
        EventOutcome::Waiting | EventOutcome::Idle | EventOutcome::StaleCycleIgnored => {}
    }
}
