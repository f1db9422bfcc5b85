//! Readiness gate: run an action once the media element is ready enough.
//!
//! The gate holds at most one pending action. Registering a new one replaces
//! the old one, and starting a new load cycle drops it. Events are tagged with
//! the cycle they were fired for; events from a superseded cycle are ignored
//! so a late callback can never act on the wrong content.

use tracing::debug;

use crate::media::{LoadCycle, MediaElement, MediaEvent, MediaReadiness};

/// Action run against the element when the threshold is reached.
pub type ReadyAction<M, T> = Box<dyn FnOnce(&mut M) -> T>;

/// Identifies one `once_ready` registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionToken(u64);

/// Result of [`ReadinessGate::once_ready`].
#[derive(Debug, PartialEq)]
pub enum Subscription<T> {
    /// The element was already ready; the action ran synchronously.
    Fired(T),
    /// The action is waiting for the threshold.
    Pending(SubscriptionToken),
}

/// Result of feeding a media event to the gate.
#[derive(Debug, PartialEq)]
pub enum Dispatch<T> {
    /// The pending action ran.
    Fired(SubscriptionToken, T),
    /// An action is pending but the threshold has not been reached.
    Waiting,
    /// Nothing is pending.
    Idle,
    /// The event belongs to a load cycle that has been replaced.
    StaleCycleIgnored,
}

struct PendingAction<M, T> {
    token: SubscriptionToken,
    cycle: LoadCycle,
    threshold: MediaReadiness,
    action: ReadyAction<M, T>,
}

pub struct ReadinessGate<M, T> {
    cycle: LoadCycle,
    next_token: u64,
    pending: Option<PendingAction<M, T>>,
}

impl<M: MediaElement, T> ReadinessGate<M, T> {
    pub fn new() -> Self {
        Self {
            cycle: LoadCycle::default(),
            next_token: 0,
            pending: None,
        }
    }

    /// The current load cycle.
    pub fn cycle(&self) -> LoadCycle {
        self.cycle
    }

    /// Readiness as reported by the element right now.
    pub fn current_readiness(&self, media: &M) -> MediaReadiness {
        MediaReadiness::from(media.ready_state())
    }

    /// Token of the pending registration, if any.
    pub fn pending(&self) -> Option<SubscriptionToken> {
        self.pending.as_ref().map(|p| p.token)
    }

    /// Run `action` as soon as the element reaches `threshold`.
    ///
    /// Runs immediately when the element is already there. Otherwise the
    /// action is stored, replacing any earlier registration.
    pub fn once_ready<F>(&mut self, media: &mut M, threshold: MediaReadiness, action: F) -> Subscription<T>
    where
        F: FnOnce(&mut M) -> T + 'static,
    {
        let token = SubscriptionToken(self.next_token);
        self.next_token += 1;

        if let Some(previous) = self.pending.take() {
            debug!(token = previous.token.0, "superseding pending readiness action");
        }

        if self.current_readiness(media) >= threshold {
            return Subscription::Fired(action(media));
        }

        self.pending = Some(PendingAction {
            token,
            cycle: self.cycle,
            threshold,
            action: Box::new(action),
        });
        Subscription::Pending(token)
    }

    /// Drop the registration identified by `token`. Returns whether it was pending.
    pub fn cancel(&mut self, token: SubscriptionToken) -> bool {
        match &self.pending {
            Some(p) if p.token == token => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Start a new load cycle. Any pending action belongs to the old source
    /// and is discarded.
    pub fn begin_cycle(&mut self) -> LoadCycle {
        self.cycle = self.cycle.next();
        if let Some(dropped) = self.pending.take() {
            debug!(
                token = dropped.token.0,
                cycle = %dropped.cycle,
                "dropping readiness action from previous load cycle"
            );
        }
        self.cycle
    }

    /// Feed a media event. Fires the pending action if the element has
    /// reached its threshold within the current cycle.
    pub fn dispatch(&mut self, media: &mut M, event: &MediaEvent) -> Dispatch<T> {
        if event.cycle != self.cycle {
            debug!(event_cycle = %event.cycle, current = %self.cycle, "ignoring stale media event");
            return Dispatch::StaleCycleIgnored;
        }

        let Some(pending) = self.pending.take() else {
            return Dispatch::Idle;
        };

        if pending.cycle != self.cycle {
            debug!(token = pending.token.0, "discarding readiness action from stale cycle");
            return Dispatch::StaleCycleIgnored;
        }

        // Re-read the element: the event only says something changed
        if self.current_readiness(media) < pending.threshold {
            self.pending = Some(pending);
            return Dispatch::Waiting;
        }

        let token = pending.token;
        Dispatch::Fired(token, (pending.action)(media))
    }
}

impl<M: MediaElement, T> Default for ReadinessGate<M, T> {
    fn default() -> Self {
        Self::new()
    }
}
