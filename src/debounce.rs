//! Settle-time debounce filter.

use crate::time::{TimeInstant, elapsed_ms};

/// Turns a chattering raw level into a stable one.
///
/// A raw level that differs from the latched stable level starts a settle
/// timer. The new level is committed once it has persisted for the settle
/// time; dropping back to the stable level before then cancels the timer.
#[derive(Debug, Clone, Copy)]
pub struct Debouncer<I: TimeInstant> {
    settle_ms: u32,
    stable: bool,
    candidate: bool,
    pending_since: Option<I>,
}

impl<I: TimeInstant> Debouncer<I> {
    /// Creates a debouncer that starts out released.
    pub fn new(settle_ms: u32) -> Self {
        Self {
            settle_ms,
            stable: false,
            candidate: false,
            pending_since: None,
        }
    }

    /// Feeds one raw sample and returns the (possibly unchanged) stable level.
    pub fn update(&mut self, raw: bool, now: I) -> bool {
        self.candidate = raw;

        if raw == self.stable {
            self.pending_since = None;
            return self.stable;
        }

        let since = *self.pending_since.get_or_insert(now);
        if elapsed_ms(now, since) >= self.settle_ms {
            self.stable = raw;
            self.pending_since = None;
            debug!("debounced level: {}", raw);
        }

        self.stable
    }

    /// Records a hardware edge seen at `at`.
    ///
    /// A level change restarts the settle timer at the edge instant, so the
    /// window is measured from the last bounce rather than from whenever
    /// the poller next runs.
    pub fn note_edge(&mut self, raw: bool, at: I) {
        self.candidate = raw;
        self.pending_since = if raw == self.stable { None } else { Some(at) };
    }

    /// Returns the latched stable level.
    pub fn stable(&self) -> bool {
        self.stable
    }

    /// Returns the most recent raw level seen.
    pub fn candidate(&self) -> bool {
        self.candidate
    }

    /// Returns true while a level change is waiting to settle.
    pub fn is_settling(&self) -> bool {
        self.pending_since.is_some()
    }

    /// Returns the settle time in milliseconds.
    pub fn settle_ms(&self) -> u32 {
        self.settle_ms
    }

    /// Forgets any pending change and latches `level` as stable.
    pub fn reset(&mut self, level: bool) {
        self.stable = level;
        self.candidate = level;
        self.pending_since = None;
    }
}
