//! Tab bar auto-scroll coordinator.
//!
//! Keeps the tab bar strip following the committed route index: after a
//! settle delay, the bar is asked to scroll so the active tab sits
//! centered. If the host cannot scroll to an estimated index (tab sizes
//! not all known yet), it reports the failure and gets an offset-based
//! fallback computed from the best available estimate.

use std::time::{Duration, Instant};

use crate::layout::TabLayoutEntry;

/// Wait after a commit before the bar chases the active tab.
pub(crate) const AUTO_SCROLL_SETTLE_DELAY: Duration = Duration::from_millis(500);

pub(crate) struct AutoScrollCoordinator {
    pending: Option<(usize, Instant)>,
}

impl AutoScrollCoordinator {
    pub(crate) fn new() -> Self {
        Self { pending: None }
    }

    /// Schedules a scroll toward `index`. A newer commit replaces any
    /// scroll still waiting out its delay.
    pub(crate) fn note_index_change(&mut self, index: usize, now: Instant) {
        self.pending = Some((index, now + AUTO_SCROLL_SETTLE_DELAY));
    }

    /// Route index whose scroll is due at `now`, if any.
    pub(crate) fn due(&mut self, now: Instant) -> Option<usize> {
        match self.pending {
            Some((index, deadline)) if now >= deadline => {
                self.pending = None;
                Some(index)
            }
            _ => None,
        }
    }

    pub(crate) fn deadline(&self) -> Option<Instant> {
        self.pending.map(|(_, deadline)| deadline)
    }
}

/// Offset that centers the active tab in the bar, clamped so the strip
/// never scrolls past its start.
pub(crate) fn centered_offset(entry: TabLayoutEntry, bar_width: f64) -> f64 {
    (entry.offset - (bar_width / 2.0 - entry.width / 2.0)).max(0.0)
}

/// Recovery offset after a host scroll-to-index failure.
pub(crate) fn fallback_offset(entry: TabLayoutEntry, bar_width: f64) -> f64 {
    (entry.offset - (bar_width / 2.0 + entry.width / 2.0)).max(0.0)
}

#[cfg(test)]
#[path = "../tests/unit/autoscroll.rs"]
mod tests;
