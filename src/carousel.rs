//! Carousel position controller.
//!
//! Single authoritative owner of the animated position and the
//! committed route index. Swipes, flings, and programmatic jumps all
//! funnel through here; at most one motion source is active at a time
//! and a newer one unconditionally cancels the older one, swallowing
//! its settle side effects.

use std::time::Instant;

use crate::cell::{ObservedIndex, ObservedValue};
use crate::config::JumpMode;
use crate::motion::{Motion, MotionDriver, SMOOTH_JUMP_DURATION};
use crate::render::JumpState;

/// Flings slower than this settle to the nearest index, route units/s.
const MIN_FLING_VELOCITY: f64 = 0.5;

/// A motion ran to completion; the session commits and notifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SettleEvent {
    Swipe { index: usize },
    Jump { index: usize },
}

/// Immediate result of a jump request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum JumpOutcome {
    /// Unknown target or already committed there: no state change.
    Ignored,
    /// Immediate mode: position snapped, commit now.
    Committed(usize),
    /// Smooth mode: animation in flight, commit on settle.
    Animating,
}

pub(crate) struct CarouselController {
    position: ObservedValue,
    committed: ObservedIndex,
    driver: MotionDriver,
    route_count: usize,
    swipe_reference: Option<f64>,
    jump: Option<JumpState>,
    pending_settle: Option<SettleEvent>,
}

impl CarouselController {
    pub(crate) fn new(
        position: ObservedValue,
        committed: ObservedIndex,
        route_count: usize,
    ) -> Self {
        let driver = MotionDriver::new(position.clone());
        Self {
            position,
            committed,
            driver,
            route_count,
            swipe_reference: None,
            jump: None,
            pending_settle: None,
        }
    }

    fn max_position(&self) -> f64 {
        (self.route_count - 1) as f64
    }

    pub(crate) fn jump_state(&self) -> Option<JumpState> {
        self.jump
    }

    pub(crate) fn is_animating(&self) -> bool {
        self.driver.is_animating()
    }

    /// Cancels whatever motion is in flight without firing its settle.
    fn cancel_motion(&mut self) {
        self.driver.cancel();
        self.pending_settle = None;
        self.jump = None;
    }

    /// Pan-gesture start over the carousel. The current position becomes
    /// the swipe's reference point.
    pub(crate) fn begin_swipe(&mut self) {
        self.cancel_motion();
        self.swipe_reference = Some(self.position.get());
    }

    /// Pan-gesture change. `delta_x` is the finger translation in px.
    pub(crate) fn update_swipe(&mut self, delta_x: f64, track_width: f64) {
        let Some(reference) = self.swipe_reference else {
            return;
        };
        if track_width <= 0.0 {
            return;
        }
        let next = reference - delta_x / track_width;
        self.position.set(next.clamp(0.0, self.max_position()));
    }

    /// Pan-gesture end. Picks the settle target from the fling velocity
    /// and glides there; the settle commits via [`SettleEvent::Swipe`].
    pub(crate) fn end_swipe(&mut self, velocity_x: f64, track_width: f64, now: Instant) {
        if self.swipe_reference.take().is_none() {
            return;
        }
        let position = self.position.get();
        let velocity = if track_width > 0.0 {
            -velocity_x / track_width
        } else {
            0.0
        };
        let target = if velocity.abs() >= MIN_FLING_VELOCITY {
            if velocity > 0.0 {
                position.ceil()
            } else {
                position.floor()
            }
        } else {
            position.round()
        }
        .clamp(0.0, self.max_position());

        let index = target as usize;
        self.driver.start(Motion::Glide { target }, now);
        self.pending_settle = Some(SettleEvent::Swipe { index });
    }

    /// Programmatic jump to a route index.
    pub(crate) fn jump_to(&mut self, index: usize, mode: JumpMode, now: Instant) -> JumpOutcome {
        if index >= self.route_count || index == self.committed.get() {
            return JumpOutcome::Ignored;
        }
        self.cancel_motion();
        self.swipe_reference = None;

        match mode {
            JumpMode::Immediate => {
                self.position.set(index as f64);
                JumpOutcome::Committed(index)
            }
            JumpMode::Smooth => {
                self.jump = Some(JumpState {
                    start_index: self.committed.get(),
                    end_index: index,
                });
                self.driver.start(
                    Motion::Timed {
                        from: self.position.get(),
                        to: index as f64,
                        duration: SMOOTH_JUMP_DURATION,
                    },
                    now,
                );
                self.pending_settle = Some(SettleEvent::Jump { index });
                JumpOutcome::Animating
            }
        }
    }

    /// Advances the active motion. Returns the settle event on the frame
    /// the motion completes, at most once per motion.
    pub(crate) fn advance(&mut self, now: Instant) -> Option<SettleEvent> {
        if !self.driver.advance(now) {
            return None;
        }
        let event = self.pending_settle.take();
        if matches!(event, Some(SettleEvent::Jump { .. })) {
            self.jump = None;
        }
        event
    }

    pub(crate) fn schedule(&self, now: Instant) -> Option<Instant> {
        self.driver.schedule(now)
    }
}

#[cfg(test)]
#[path = "../tests/unit/carousel.rs"]
mod tests;
