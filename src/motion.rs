//! Motion driver for observed cells.
//!
//! At most one motion writes a cell at a time. Starting a new motion
//! unconditionally replaces the previous one (last-writer-wins, no
//! blending); whatever side effect the replaced motion's settle would
//! have triggered is dropped with it. The owner drives the motion with
//! `advance(now)` and asks `schedule(now)` for the next frame deadline.

use std::time::{Duration, Instant};

use crate::cell::ObservedValue;

pub(crate) const ANIMATION_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Fixed duration of a smooth jump.
pub(crate) const SMOOTH_JUMP_DURATION: Duration = Duration::from_millis(300);

/// Exponential approach rate for a glide, per second.
const GLIDE_SPEED: f64 = 18.0;

/// A glide snaps to its target below this distance.
const GLIDE_SETTLE_EPSILON: f64 = 0.001;

/// Linear friction applied to a decaying velocity, units/s².
const DECAY_DECELERATION: f64 = 1500.0;

/// A decay stops below this speed, units/s.
const DECAY_VELOCITY_EPSILON: f64 = 10.0;

/// Longest dt a single frame may integrate; guards against clock stalls.
const MAX_FRAME_DT: f64 = 0.05;

/// Quadratic ease-out: fast start, smooth deceleration.
fn ease_out(t: f64) -> f64 {
    1.0 - (1.0 - t) * (1.0 - t)
}

pub(crate) enum Motion {
    /// Fixed-duration eased slide (smooth jump).
    Timed { from: f64, to: f64, duration: Duration },
    /// Exponential approach to a target (swipe settle).
    Glide { target: f64 },
    /// Inertial decay with hard clamp bounds (header fling).
    Decay { velocity: f64, clamp: (f64, f64) },
}

struct ActiveMotion {
    motion: Motion,
    started: Instant,
    last_tick: Instant,
}

/// Exclusive animator for one cell. Owners keep the driver behind their
/// own lock; the cell itself stays a plain shared word.
pub(crate) struct MotionDriver {
    cell: ObservedValue,
    active: Option<ActiveMotion>,
}

impl MotionDriver {
    pub(crate) fn new(cell: ObservedValue) -> Self {
        Self { cell, active: None }
    }

    pub(crate) fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Replaces any active motion.
    pub(crate) fn start(&mut self, motion: Motion, now: Instant) {
        self.active = Some(ActiveMotion {
            motion,
            started: now,
            last_tick: now,
        });
    }

    /// Cancels the active motion.
    pub(crate) fn cancel(&mut self) {
        self.active = None;
    }

    /// Next frame deadline while a motion is active.
    pub(crate) fn schedule(&self, now: Instant) -> Option<Instant> {
        self.active.as_ref().map(|_| now + ANIMATION_FRAME_INTERVAL)
    }

    /// Advances the active motion to `now`, writing the cell. Returns
    /// `true` exactly once, on the advance that settles the motion.
    pub(crate) fn advance(&mut self, now: Instant) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };

        let dt = now
            .saturating_duration_since(active.last_tick)
            .as_secs_f64()
            .clamp(0.0, MAX_FRAME_DT);
        active.last_tick = now;

        let settled = match &mut active.motion {
            Motion::Timed { from, to, duration } => {
                let elapsed = now.saturating_duration_since(active.started).as_secs_f64();
                let t = (elapsed / duration.as_secs_f64()).min(1.0);
                self.cell.set(*from + (*to - *from) * ease_out(t));
                t >= 1.0
            }
            Motion::Glide { target } => {
                let factor = (dt * GLIDE_SPEED).clamp(0.0, 1.0);
                let mut value = self.cell.get();
                value += (*target - value) * factor;
                if (value - *target).abs() < GLIDE_SETTLE_EPSILON {
                    value = *target;
                }
                self.cell.set(value);
                value == *target
            }
            Motion::Decay { velocity, clamp } => {
                let (lower, upper) = *clamp;
                let mut value = self.cell.get() + *velocity * dt;
                let mut stopped = false;
                if value <= lower {
                    value = lower;
                    stopped = true;
                } else if value >= upper {
                    value = upper;
                    stopped = true;
                }
                let speed = velocity.abs() - DECAY_DECELERATION * dt;
                if speed <= DECAY_VELOCITY_EPSILON {
                    stopped = true;
                } else {
                    *velocity = speed * velocity.signum();
                }
                self.cell.set(value);
                stopped
            }
        };

        if settled {
            self.active = None;
        }
        settled
    }
}

#[cfg(test)]
#[path = "../tests/unit/motion.rs"]
mod tests;
