//! Scene mount decisions and per-scene presentation math.
//!
//! The render policy answers one question per route index and frame:
//! must this scene pane be mounted right now? The answer depends on the
//! render mode, the animated position, and any in-flight smooth jump.
//! The presentation helpers compute where a mounted scene sits and
//! whether it is hidden mid-jump.

use std::collections::BTreeSet;

use crate::config::RenderMode;

/// In-flight smooth jump bookkeeping.
///
/// `start_index` is the route that was committed when the jump began; it
/// stays mounted and slides out while the position travels. Cleared when
/// the jump settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpState {
    pub start_index: usize,
    pub end_index: usize,
}

/// Per-scene presentation snapshot for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SceneTransform {
    /// Static left offset of this scene's container.
    pub base_offset: f64,
    /// Shared strip translation, identical for every scene.
    pub carousel_translate_x: f64,
    /// Extra slide applied to the smooth-jump start route only.
    pub slide_translate_x: f64,
    /// Scenes strictly between jump start and end are hidden mid-jump
    /// so intermediate content never flashes past.
    pub hidden: bool,
}

/// Shared strip translation at `position`.
pub(crate) fn carousel_translate_x(position: f64, track_width: f64) -> f64 {
    -position * track_width
}

/// Static container offset of the scene at `index`.
pub(crate) fn scene_base_offset(index: usize, track_width: f64) -> f64 {
    index as f64 * track_width
}

/// Slide-out translation of the smooth-jump start route.
///
/// Derived from the animated position, not written independently: the
/// start route covers exactly one viewport over the whole transition,
/// however many indices the jump spans.
pub(crate) fn smooth_jump_slide(position: f64, jump: JumpState, track_width: f64) -> f64 {
    let span = jump.end_index as f64 - jump.start_index as f64;
    if span == 0.0 {
        return 0.0;
    }
    let travelled = position - jump.start_index as f64;
    travelled * track_width * (1.0 - 1.0 / span.abs())
}

/// Whether `index` lies strictly between the jump endpoints.
pub(crate) fn hidden_during_jump(index: usize, jump: JumpState) -> bool {
    let lower = jump.start_index.min(jump.end_index);
    let upper = jump.start_index.max(jump.end_index);
    index > lower && index < upper
}

/// Inclusive index range rendered in windowed mode: one route on either
/// side of the animated position.
pub(crate) fn windowed_range(position: f64, route_count: usize) -> (usize, usize) {
    let min = (position.floor() as isize - 1).max(0) as usize;
    let max = ((position.ceil() as usize) + 1).min(route_count - 1);
    (min, max)
}

pub(crate) struct RenderPolicy {
    mode: RenderMode,
    route_count: usize,
    /// Routes mounted at least once. Grows monotonically, never shrinks.
    lazy_loaded: BTreeSet<usize>,
    /// Additions activate on the next tick, not synchronously.
    pending: Vec<usize>,
}

impl RenderPolicy {
    pub(crate) fn new(mode: RenderMode, route_count: usize, initial_index: usize) -> Self {
        let mut lazy_loaded = BTreeSet::new();
        lazy_loaded.insert(initial_index);
        Self {
            mode,
            route_count,
            lazy_loaded,
            pending: Vec::new(),
        }
    }

    /// Queues a route for lazy mounting on the next tick. Idempotent.
    pub(crate) fn mark_visited(&mut self, index: usize) {
        if index >= self.route_count || self.lazy_loaded.contains(&index) {
            return;
        }
        if !self.pending.contains(&index) {
            self.pending.push(index);
        }
    }

    /// Records a scene the host has actually mounted, effective now.
    pub(crate) fn mark_mounted(&mut self, index: usize) {
        if index < self.route_count {
            self.lazy_loaded.insert(index);
        }
    }

    /// Activates queued additions. Returns `true` when the mounted set
    /// changed and the host should re-render.
    pub(crate) fn flush_pending(&mut self) -> bool {
        let mut changed = false;
        for index in self.pending.drain(..) {
            changed |= self.lazy_loaded.insert(index);
        }
        changed
    }

    pub(crate) fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub(crate) fn lazy_loaded(&self) -> &BTreeSet<usize> {
        &self.lazy_loaded
    }

    /// Whether the scene at `index` must be mounted this frame.
    pub(crate) fn should_render(
        &self,
        index: usize,
        position: f64,
        jump: Option<JumpState>,
    ) -> bool {
        match self.mode {
            RenderMode::All => true,
            RenderMode::Lazy => self.lazy_loaded.contains(&index),
            RenderMode::Windowed => {
                let (min, max) = windowed_range(position, self.route_count);
                (index >= min && index <= max)
                    || jump.is_some_and(|j| j.start_index == index)
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/render.rs"]
mod tests;
