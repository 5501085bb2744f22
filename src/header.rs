//! Header-collapse gesture arbiter.
//!
//! Two input streams can move the shared header-collapse value: a pan
//! drag over scene content and the content's own scroll. Exactly one of
//! them owns the value at a time; ownership transfers only at
//! gesture-begin boundaries. All updates clamp to `[0, header_height]`.
//!
//! A header height of zero means "no header": bounds collapse to
//! `[0, 0]` and every operation is a no-op.

use std::time::Instant;

use crate::cell::{ObservedValue, ObservedValueReader};
use crate::motion::{Motion, MotionDriver};

/// Which input stream owns the header-collapse value right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureSource {
    Pan,
    #[default]
    Scroll,
}

/// A scroll correction the host must apply to one route's surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ScrollSync {
    pub(crate) route_index: usize,
    pub(crate) offset_y: f64,
}

pub(crate) struct HeaderArbiter {
    translate_y: ObservedValue,
    driver: MotionDriver,
    source: GestureSource,
    header_height: f64,
    pan_reference: f64,
    /// Raw scroll offsets as last reported by each route's surface.
    scroll_offsets: Vec<f64>,
}

impl HeaderArbiter {
    pub(crate) fn new(route_count: usize) -> Self {
        let translate_y = ObservedValue::new(0.0);
        let driver = MotionDriver::new(translate_y.clone());
        Self {
            translate_y,
            driver,
            source: GestureSource::default(),
            header_height: 0.0,
            pan_reference: 0.0,
            scroll_offsets: vec![0.0; route_count],
        }
    }

    fn enabled(&self) -> bool {
        self.header_height > 0.0
    }

    fn clamp(&self, value: f64) -> f64 {
        value.clamp(0.0, self.header_height)
    }

    pub(crate) fn translate_y(&self) -> f64 {
        self.translate_y.get()
    }

    pub(crate) fn translate_y_reader(&self) -> ObservedValueReader {
        self.translate_y.reader()
    }

    pub(crate) fn source(&self) -> GestureSource {
        self.source
    }

    /// How far the header has collapsed, 0–100.
    pub(crate) fn collapsed_percentage(&self) -> f64 {
        if !self.enabled() {
            return 0.0;
        }
        self.translate_y.get() / self.header_height * 100.0
    }

    pub(crate) fn set_header_height(&mut self, height: f64) {
        self.header_height = height.max(0.0);
        self.driver.cancel();
        self.translate_y.set(self.clamp(self.translate_y.get()));
    }

    pub(crate) fn header_height(&self) -> f64 {
        self.header_height
    }

    pub(crate) fn on_pan_touch_down(&mut self, focused: bool) {
        if self.enabled() && focused {
            self.driver.cancel();
        }
    }

    pub(crate) fn on_pan_start(&mut self, focused: bool) {
        if !self.enabled() || !focused {
            return;
        }
        self.source = GestureSource::Pan;
        self.pan_reference = self.translate_y.get();
    }

    pub(crate) fn on_pan_change(&mut self, translation_y: f64, focused: bool) {
        if !self.enabled() || !focused || self.source != GestureSource::Pan {
            return;
        }
        self.translate_y
            .set(self.clamp(self.pan_reference - translation_y));
    }

    pub(crate) fn on_pan_end(&mut self, velocity_y: f64, now: Instant, focused: bool) {
        if !self.enabled() || !focused || self.source != GestureSource::Pan {
            return;
        }
        self.driver.start(
            Motion::Decay {
                velocity: -velocity_y,
                clamp: (0.0, self.header_height),
            },
            now,
        );
    }

    pub(crate) fn on_scroll_begin(&mut self, focused: bool) {
        if !self.enabled() || !focused {
            return;
        }
        self.driver.cancel();
        self.source = GestureSource::Scroll;
    }

    /// Records the raw offset unconditionally; moves the header value
    /// only while this route is focused and SCROLL owns it.
    pub(crate) fn on_scroll(&mut self, route_index: usize, offset_y: f64, focused: bool) {
        if let Some(slot) = self.scroll_offsets.get_mut(route_index) {
            *slot = offset_y;
        }
        if !self.enabled() || !focused || self.source != GestureSource::Scroll {
            return;
        }
        self.translate_y.set(self.clamp(offset_y));
    }

    pub(crate) fn is_decaying(&self) -> bool {
        self.driver.is_animating()
    }

    pub(crate) fn advance(&mut self, now: Instant) -> bool {
        self.driver.advance(now)
    }

    pub(crate) fn schedule(&self, now: Instant) -> Option<Instant> {
        self.driver.schedule(now)
    }

    /// Scroll corrections owed to the hosts' surfaces after a header
    /// value change.
    ///
    /// The focused route is forced to the header value unless its own
    /// scroll is driving (that would feed back). Unfocused routes are
    /// pinned whenever the header is not fully collapsed, or at the
    /// fully-collapsed bound while their own offset sits at or below it,
    /// so returning to them never reveals a stale scroll position above
    /// the collapsed header.
    pub(crate) fn sync_commands(&self, focused_index: usize) -> Vec<ScrollSync> {
        if !self.enabled() {
            return Vec::new();
        }
        let value = self.translate_y.get();
        let upper = self.header_height;
        let mut commands = Vec::new();
        for (route_index, &raw_offset) in self.scroll_offsets.iter().enumerate() {
            let force = if route_index == focused_index {
                self.source == GestureSource::Pan
            } else {
                value < upper || (value == upper && raw_offset <= upper)
            };
            if force && raw_offset != value {
                commands.push(ScrollSync {
                    route_index,
                    offset_y: value,
                });
            }
        }
        commands
    }
}

#[cfg(test)]
#[path = "../tests/unit/header.rs"]
mod tests;
