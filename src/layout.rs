//! Tab bar layout registry.
//!
//! Per-route width/offset/content-width maps, assembled incrementally as
//! tabs report their measured size. Offsets are derived, never set
//! directly: `offset[i]` is the running sum of widths `0..i`, recomputed
//! for every index whenever any width actually changes. Unmeasured tabs
//! default to width 0.

use unicode_width::UnicodeWidthStr;

/// A measured rectangle reported by the host layout system.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
}

/// Read view of one route's tab layout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TabLayoutEntry {
    pub width: f64,
    pub offset: f64,
    pub content_width: f64,
}

pub(crate) struct LayoutRegistry {
    widths: Vec<f64>,
    content_widths: Vec<f64>,
    /// One extra entry: `offsets[n]` is the total bar content width.
    offsets: Vec<f64>,
}

impl LayoutRegistry {
    pub(crate) fn new(route_count: usize) -> Self {
        Self {
            widths: vec![0.0; route_count],
            content_widths: vec![0.0; route_count],
            offsets: vec![0.0; route_count + 1],
        }
    }

    /// Records a tab's measured width. Returns `true` (and recomputes
    /// all offsets) only when the stored value actually changed.
    pub(crate) fn report_tab_width(&mut self, index: usize, width: f64) -> bool {
        let Some(slot) = self.widths.get_mut(index) else {
            return false;
        };
        if *slot == width {
            return false;
        }
        *slot = width;
        self.recompute_offsets();
        true
    }

    /// Records the intrinsic label width used by the primary indicator
    /// style. Does not affect offsets.
    pub(crate) fn report_tab_content_width(&mut self, index: usize, width: f64) -> bool {
        let Some(slot) = self.content_widths.get_mut(index) else {
            return false;
        };
        if *slot == width {
            return false;
        }
        *slot = width;
        true
    }

    pub(crate) fn width(&self, index: usize) -> f64 {
        self.widths.get(index).copied().unwrap_or(0.0)
    }

    pub(crate) fn content_width(&self, index: usize) -> f64 {
        self.content_widths.get(index).copied().unwrap_or(0.0)
    }

    pub(crate) fn offset(&self, index: usize) -> f64 {
        self.offsets.get(index).copied().unwrap_or(0.0)
    }

    pub(crate) fn entry(&self, index: usize) -> TabLayoutEntry {
        TabLayoutEntry {
            width: self.width(index),
            offset: self.offset(index),
            content_width: self.content_width(index),
        }
    }

    fn recompute_offsets(&mut self) {
        let mut running = 0.0;
        for (i, offset) in self.offsets.iter_mut().enumerate() {
            *offset = running;
            running += self.widths.get(i).copied().unwrap_or(0.0);
        }
    }
}

/// Measures a label in terminal cells, for monospace hosts without an
/// intrinsic text measurement of their own.
pub fn measure_label(label: &str) -> f64 {
    label.width() as f64
}
