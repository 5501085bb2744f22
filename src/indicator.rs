//! Pure indicator geometry for the tab bar.
//!
//! Given the layout registry and the continuous animated position, these
//! functions return where the active-tab indicator sits and how wide it
//! is, linearly interpolated between the tabs on either side of the
//! position. No rendering code, no side effects.

use crate::config::TabBarKind;
use crate::layout::LayoutRegistry;

/// Indicator placement within the tab bar strip.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IndicatorGeometry {
    pub translate_x: f64,
    pub width: f64,
}

/// Indicator x-origin for a single tab.
///
/// The secondary style spans the whole tab; the primary style centers a
/// narrower, content-sized indicator inside it.
fn tab_translate_x(kind: TabBarKind, registry: &LayoutRegistry, index: usize) -> f64 {
    match kind {
        TabBarKind::Primary => {
            registry.offset(index) + registry.width(index) / 2.0
                - registry.content_width(index) / 2.0
        }
        TabBarKind::Secondary => registry.offset(index),
    }
}

fn tab_indicator_width(kind: TabBarKind, registry: &LayoutRegistry, index: usize) -> f64 {
    match kind {
        TabBarKind::Primary => registry.content_width(index),
        TabBarKind::Secondary => registry.width(index),
    }
}

/// Interpolates indicator placement at fractional `position`.
pub(crate) fn indicator_geometry(
    kind: TabBarKind,
    registry: &LayoutRegistry,
    position: f64,
) -> IndicatorGeometry {
    let floor_index = position.floor() as usize;
    let ceil_index = floor_index + 1;
    let floor_weight = 1.0 - (position - floor_index as f64);
    let ceil_weight = 1.0 - (ceil_index as f64 - position);

    let translate_x = tab_translate_x(kind, registry, floor_index) * floor_weight
        + tab_translate_x(kind, registry, ceil_index) * ceil_weight;
    let width = tab_indicator_width(kind, registry, floor_index) * floor_weight
        + tab_indicator_width(kind, registry, ceil_index) * ceil_weight;

    IndicatorGeometry { translate_x, width }
}
