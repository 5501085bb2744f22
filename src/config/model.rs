use serde::{Deserialize, Serialize};

/// Behavioral configuration for a tab view session.
///
/// Every field has a standalone default so partial config files (and
/// hosts that only override one knob) keep working.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TabViewConfig {
    pub render_mode: RenderMode,
    pub jump_mode: JumpMode,
    pub tab_bar_position: TabBarPosition,
    pub tab_bar_kind: TabBarKind,
    pub swipe_enabled: bool,
    pub keyboard_dismiss_mode: KeyboardDismissMode,
    /// Extra horizontal spacing between scene containers, added to the
    /// per-route translation distance used by swipe/jump math.
    pub scene_container_gap: f64,
}

impl Default for TabViewConfig {
    fn default() -> Self {
        Self {
            render_mode: RenderMode::default(),
            jump_mode: JumpMode::default(),
            tab_bar_position: TabBarPosition::default(),
            tab_bar_kind: TabBarKind::default(),
            swipe_enabled: true,
            keyboard_dismiss_mode: KeyboardDismissMode::default(),
            scene_container_gap: 0.0,
        }
    }
}

/// Which scenes get mounted (see the render policy).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RenderMode {
    /// Every route always renders.
    #[default]
    All,
    /// Only routes within one index of the animated position render.
    Windowed,
    /// Routes render once visited and stay mounted afterwards.
    Lazy,
}

/// How `jump_to` moves the carousel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum JumpMode {
    /// Snap to the target with no transition.
    Immediate,
    /// Slide to the target over a fixed duration.
    #[default]
    Smooth,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TabBarPosition {
    #[default]
    Top,
    Bottom,
}

/// Indicator geometry style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TabBarKind {
    /// Content-width indicator centered under the label.
    Primary,
    /// Full-tab-width indicator.
    #[default]
    Secondary,
}

/// When the engine asks the host to dismiss the keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum KeyboardDismissMode {
    #[default]
    None,
    /// Dismiss as soon as a carousel swipe starts.
    OnDrag,
    /// Dismiss whenever the committed route index changes.
    Auto,
}
