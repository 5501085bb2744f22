//! Position synchronization engine for horizontally paged tab views.
//!
//! One continuous position value is shared by carousel swiping,
//! programmatic jumps, tab-bar indicator placement and auto-scroll, and
//! the header-collapse gesture arbiter. The engine is headless: hosts
//! report layout measurements and gesture events, drive the animation
//! clock with [`TabViewSession::tick`], and drain [`HostCommand`]s to
//! apply on their own UI.
//!
//! ```
//! use tabrail::{Route, TabViewConfig, TabViewSession};
//!
//! let session = TabViewSession::new(
//!     vec![Route::with_title("home", "Home"), Route::with_title("feed", "Feed")],
//!     TabViewConfig::default(),
//! )
//! .unwrap();
//!
//! session.set_view_layout(tabrail::Layout { width: 360.0, height: 640.0 });
//! session.jump_to("feed");
//! ```

mod autoscroll;
mod carousel;
mod cell;
mod config;
mod error;
mod gesture;
mod header;
mod indicator;
mod layout;
mod motion;
mod render;
mod route;
mod session;

pub use cell::{ObservedIndex, ObservedValue, ObservedValueReader, SubscriptionId};
pub use config::{
    JumpMode, KeyboardDismissMode, RenderMode, TabBarKind, TabBarPosition, TabViewConfig,
    config_base_dir, load_config, save_config,
};
pub use error::TabViewError;
pub use gesture::PanOwner;
pub use header::GestureSource;
pub use indicator::IndicatorGeometry;
pub use layout::{Layout, TabLayoutEntry, measure_label};
pub use render::{JumpState, SceneTransform};
pub use route::Route;
pub use session::{HostCommand, SceneProps, TabViewSession};
