mod model;
mod persistence;

pub use model::{
    JumpMode, KeyboardDismissMode, RenderMode, TabBarKind, TabBarPosition, TabViewConfig,
};
pub use persistence::{config_base_dir, load_config, save_config};
