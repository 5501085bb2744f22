use std::fs;
use std::path::PathBuf;

use super::TabViewConfig;

/// Returns the platform-specific base config directory.
///
/// Resolution order:
/// 1. `XDG_CONFIG_HOME`
/// 2. `$HOME/.config`
/// 3. `%USERPROFILE%/.config`
pub fn config_base_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg));
    }
    if let Some(home) = std::env::var_os("HOME") {
        return Some(PathBuf::from(home).join(".config"));
    }
    std::env::var_os("USERPROFILE").map(|home| PathBuf::from(home).join(".config"))
}

/// Returns the path to `~/.config/tabrail/config.ron`.
fn config_path() -> Option<PathBuf> {
    config_base_dir().map(|base| base.join("tabrail").join("config.ron"))
}

/// Loads the config from disk, falling back to defaults on any error.
pub fn load_config() -> TabViewConfig {
    let Some(path) = config_path() else {
        return TabViewConfig::default();
    };
    let Ok(contents) = fs::read_to_string(&path) else {
        return TabViewConfig::default();
    };
    ron::from_str(&contents).unwrap_or_default()
}

/// Persists the config to disk. Errors are silently ignored.
pub fn save_config(config: &TabViewConfig) {
    let Some(path) = config_path() else {
        return;
    };
    let Some(dir) = path.parent() else {
        return;
    };
    if fs::create_dir_all(dir).is_err() {
        return;
    }
    let pretty = ron::ser::PrettyConfig::default();
    let Ok(serialized) = ron::ser::to_string_pretty(config, pretty) else {
        return;
    };
    let _ = fs::write(path, serialized);
}
