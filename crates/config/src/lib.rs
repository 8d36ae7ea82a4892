// Configuration loading

use std::path::PathBuf;

pub mod recent;
pub mod settings;

pub use recent::RecentCommands;
pub use settings::Settings;

/// Directory holding settings.json and recent.json
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("menusearch")
}
