// Search settings
// Loaded from ~/.config/menusearch/settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Result caps
    #[serde(rename = "search.maxMenuResults")]
    pub max_menu_results: usize,

    #[serde(rename = "search.maxPreferenceResults")]
    pub max_preference_results: usize,

    // Recently used
    #[serde(rename = "recent.limit")]
    pub recent_limit: usize,

    // Highlight
    #[serde(rename = "highlight.blinkRepeat")]
    pub blink_repeat: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_menu_results: 15,
            max_preference_results: 10,
            recent_limit: 20,
            blink_repeat: 4,
        }
    }
}

const DEFAULT_FILE: &str = r#"{
    // Results shown per group before the "..." marker
    "search.maxMenuResults": 15,
    "search.maxPreferenceResults": 10,

    // Commands remembered for "repeat last command"
    "recent.limit": 20,

    // On/off cycles when highlighting a preference control
    "highlight.blinkRepeat": 4
}
"#;

/// Drop lines starting with `//` so the file can carry comments
fn strip_comments(contents: &str) -> String {
    contents
        .lines()
        .filter(|line| !line.trim().starts_with("//"))
        .collect::<Vec<_>>()
        .join("\n")
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        Self::path_in(&crate::config_dir())
    }

    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(SETTINGS_FILE)
    }

    /// Load settings from the default location, writing a commented default
    /// file on first run
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            if let Err(e) = Self::create_default_file(&path) {
                log::warn!("Error writing default {}: {}", path.display(), e);
            }
            return Self::default();
        }
        Self::load_from(&path)
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                log::warn!("Error reading {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str::<Settings>(&strip_comments(&contents)) {
            Ok(settings) => settings.clamped(),
            Err(e) => {
                log::warn!("Error parsing {}: {}; using default settings", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save current settings to the default location
    pub fn save(&self) -> Result<(), String> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| e.to_string())?;

        fs::write(path, json).map_err(|e| e.to_string())
    }

    /// Caps and limits of zero are raised to one
    pub fn clamped(self) -> Self {
        Self {
            max_menu_results: self.max_menu_results.max(1),
            max_preference_results: self.max_preference_results.max(1),
            recent_limit: self.recent_limit.max(1),
            blink_repeat: self.blink_repeat.max(1),
        }
    }

    fn create_default_file(path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        fs::write(path, DEFAULT_FILE).map_err(|e| e.to_string())
    }
}
