// Recently used commands, persisted between runs
// Stored at ~/.config/menusearch/recent.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const RECENT_FILE: &str = "recent.json";
const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecentCommands {
    pub version: u32,
    /// Command ids, most recent first
    pub commands: Vec<u32>,
}

impl Default for RecentCommands {
    fn default() -> Self {
        Self { version: CURRENT_VERSION, commands: Vec::new() }
    }
}

impl RecentCommands {
    pub fn new(commands: Vec<u32>) -> Self {
        Self { version: CURRENT_VERSION, commands }
    }

    pub fn path() -> PathBuf {
        Self::path_in(&crate::config_dir())
    }

    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(RECENT_FILE)
    }

    /// Read the list, or `None` when missing or unreadable
    pub fn load_from(path: &Path) -> Option<Self> {
        let contents = fs::read_to_string(path).ok()?;
        match serde_json::from_str(&contents) {
            Ok(recent) => Some(recent),
            Err(e) => {
                log::warn!("Ignoring unreadable {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(path, json).map_err(|e| e.to_string())
    }

    /// Forget everything by removing the file. A missing file is not an error.
    pub fn clear_at(path: &Path) -> Result<(), String> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.to_string()),
        }
    }
}
