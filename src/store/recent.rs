//! Recent-search persistence
//!
//! Stores the bounded recent-search list as a single JSON file in an
//! XDG-compliant data directory (`~/.local/share/skycast/` on Linux). The
//! file is read once at startup and replaced in full on every change; there
//! is exactly one writer.

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;

use crate::data::RecentSearch;

/// Maximum number of recent searches kept
pub const MAX_RECENT: usize = 5;

/// File name of the persisted list inside the data directory
const RECENT_FILE: &str = "recent_searches.json";

/// Applies one addition to a recent-search list.
///
/// Any existing entry with the same name is removed (the newest occurrence
/// wins), the new entry is prepended, and the list is truncated to
/// `MAX_RECENT` entries.
pub fn push_recent(list: &[RecentSearch], entry: RecentSearch) -> Vec<RecentSearch> {
    let name = entry.name.clone();
    let mut updated = Vec::with_capacity(MAX_RECENT);
    updated.push(entry);
    updated.extend(
        list.iter()
            .filter(|existing| existing.name != name)
            .cloned(),
    );
    updated.truncate(MAX_RECENT);
    updated
}

/// Reads and writes the persisted recent-search list
#[derive(Debug, Clone)]
pub struct RecentStore {
    data_dir: PathBuf,
}

impl RecentStore {
    /// Creates a store in the XDG data directory.
    ///
    /// Returns `None` if the directory cannot be determined (e.g. no home
    /// directory); the session then keeps recents in memory only.
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "skycast")?;
        Some(Self {
            data_dir: project_dirs.data_dir().to_path_buf(),
        })
    }

    /// Creates a store with a custom directory (used by tests).
    pub fn with_dir(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    fn file_path(&self) -> PathBuf {
        self.data_dir.join(RECENT_FILE)
    }

    /// Loads the persisted list, or an empty one if the file is missing or
    /// unreadable.
    pub fn load(&self) -> Vec<RecentSearch> {
        let Ok(content) = fs::read_to_string(self.file_path()) else {
            return Vec::new();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Replaces the persisted list in full.
    pub fn save(&self, list: &[RecentSearch]) -> std::io::Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        let json = serde_json::to_string_pretty(list)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(self.file_path(), json)
    }
}
