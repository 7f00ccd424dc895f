/// Tab session persistence: the set of open script tabs survives restarts.
///
/// The whole session is one JSON array of records in a flat file, rewritten
/// wholesale on save and parsed wholesale on load. Anything unreadable is
/// treated the same as an absent file; callers fall back to a default tab.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One persisted tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabRecord {
    /// Position among sibling tabs.
    pub index: usize,
    /// Tab title.
    pub label: String,
    /// Whether this was the shown tab. At most one record is honored.
    pub active: bool,
    /// Full script text of the tab.
    pub command: String,
}

/// Returns the default session file path (next to the executable).
pub fn session_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|d| d.join("pypad-tabs.json")))
        .unwrap_or_else(|| PathBuf::from("pypad-tabs.json"))
}

/// Overwrites the session file with the given records.
pub fn save_tabs(path: &Path, records: &[TabRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(records).context("serializing tab session")?;
    std::fs::write(path, json)
        .with_context(|| format!("writing tab session to {}", path.display()))?;
    Ok(())
}

/// Loads the session file, sorted by record index. Returns `None` when the
/// file is absent, unreadable, or fails to parse.
pub fn load_tabs(path: &Path) -> Option<Vec<TabRecord>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            if path.exists() {
                tracing::warn!("Failed to read tab session at {}: {e}", path.display());
            }
            return None;
        }
    };
    match serde_json::from_str::<Vec<TabRecord>>(&contents) {
        Ok(mut records) => {
            records.sort_by_key(|r| r.index);
            Some(records)
        }
        Err(e) => {
            tracing::warn!("Failed to parse tab session at {}: {e}", path.display());
            None
        }
    }
}
