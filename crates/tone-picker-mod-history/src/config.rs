//! Configuration for the history store.
use std::path::{Path, PathBuf};

/// Slot name the editor history is mirrored under.
pub const DEFAULT_SLOT_KEY: &str = "tone-picker-history";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "TONE_PICKER_DATA_DIR";

/// Configuration for the history store.
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Key of the durable slot the history is mirrored to.
    pub slot_key: String,
    /// Root directory for the slot database.
    pub data_dir: PathBuf,
    /// Restore the previous snapshot at startup instead of clearing it.
    pub resume_previous_session: bool,
    /// Max entries kept in `past`. `None` = unbounded.
    pub max_history_depth: Option<usize>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            slot_key: DEFAULT_SLOT_KEY.to_string(),
            data_dir: resolve_data_dir(),
            resume_previous_session: false,
            max_history_depth: None,
        }
    }
}

/// Resolves the data directory path.
///
/// Resolution order:
/// 1. `TONE_PICKER_DATA_DIR` environment variable
/// 2. `.data/` directory next to the executable
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    let exe = std::env::current_exe().unwrap_or_else(|_| PathBuf::from("."));
    exe.parent().unwrap_or(Path::new(".")).join(".data")
}
