/// Application configuration: load, save and sanitize.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Slot key used when the config leaves `history_key` blank.
pub const DEFAULT_HISTORY_KEY: &str = "tone-picker-history";

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Text the editor starts with.
    pub initial_text: String,
    /// Restore the previous session's history instead of starting empty.
    pub resume_history: bool,
    /// Max undo steps kept. 0 = unbounded.
    pub max_history_depth: usize,
    /// Name of the durable slot the history is mirrored to.
    pub history_key: String,
    /// External program (plus arguments) that rewrites text in a tone.
    /// Empty = no text-transform service configured.
    pub transform_command: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            initial_text: String::new(),
            resume_history: false,
            max_history_depth: 0,
            history_key: DEFAULT_HISTORY_KEY.to_string(),
            transform_command: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Returns the config file path: exe directory + `tone-picker.json`.
    pub fn config_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|d| d.join("tone-picker.json")))
            .unwrap_or_else(|| PathBuf::from("tone-picker.json"))
    }

    /// Loads config from `path`, creating a default file if it doesn't exist.
    /// Returns defaults on any error (unreadable file, parse error, etc.).
    pub fn load_or_create(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(contents) => match serde_json::from_str::<AppConfig>(&contents) {
                    Ok(mut config) => {
                        config.sanitize();
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {}: {e}", path.display());
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {}: {e}", path.display());
                }
            }
            // Return defaults on error (don't overwrite broken file)
            Self::default()
        } else {
            let config = Self::default();
            if let Err(e) = config.save(path) {
                tracing::warn!("Failed to create default config at {}: {e}", path.display());
            }
            config
        }
    }

    /// Saves config to `path` as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    /// History depth as an optional limit (`None` = unbounded).
    pub fn history_depth_limit(&self) -> Option<usize> {
        (self.max_history_depth > 0).then_some(self.max_history_depth)
    }

    /// Whether a text-transform program is configured.
    pub fn has_transform(&self) -> bool {
        !self.transform_command.is_empty()
    }

    /// Trims and drops blank entries, restoring defaults for required fields.
    pub fn sanitize(&mut self) {
        self.transform_command = self
            .transform_command
            .iter()
            .map(|part| part.trim().to_string())
            .filter(|part| !part.is_empty())
            .collect();

        let key = self.history_key.trim();
        self.history_key = if key.is_empty() {
            DEFAULT_HISTORY_KEY.to_string()
        } else {
            key.to_string()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.initial_text.is_empty());
        assert!(!config.resume_history);
        assert_eq!(config.max_history_depth, 0);
        assert_eq!(config.history_key, "tone-picker-history");
        assert!(!config.has_transform());
    }

    #[test]
    fn test_history_depth_limit() {
        let mut config = AppConfig::default();
        assert_eq!(config.history_depth_limit(), None);
        config.max_history_depth = 25;
        assert_eq!(config.history_depth_limit(), Some(25));
    }

    #[test]
    fn test_sanitize_drops_blank_command_parts() {
        let mut config = AppConfig::default();
        config.transform_command = vec![
            "  rewrite ".to_string(),
            String::new(),
            "   ".to_string(),
            "--fast".to_string(),
        ];
        config.sanitize();
        assert_eq!(config.transform_command, vec!["rewrite", "--fast"]);
        assert!(config.has_transform());
    }

    #[test]
    fn test_sanitize_all_blank_command_means_none() {
        let mut config = AppConfig::default();
        config.transform_command = vec![" ".to_string()];
        config.sanitize();
        assert!(!config.has_transform());
    }

    #[test]
    fn test_sanitize_restores_blank_history_key() {
        let mut config = AppConfig::default();
        config.history_key = "   ".to_string();
        config.sanitize();
        assert_eq!(config.history_key, DEFAULT_HISTORY_KEY);

        config.history_key = " custom ".to_string();
        config.sanitize();
        assert_eq!(config.history_key, "custom");
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let json = r#"{"resume_history": true}"#;
        let parsed: AppConfig = serde_json::from_str(json).unwrap();
        assert!(parsed.resume_history);
        assert_eq!(parsed.history_key, DEFAULT_HISTORY_KEY);
        assert!(parsed.transform_command.is_empty());
    }

    #[test]
    fn test_serde_round_trip() {
        let mut config = AppConfig::default();
        config.initial_text = "draft".to_string();
        config.max_history_depth = 50;
        config.transform_command = vec!["rewrite".to_string()];
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.initial_text, "draft");
        assert_eq!(parsed.max_history_depth, 50);
        assert_eq!(parsed.transform_command, vec!["rewrite"]);
    }
}
