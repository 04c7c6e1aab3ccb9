//! Builds history and transform settings from the application config.
use std::path::PathBuf;

use tone_picker_config::AppConfig;
use tone_picker_mod_history::HistoryConfig;

use crate::transform::CommandTransform;

/// History settings for `app`, storing slots under `data_dir`.
pub fn history_config(app: &AppConfig, data_dir: PathBuf) -> HistoryConfig {
    HistoryConfig {
        slot_key: app.history_key.clone(),
        data_dir,
        resume_previous_session: app.resume_history,
        max_history_depth: app.history_depth_limit(),
    }
}

/// The configured transform program, if any.
pub fn command_transform(app: &AppConfig) -> Option<CommandTransform> {
    CommandTransform::from_command_line(&app.transform_command)
}
