//! Editor session: the text history plus the tone picker.
//!
//! Mirrors what the editor screen does: typing replaces the text, picking a
//! tone rewrites it through the transform, and undo/redo/reset walk the
//! history. Transform failures become a message, never a history entry.
use tone_picker_mod_history::{HistoryCommand, HistoryStore};

use crate::tone::Tone;
use crate::transform::ToneTransform;

/// Message shown when a transform fails without saying why.
const FALLBACK_ERROR: &str = "Failed to change tone.";

/// Result of picking a tone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToneOutcome {
    /// Text was blank, the transform was not called.
    Skipped,
    /// The rewrite became the new current text.
    Applied,
    /// The rewrite came back identical to the current text.
    Unchanged,
    /// The transform failed. The message is also kept in `last_error`.
    Failed(String),
}

/// Owns the history of one editor and the transform used to rewrite it.
pub struct EditorSession<T> {
    history: HistoryStore,
    transform: T,
    selected: Option<Tone>,
    last_error: Option<String>,
}

impl<T> std::fmt::Debug for EditorSession<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("history", &self.history)
            .field("selected", &self.selected)
            .field("last_error", &self.last_error)
            .finish()
    }
}

impl<T: ToneTransform> EditorSession<T> {
    pub fn new(history: HistoryStore, transform: T) -> Self {
        Self {
            history,
            transform,
            selected: None,
            last_error: None,
        }
    }

    pub fn text(&self) -> &str {
        self.history.value()
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// The most recently picked tone.
    pub fn selected_tone(&self) -> Option<Tone> {
        self.selected
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Whether reset would change anything.
    pub fn can_reset(&self) -> bool {
        !self.text().is_empty() || self.can_undo() || self.can_redo()
    }

    /// Replaces the text with what the user typed.
    pub fn edit(&mut self, text: impl Into<String>) {
        self.history.set(text);
    }

    /// Rewrites the current text in `tone`.
    ///
    /// Blank text is left alone. On success the rewrite is pushed onto the
    /// history; on failure the history is untouched and the error is kept.
    pub fn apply_tone(&mut self, tone: Tone) -> ToneOutcome {
        if self.text().trim().is_empty() {
            return ToneOutcome::Skipped;
        }

        self.selected = Some(tone);
        self.last_error = None;

        match self.transform.transform(self.history.value(), &tone) {
            Ok(rewritten) => {
                if self.history.dispatch(HistoryCommand::Set(rewritten)) {
                    ToneOutcome::Applied
                } else {
                    ToneOutcome::Unchanged
                }
            }
            Err(e) => {
                let message = format!("{e:#}");
                let message = if message.trim().is_empty() {
                    FALLBACK_ERROR.to_string()
                } else {
                    message
                };
                tracing::warn!("Tone change to '{tone}' failed: {message}");
                self.last_error = Some(message.clone());
                ToneOutcome::Failed(message)
            }
        }
    }

    pub fn undo(&mut self) {
        self.history.undo();
    }

    pub fn redo(&mut self) {
        self.history.redo();
    }

    /// Clears the text, the history and any error.
    pub fn reset(&mut self) {
        self.history.reset("");
        self.last_error = None;
    }
}
