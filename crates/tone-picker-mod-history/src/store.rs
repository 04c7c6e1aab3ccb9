//! Undo/redo store with write-through persistence.
//!
//! Every command runs through [`reduce`] first. When the triple actually
//! changed, the new snapshot is mirrored to the durable slot. Slot failures
//! are logged and never reach the caller.
use std::sync::Arc;

use crate::config::HistoryConfig;
use crate::persistence::SlotStore;
use crate::state::{reduce, HistoryCommand, HistoryState};

/// Undo/redo history over a single string value.
///
/// Owned by exactly one caller; all commands take `&mut self`. Hosts that
/// share a store across threads must wrap it in a mutex.
pub struct HistoryStore {
    state: HistoryState,
    config: HistoryConfig,
    /// Optional durable slot (None = in-memory only).
    slots: Option<Arc<SlotStore>>,
}

impl std::fmt::Debug for HistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStore")
            .field("slot_key", &self.config.slot_key)
            .field("past_len", &self.state.past.len())
            .field("future_len", &self.state.future.len())
            .field("persistent", &self.slots.is_some())
            .finish()
    }
}

impl HistoryStore {
    /// Creates the store and prepares its durable slot.
    ///
    /// By default the slot is cleared so the session starts empty regardless
    /// of what a previous session left behind. With
    /// `resume_previous_session` the stored snapshot is restored instead,
    /// provided it decodes. A missing, unreadable or corrupted snapshot
    /// leaves the store at `([], initial, [])`.
    pub fn initialize(
        initial: impl Into<String>,
        config: HistoryConfig,
        slots: Option<Arc<SlotStore>>,
    ) -> Self {
        let mut store = Self {
            state: HistoryState::new(initial),
            config,
            slots,
        };

        let Some(slots) = store.slots.clone() else {
            return store;
        };
        let key = store.config.slot_key.clone();

        if store.config.resume_previous_session {
            match slots.load_snapshot(&key) {
                Ok(Some(mut restored)) => {
                    if let Some(limit) = store.config.max_history_depth {
                        restored.trim_past(limit);
                    }
                    tracing::debug!(
                        "Resumed history from slot '{key}' ({} undo steps)",
                        restored.past.len()
                    );
                    store.state = restored;
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!("Ignoring persisted history: {e:#}");
                }
            }
        } else if let Err(e) = slots.clear(&key) {
            tracing::warn!("Failed to clear history slot '{key}': {e:#}");
        }

        store
    }

    /// Creates a store with default config and no durable slot.
    pub fn in_memory(initial: impl Into<String>) -> Self {
        Self::initialize(initial, HistoryConfig::default(), None)
    }

    /// The current value.
    pub fn value(&self) -> &str {
        &self.state.present
    }

    /// The full history triple.
    pub fn state(&self) -> &HistoryState {
        &self.state
    }

    pub fn slot_key(&self) -> &str {
        &self.config.slot_key
    }

    pub fn can_undo(&self) -> bool {
        self.state.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.state.can_redo()
    }

    pub fn undo_depth(&self) -> usize {
        self.state.past.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.state.future.len()
    }

    /// Replaces the current value. Setting the current value again is a no-op.
    pub fn set(&mut self, value: impl Into<String>) {
        self.dispatch(HistoryCommand::Set(value.into()));
    }

    /// Steps back one value. No-op when there is nothing to undo.
    pub fn undo(&mut self) {
        self.dispatch(HistoryCommand::Undo);
    }

    /// Steps forward one value. No-op when there is nothing to redo.
    pub fn redo(&mut self) {
        self.dispatch(HistoryCommand::Redo);
    }

    /// Discards all history and starts over from `initial`.
    pub fn reset(&mut self, initial: impl Into<String>) {
        self.dispatch(HistoryCommand::Reset(initial.into()));
    }

    /// Applies a command and mirrors the result to the slot if it changed
    /// anything. Returns whether the state changed.
    pub fn dispatch(&mut self, command: HistoryCommand) -> bool {
        let transition = reduce(std::mem::take(&mut self.state), command);
        self.state = transition.state;

        if !transition.changed {
            return false;
        }

        if let Some(limit) = self.config.max_history_depth {
            let dropped = self.state.trim_past(limit);
            if dropped > 0 {
                tracing::debug!("Dropped {dropped} oldest history entries (limit {limit})");
            }
        }

        self.persist();
        true
    }

    /// Writes the current snapshot to the slot. Failures are only logged.
    fn persist(&self) {
        let Some(slots) = &self.slots else {
            return;
        };
        if let Err(e) = slots.save_snapshot(&self.config.slot_key, &self.state) {
            tracing::warn!("Failed to persist history: {e:#}");
        }
    }
}
