//! History triple and the pure transition over it.
//!
//! `reduce` never touches storage. The store runs it first and persists the
//! result as a separate step, so everything here is testable without a slot.
use serde::{Deserialize, Serialize};

/// Linear undo/redo history over a single string value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryState {
    /// Superseded values, oldest first.
    pub past: Vec<String>,
    /// The value currently considered current.
    pub present: String,
    /// Values superseded by undo, nearest first.
    pub future: Vec<String>,
}

impl HistoryState {
    /// Creates a history with no past and no future.
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            past: Vec::new(),
            present: initial.into(),
            future: Vec::new(),
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Drops the oldest `past` entries so that at most `limit` remain.
    ///
    /// Returns the number of entries discarded.
    pub fn trim_past(&mut self, limit: usize) -> usize {
        let excess = self.past.len().saturating_sub(limit);
        if excess > 0 {
            self.past.drain(..excess);
        }
        excess
    }
}

/// A request to change the history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryCommand {
    /// Replace the present value, pushing the old one onto `past`.
    Set(String),
    Undo,
    Redo,
    /// Discard all history and start over from the given value.
    Reset(String),
}

/// Outcome of applying one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: HistoryState,
    /// Whether the triple differs from the one the command was applied to.
    pub changed: bool,
}

impl Transition {
    fn same(state: HistoryState) -> Self {
        Self {
            state,
            changed: false,
        }
    }

    fn updated(state: HistoryState) -> Self {
        Self {
            state,
            changed: true,
        }
    }
}

/// Applies `command` to `state` and returns the next state.
///
/// Undo with an empty past, redo with an empty future and a set to the
/// current value are no-ops and come back with `changed == false`.
pub fn reduce(mut state: HistoryState, command: HistoryCommand) -> Transition {
    match command {
        HistoryCommand::Set(value) => {
            if value == state.present {
                return Transition::same(state);
            }
            let previous = std::mem::replace(&mut state.present, value);
            state.past.push(previous);
            state.future.clear();
            Transition::updated(state)
        }
        HistoryCommand::Undo => {
            let Some(previous) = state.past.pop() else {
                return Transition::same(state);
            };
            let current = std::mem::replace(&mut state.present, previous);
            state.future.insert(0, current);
            Transition::updated(state)
        }
        HistoryCommand::Redo => {
            if state.future.is_empty() {
                return Transition::same(state);
            }
            let next = state.future.remove(0);
            let current = std::mem::replace(&mut state.present, next);
            state.past.push(current);
            Transition::updated(state)
        }
        HistoryCommand::Reset(initial) => {
            let next = HistoryState::new(initial);
            if next == state {
                Transition::same(state)
            } else {
                Transition::updated(next)
            }
        }
    }
}
