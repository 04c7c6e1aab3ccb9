//! Linear undo/redo history for the tone picker editor.
//!
//! Provides a `HistoryStore` over a single string value. Commands go through a
//! pure transition (`reduce`) and the resulting snapshot is mirrored to a
//! durable slot in an embedded key-value store (redb).
pub mod config;
pub mod persistence;
pub mod state;
pub mod store;

pub use config::HistoryConfig;
pub use persistence::SlotStore;
pub use state::{reduce, HistoryCommand, HistoryState, Transition};
pub use store::HistoryStore;
