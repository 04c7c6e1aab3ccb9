//! Tone picker editing logic, independent of any UI.
//!
//! Combines the undo/redo history from `tone-picker-mod-history` with the
//! tone grid and an external text-transform service.
pub mod session;
pub mod setup;
pub mod tone;
pub mod transform;

pub use session::{EditorSession, ToneOutcome};
pub use tone::Tone;
pub use transform::{CommandTransform, ToneTransform};

// Re-exported so callers only need this crate to build a session
pub use tone_picker_mod_history::{HistoryConfig, HistoryStore, SlotStore};
