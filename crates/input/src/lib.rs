//! Terminal input module (engine-facing).
//!
//! Independent of any UI framework. It maps `crossterm` key events into
//! [`crate::types::GameAction`], turns mouse drags into swipe gestures and
//! batches everything pending for one frame.

pub mod events;
pub mod map;
pub mod touch;

pub use tui_blockfall_types as types;

pub use events::{EventBatch, EventTranslator, Translated};
pub use map::{handle_key_event, should_quit};
pub use touch::TouchTracker;
