//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It renders
//! into a simple framebuffer that is diffed and flushed to a crossterm
//! backend, with cells drawn two columns wide to keep blocks square.
//!
//! [`TerminalFrontend`] plugs the whole pipeline into the core session as its
//! render and score sink.

pub mod fb;
pub mod frontend;
pub mod game_view;
pub mod renderer;

pub use tui_blockfall_core as core;
pub use tui_blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use frontend::TerminalFrontend;
pub use game_view::{color_for, GameView, PanelView, Viewport, PALETTE};
pub use renderer::{
    encode_diff_into, encode_full_into, install_panic_hook, queue_restore, TerminalRenderer,
};
