//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of the falling-block game: the well, the
//! piece catalog, collision, rotation with wall kicks, line sweeping and the
//! frame-driven session. It has no dependency on a terminal or any other I/O;
//! rendering and scoring reach the outside world through [`sinks`].
//!
//! # Module Structure
//!
//! - [`well`]: the grid of locked cells (row 0 is the top)
//! - [`shape`]: owned piece matrices and 90° rotation
//! - [`catalog`]: the seven spawn templates
//! - [`collision`]: the legality predicate and merge
//! - [`sweep`]: full-row removal and the doubling score table
//! - [`controller`]: spawn, move, drop and rotate on borrowed state
//! - [`session`]: flags, gravity timer and fault recovery
//! - [`rng`], [`clock`]: injected random and time sources
//!
//! # Example
//!
//! ```
//! use tui_blockfall_core::session::{Session, SessionConfig};
//! use tui_blockfall_core::sinks::NullSinks;
//! use tui_blockfall_core::types::GameAction;
//!
//! let mut session = Session::with_seed(SessionConfig::default(), 12345).unwrap();
//! session.start(&mut NullSinks).unwrap();
//!
//! session.dispatch(GameAction::MoveRight, &mut NullSinks);
//! session.dispatch(GameAction::HardDrop, &mut NullSinks);
//!
//! assert!(!session.well().is_empty());
//! ```
//!
//! # Timing
//!
//! Call [`Session::frame`](session::Session::frame) every frame (about
//! 16 ms) with a monotonic timestamp. Gravity moves the piece one row once
//! the accumulated time exceeds the drop interval (1000 ms by default).

pub mod catalog;
pub mod clock;
pub mod collision;
pub mod controller;
pub mod error;
pub mod rng;
pub mod session;
pub mod shape;
pub mod sinks;
pub mod sweep;
pub mod well;

pub use tui_blockfall_types as types;

// Re-export commonly used types for convenience
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use controller::{ActivePiece, Player, Rules, SpawnCollisionPolicy};
pub use error::{GridError, SinkError};
pub use rng::{RandomSource, ScriptedRandom, SimpleRng, ThreadRandom};
pub use session::{ActionSet, ControlScheme, Session, SessionConfig};
pub use shape::Shape;
pub use sinks::{FrameView, NullSinks, RenderSink, ScoreSink, Sinks};
pub use well::Well;
