//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, so they
//! can be used by the engine, the input adapters and the terminal renderer.
//!
//! # Well Dimensions
//!
//! - **Width**: 10 columns by default (indexed 0-9)
//! - **Height**: 20 rows by default (indexed 0-19, row 0 is the top)
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame interval of the terminal runner (~60 FPS) |
//! | `DEFAULT_DROP_INTERVAL_MS` | 1000 | Gravity period |
//!
//! # Examples
//!
//! ```
//! use tui_blockfall_types::{GameAction, PieceKind, RotateDir, DEFAULT_COLS, DEFAULT_ROWS};
//!
//! let piece = PieceKind::from_str("o").unwrap();
//! assert_eq!(piece.color_id(), 4);
//! assert_eq!(PieceKind::from_color_id(4), Some(PieceKind::O));
//!
//! assert_eq!(RotateDir::Cw.inverse(), RotateDir::Ccw);
//!
//! let action = GameAction::from_str("hardDrop").unwrap();
//! assert_eq!(action, GameAction::HardDrop);
//!
//! assert_eq!(DEFAULT_COLS, 10);
//! assert_eq!(DEFAULT_ROWS, 20);
//! ```

/// Default well width in cells
pub const DEFAULT_COLS: u16 = 10;

/// Default well height in cells
pub const DEFAULT_ROWS: u16 = 20;

/// Largest width or height the runner accepts from configuration
pub const MAX_WELL_DIM: u16 = 256;

/// Frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Default gravity period (one row per second)
pub const DEFAULT_DROP_INTERVAL_MS: u64 = 1000;

/// Points for the first row of a sweep; each further row in the same sweep doubles it.
pub const LINE_BASE_POINTS: u32 = 10;

/// Distance a touch must travel before it counts as a gesture.
pub const TOUCH_THRESHOLD_PX: f32 = 30.0;

/// Largest colour id a cell can carry.
pub const MAX_COLOR_ID: u8 = 7;

/// The seven tetromino piece kinds
///
/// The declaration order is the colour-id order: `I` is 1, `Z` is 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    L,
    J,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds, indexed by `color_id() - 1`.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::L,
        PieceKind::J,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Colour-table index stored in the well (1..=7).
    ///
    /// ```
    /// use tui_blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.color_id(), 1);
    /// assert_eq!(PieceKind::Z.color_id(), 7);
    /// ```
    pub fn color_id(self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::L => 2,
            PieceKind::J => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Inverse of [`color_id`](Self::color_id); `0` and anything above 7 yield `None`.
    pub fn from_color_id(id: u8) -> Option<Self> {
        match id {
            1..=MAX_COLOR_ID => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// ```
    /// use tui_blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("T"), Some(PieceKind::T));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Uppercase letter, used by logs and the preview panel.
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::L => "L",
            PieceKind::J => "J",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }
}

/// Direction of a quarter turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotateDir {
    /// Clockwise (+1)
    Cw,
    /// Counter-clockwise (-1)
    Ccw,
}

impl RotateDir {
    /// The turn that undoes this one.
    pub fn inverse(self) -> Self {
        match self {
            RotateDir::Cw => RotateDir::Ccw,
            RotateDir::Ccw => RotateDir::Cw,
        }
    }

    /// `+1` for clockwise, `-1` for counter-clockwise.
    pub fn sign(self) -> i32 {
        match self {
            RotateDir::Cw => 1,
            RotateDir::Ccw => -1,
        }
    }
}

/// Top-left corner of a piece matrix in well coordinates.
///
/// `x` grows to the right, `y` grows downward. Either may be negative while a
/// wall-kick or a collision probe is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Same position shifted by `(dx, dy)`.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Game intents delivered by an input source
///
/// Keyboard and touch adapters both translate raw events into these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell (lands it if blocked)
    SoftDrop,
    /// Drop piece to the lowest valid row and land it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Toggle pause state
    Pause,
    /// Reset the session
    Restart,
}

impl GameAction {
    pub const ALL: [GameAction; 8] = [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::HardDrop,
        GameAction::RotateCw,
        GameAction::RotateCcw,
        GameAction::Pause,
        GameAction::Restart,
    ];

    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// ```
    /// use tui_blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("ROTATECCW"), Some(GameAction::RotateCcw));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// camelCase name, the inverse of [`from_str`](Self::from_str)
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}

/// A cell of the well or of a piece matrix
///
/// - `None`: empty (colour id 0)
/// - `Some(PieceKind)`: filled with that kind's colour id
pub type Cell = Option<PieceKind>;

/// Numeric view of a cell (0 for empty, 1..=7 otherwise).
pub fn cell_value(cell: Cell) -> u8 {
    cell.map_or(0, PieceKind::color_id)
}
