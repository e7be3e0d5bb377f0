//! Core types module - shared data structures and constants
//!
//! This crate defines the plain data shared by the engine, the terminal view
//! and the input mapping. Nothing in here has behavior beyond conversions.
//!
//! # Reference instance
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BOARD_WIDTH` | 12 | Columns in the playfield |
//! | `BOARD_HEIGHT` | 20 | Rows in the playfield (row 0 is the top) |
//! | `DROP_INTERVAL_MS` | 1000 | Gravity interval |
//! | `LOCK_DELAY_MS` | 500 | Grace period before a grounded piece locks |
//! | `TICK_MS` | 16 | Nominal frame length used by tests and benches |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceKind, RotationDirection, BOARD_WIDTH};
//!
//! let kind = PieceKind::from_str("t").unwrap();
//! assert_eq!(kind, PieceKind::T);
//! assert_eq!(kind.cell(), 1);
//! assert_eq!(PieceKind::from_cell(5), Some(PieceKind::I));
//!
//! assert_eq!(RotationDirection::Clockwise.opposite(), RotationDirection::CounterClockwise);
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//! assert_eq!(BOARD_WIDTH, 12);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (12 columns)
pub const BOARD_WIDTH: u8 = 12;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Automatic fall interval (one row per second)
pub const DROP_INTERVAL_MS: u32 = 1000;

/// Lock delay once the active piece rests on an obstruction
pub const LOCK_DELAY_MS: u32 = 500;

/// Nominal frame length (~60 FPS)
pub const TICK_MS: u32 = 16;

/// Largest side of a piece shape grid
pub const MAX_SHAPE_SIZE: usize = 4;

/// Number of distinct piece kinds
pub const PIECE_KIND_COUNT: usize = 7;

/// A cell on the board or inside a shape.
///
/// `0` is empty, `1..=7` is the tag of the piece kind that filled it.
pub type Cell = u8;

/// The empty cell value
pub const EMPTY: Cell = 0;

/// The seven piece kinds.
///
/// Declaration order matches the cell tags: T=1, O=2, L=3, J=4, I=5, S=6, Z=7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceKind {
    T,
    O,
    L,
    J,
    I,
    S,
    Z,
}

impl PieceKind {
    /// All kinds in cell-tag order
    pub const ALL: [PieceKind; PIECE_KIND_COUNT] = [
        PieceKind::T,
        PieceKind::O,
        PieceKind::L,
        PieceKind::J,
        PieceKind::I,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("I"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("z"), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "t" => Some(PieceKind::T),
            "o" => Some(PieceKind::O),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "i" => Some(PieceKind::I),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Uppercase single-letter name
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::T => "T",
            PieceKind::O => "O",
            PieceKind::L => "L",
            PieceKind::J => "J",
            PieceKind::I => "I",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
        }
    }

    /// Cell tag written into the board when this kind locks
    pub fn cell(&self) -> Cell {
        match self {
            PieceKind::T => 1,
            PieceKind::O => 2,
            PieceKind::L => 3,
            PieceKind::J => 4,
            PieceKind::I => 5,
            PieceKind::S => 6,
            PieceKind::Z => 7,
        }
    }

    /// Kind for a cell tag; `None` for empty or unknown values
    pub fn from_cell(cell: Cell) -> Option<Self> {
        match cell {
            1..=7 => Some(Self::ALL[(cell - 1) as usize]),
            _ => None,
        }
    }
}

/// Quarter-turn direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    /// The turn that undoes this one
    pub fn opposite(&self) -> Self {
        match self {
            RotationDirection::Clockwise => RotationDirection::CounterClockwise,
            RotationDirection::CounterClockwise => RotationDirection::Clockwise,
        }
    }
}

/// Commands accepted by the engine
///
/// Each action maps onto one engine method; both the keyboard front end and
/// tests drive the engine through this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    SoftDrop,
    /// Drop to the ghost position and lock immediately
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Stash the active piece or swap with the stashed one
    Hold,
    /// Toggle pause state
    Pause,
    /// Reset to a fresh round
    Restart,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("ROTATECCW"), Some(GameAction::RotateCcw));
    /// assert_eq!(GameAction::from_str("jump"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "hold" => Some(GameAction::Hold),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Hold => "hold",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}

/// Notifications raised by the engine for its collaborators.
///
/// Queued in occurrence order and drained by the caller once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EngineEvent {
    /// One or more rows were swept after a lock
    LinesCleared(u32),
    /// The active piece was merged into the board
    PieceLocked,
    /// A freshly spawned piece collided; the round is halted
    GameOver,
    /// The given kind was placed into the hold slot
    Held(PieceKind),
}
