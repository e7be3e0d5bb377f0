//! Core game logic - pure, deterministic, and testable
//!
//! Everything that decides what happens in a round lives here: the grid, the
//! shapes and their rotation, the 7-bag generator, gravity and lock delay, the
//! hold slot, and the [`GameEngine`] that drives them. No terminal, clock, or
//! file access happens below the config loader, so the same seed and the same
//! sequence of calls always produce the same game.
//!
//! # Module Structure
//!
//! - [`board`]: grid storage, collision, merge, and row sweeping
//! - [`pieces`]: shape grids, the canonical shape table, quarter-turn rotation
//! - [`rotation`]: rotation with horizontal kick probing
//! - [`rng`]: 7-bag random piece generation
//! - [`timing`]: gravity clock and lock-delay state machine
//! - [`hold`]: the once-per-spawn hold slot
//! - [`ghost`]: landing position projection
//! - [`game_state`]: the engine
//! - [`config`]: tunables loaded from JSON
//! - [`snapshot`]: read-only view for renderers
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameEngine;
//! use blockfall_core::types::{EngineEvent, GameAction};
//!
//! let mut engine = GameEngine::new(12345);
//! engine.apply_action(GameAction::MoveRight);
//! engine.apply_action(GameAction::RotateCw);
//! engine.apply_action(GameAction::HardDrop);
//!
//! let events: Vec<_> = engine.drain_events().collect();
//! assert_eq!(events, vec![EngineEvent::PieceLocked]);
//! assert!(engine.active().is_some());
//! ```
//!
//! # Timing
//!
//! Call [`GameEngine::advance`] every frame with the elapsed milliseconds. A
//! piece falls one row once more than the fall interval (1000ms) has
//! accumulated, and locks after resting for the lock delay (500ms).

pub mod board;
pub mod config;
pub mod game_state;
pub mod ghost;
pub mod hold;
pub mod pieces;
pub mod rng;
pub mod rotation;
pub mod snapshot;
pub mod timing;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::{ConfigError, EngineConfig};
pub use game_state::{ActivePiece, GameEngine, MAX_PENDING_EVENTS};
pub use pieces::{get_shape, rotate, Shape, ShapeTable};
pub use rng::RandomBag;
pub use snapshot::{ActiveSnapshot, GameSnapshot, TimersSnapshot};
pub use timing::{LockResetPolicy, LockState};
