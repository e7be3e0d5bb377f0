//! Keyboard input for the terminal front end.
//!
//! Translates `crossterm` key events into engine commands. Nothing here holds
//! state: one key press maps to at most one command.

pub mod map;

pub use blockfall_types as types;

pub use map::{translate, Command};
