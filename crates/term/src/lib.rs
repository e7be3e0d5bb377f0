//! Terminal rendering for blockfall.
//!
//! A snapshot of the engine is laid out into a [`FrameBuffer`] by
//! [`GameView`], and [`TerminalRenderer`] writes only the rows that changed
//! since the previous frame.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{piece_color, GameView, Viewport};
pub use renderer::{dirty_span, encode_frame, TerminalRenderer};
