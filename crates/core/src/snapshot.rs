//! Read-only view of a round for renderers and tooling
//!
//! Filled by [`GameEngine::snapshot_into`](crate::game_state::GameEngine::snapshot_into),
//! which reuses the board buffer so a front end can refresh one snapshot
//! every frame without allocating.

use serde::Serialize;

use crate::pieces::{get_shape, Shape};
use crate::types::{Cell, PieceKind, EMPTY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i16,
    pub y: i16,
    /// Row the piece would land on if hard-dropped
    pub ghost_y: i16,
}

impl ActiveSnapshot {
    /// Absolute cells of the piece, shifted to `top` instead of `y`
    pub fn cells_at(&self, top: i16) -> impl Iterator<Item = (i16, i16)> + '_ {
        self.shape
            .occupied()
            .into_iter()
            .map(move |(dx, dy)| (self.x + dx, top + dy))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct TimersSnapshot {
    pub drop_ms: u32,
    pub lock_ms: u32,
    pub grounded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    /// Row-major settled cells
    pub board: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    pub hold: Option<PieceKind>,
    /// Spawn shape of the held kind, for previews
    pub hold_shape: Option<Shape>,
    pub hold_used: bool,
    pub next: PieceKind,
    pub next_shape: Shape,
    pub lines: u32,
    pub paused: bool,
    pub game_over: bool,
    pub timers: TimersSnapshot,
}

impl GameSnapshot {
    /// Settled cell at `(x, y)`, `None` outside the grid
    pub fn cell(&self, x: i16, y: i16) -> Option<Cell> {
        if x < 0 || y < 0 || x >= self.width as i16 || y >= self.height as i16 {
            return None;
        }
        self.board
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Cell value as a player sees it: the active piece over the settled grid
    pub fn visible_cell(&self, x: i16, y: i16) -> Option<Cell> {
        let settled = self.cell(x, y)?;
        let Some(active) = &self.active else {
            return Some(settled);
        };
        if active.cells_at(active.y).any(|cell| cell == (x, y)) {
            return Some(active.kind.cell());
        }
        Some(settled)
    }

    /// Is `(x, y)` covered by the ghost and otherwise empty?
    pub fn is_ghost(&self, x: i16, y: i16) -> bool {
        let Some(active) = &self.active else {
            return false;
        };
        active.ghost_y != active.y
            && self.visible_cell(x, y) == Some(EMPTY)
            && active.cells_at(active.ghost_y).any(|cell| cell == (x, y))
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            board: Vec::new(),
            active: None,
            hold: None,
            hold_shape: None,
            hold_used: false,
            next: PieceKind::T,
            next_shape: get_shape(PieceKind::T),
            lines: 0,
            paused: false,
            game_over: false,
            timers: TimersSnapshot::default(),
        }
    }
}
