//! Game state module - the engine that owns a round
//!
//! `GameEngine` ties the board, the bag, the hold slot and both timers
//! together. It is driven from outside: `advance` once per frame with the
//! elapsed milliseconds, and command methods from input callbacks. Every call
//! runs to completion; nothing here blocks or re-enters.

use std::collections::VecDeque;

use tracing::{debug, info, trace, warn};

use crate::board::Board;
use crate::config::{ConfigError, EngineConfig};
use crate::ghost;
use crate::hold::{HoldExchange, HoldSlot};
use crate::pieces::{Shape, ShapeTable};
use crate::rng::RandomBag;
use crate::rotation;
use crate::timing::{GravityClock, LockController, LockState};
use crate::types::*;

/// Pending events kept for `drain_events`; older ones are dropped past this
pub const MAX_PENDING_EVENTS: usize = 64;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: Shape,
    /// Column of the shape's top-left corner
    pub x: i16,
    /// Row of the shape's top-left corner
    pub y: i16,
}

impl ActivePiece {
    /// Place `shape` horizontally centered on the top row
    pub fn spawn(kind: PieceKind, shape: Shape, board_width: u8) -> Self {
        Self {
            kind,
            shape,
            x: (board_width / 2) as i16 - (shape.size() / 2) as i16,
            y: 0,
        }
    }

    /// Would the piece collide after moving by `(dx, dy)`?
    pub fn collides_at(&self, board: &Board, dx: i16, dy: i16) -> bool {
        board.collides(&self.shape, self.x + dx, self.y + dy)
    }

    /// Absolute board coordinates of the occupied cells
    pub fn cells(&self) -> impl Iterator<Item = (i16, i16)> + '_ {
        self.shape
            .occupied()
            .into_iter()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameEngine {
    config: EngineConfig,
    shapes: ShapeTable,
    board: Board,
    active: Option<ActivePiece>,
    hold: HoldSlot,
    bag: RandomBag,
    /// Lookahead: the kind the next bag-driven spawn will use
    next: PieceKind,
    gravity: GravityClock,
    lock: LockController,
    events: VecDeque<EngineEvent>,
    lines: u32,
    paused: bool,
    game_over: bool,
}

impl GameEngine {
    /// Start a round on the reference configuration
    pub fn new(seed: u64) -> Self {
        Self::build(EngineConfig::default(), ShapeTable::default(), seed)
    }

    /// Start a round on a custom configuration
    pub fn with_config(config: EngineConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let shapes = config.shape_table()?;
        Ok(Self::build(config, shapes, seed))
    }

    fn build(config: EngineConfig, shapes: ShapeTable, seed: u64) -> Self {
        let mut bag = RandomBag::new(seed);
        let next = bag.next();

        let mut engine = Self {
            board: Board::new(config.board_width, config.board_height),
            active: None,
            hold: HoldSlot::new(),
            bag,
            next,
            gravity: GravityClock::new(config.fall_interval_ms),
            lock: LockController::new(config.lock_delay_ms, config.lock_reset_policy),
            events: VecDeque::with_capacity(MAX_PENDING_EVENTS),
            lines: 0,
            paused: false,
            game_over: false,
            shapes,
            config,
        };
        engine.spawn();
        engine
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    /// Where the active piece would land if hard-dropped
    pub fn ghost_position(&self) -> Option<(i16, i16)> {
        self.active
            .as_ref()
            .map(|piece| ghost::project(&self.board, piece))
    }

    pub fn hold_kind(&self) -> Option<PieceKind> {
        self.hold.kind()
    }

    /// Has the hold slot been used since the last bag-driven spawn?
    pub fn hold_used(&self) -> bool {
        self.hold.is_used()
    }

    pub fn next_kind(&self) -> PieceKind {
        self.next
    }

    pub fn lock_state(&self) -> LockState {
        self.lock.state()
    }

    /// Time accumulated towards the next automatic drop
    pub fn drop_timer_ms(&self) -> u32 {
        self.gravity.accumulated_ms()
    }

    /// Rows cleared since the last reset
    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn seed(&self) -> u64 {
        self.bag.seed()
    }

    /// Take every event raised since the previous call, oldest first.
    ///
    /// Call this regularly (once per frame). Only the latest
    /// [`MAX_PENDING_EVENTS`] are retained between calls.
    pub fn drain_events(&mut self) -> std::collections::vec_deque::Drain<'_, EngineEvent> {
        self.events.drain(..)
    }

    fn raise(&mut self, event: EngineEvent) {
        if self.events.len() == MAX_PENDING_EVENTS {
            if let Some(dropped) = self.events.pop_front() {
                warn!(?dropped, "event queue full, dropping oldest");
            }
        }
        self.events.push_back(event);
    }

    /// Is the engine accepting gameplay input?
    fn is_live(&self) -> bool {
        !self.paused && !self.game_over && self.active.is_some()
    }

    /// Spawn the lookahead piece and draw a new lookahead from the bag.
    ///
    /// Clears the hold-used flag. Returns false (and ends the round) if the new
    /// piece collides where it appears.
    pub(crate) fn spawn(&mut self) -> bool {
        self.hold.rearm();
        self.spawn_next()
    }

    /// Spawn without touching the hold flag (used by the hold command)
    fn spawn_next(&mut self) -> bool {
        let kind = self.next;
        self.next = self.bag.next();
        self.place(kind)
    }

    /// Put a fresh piece of `kind` at the spawn position
    fn place(&mut self, kind: PieceKind) -> bool {
        let piece = ActivePiece::spawn(kind, self.shapes.get(kind), self.board.width());
        self.gravity.reset();
        self.lock.reset();

        if piece.collides_at(&self.board, 0, 0) {
            self.end_round();
            return false;
        }
        trace!(kind = kind.as_str(), x = piece.x, "spawned piece");
        self.active = Some(piece);
        true
    }

    fn end_round(&mut self) {
        info!(lines = self.lines, "game over");
        self.board.reset();
        self.hold.clear();
        self.active = None;
        self.game_over = true;
        self.raise(EngineEvent::GameOver);
    }

    /// Advance timers by `elapsed_ms`.
    ///
    /// Performs at most one automatic drop, then runs the lock timer if the
    /// piece is grounded and locks it when the delay has passed.
    pub fn advance(&mut self, elapsed_ms: u32) {
        if !self.is_live() {
            return;
        }

        if self.gravity.accumulate(elapsed_ms) {
            self.step_down();
        }

        if self.lock.tick(elapsed_ms) {
            self.lock_active();
        }
    }

    /// One row down; feeds the lock controller either way
    fn step_down(&mut self) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };

        if piece.collides_at(&self.board, 0, 1) {
            self.lock.on_drop_attempt(false);
            return false;
        }
        piece.y += 1;
        self.lock.on_drop_attempt(true);
        self.gravity.reset();
        true
    }

    fn shift(&mut self, dx: i16) -> bool {
        if !self.is_live() {
            return false;
        }
        let Some(piece) = self.active.as_mut() else {
            return false;
        };

        if piece.collides_at(&self.board, dx, 0) {
            return false;
        }
        piece.x += dx;
        self.lock.on_shift();
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.shift(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.shift(1)
    }

    pub fn soft_drop(&mut self) -> bool {
        if !self.is_live() {
            return false;
        }
        self.step_down()
    }

    fn rotate(&mut self, direction: RotationDirection) -> bool {
        if !self.is_live() {
            return false;
        }
        let Some(piece) = self.active.as_mut() else {
            return false;
        };

        match rotation::resolve(&self.board, piece, direction) {
            Some(_) => {
                self.lock.on_shift();
                true
            }
            None => false,
        }
    }

    pub fn rotate_cw(&mut self) -> bool {
        self.rotate(RotationDirection::Clockwise)
    }

    pub fn rotate_ccw(&mut self) -> bool {
        self.rotate(RotationDirection::CounterClockwise)
    }

    /// Drop to the ghost position and lock immediately
    pub fn hard_drop(&mut self) -> bool {
        if !self.is_live() {
            return false;
        }
        let Some(ghost_y) = self.ghost_position().map(|(_, y)| y) else {
            return false;
        };
        if let Some(piece) = self.active.as_mut() {
            piece.y = ghost_y;
        }
        self.lock.on_drop_attempt(false);
        self.lock_active();
        true
    }

    /// Stash the active piece, or swap it with the stashed one.
    ///
    /// Allowed once per bag-driven spawn; later calls are no-ops.
    pub fn hold(&mut self) -> bool {
        if !self.is_live() {
            return false;
        }
        let Some(kind) = self.active.map(|piece| piece.kind) else {
            return false;
        };
        let Some(exchange) = self.hold.exchange(kind) else {
            return false;
        };

        debug!(kind = kind.as_str(), "held piece");
        self.raise(EngineEvent::Held(kind));
        self.active = None;
        match exchange {
            HoldExchange::Stored => self.spawn_next(),
            HoldExchange::Swapped(previous) => self.place(previous),
        };
        true
    }

    /// Merge the active piece, sweep rows, and spawn the next piece
    fn lock_active(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        self.board.merge(&piece.shape, piece.x, piece.y);
        self.raise(EngineEvent::PieceLocked);

        let cleared = self.board.sweep_completed_rows() as u32;
        debug!(kind = piece.kind.as_str(), x = piece.x, y = piece.y, lines = cleared, "piece locked");
        if cleared > 0 {
            self.lines += cleared;
            self.raise(EngineEvent::LinesCleared(cleared));
        }

        self.spawn();
    }

    pub fn toggle_pause(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        self.paused = !self.paused;
        true
    }

    /// Return to a fresh round with a freshly shuffled bag
    pub fn reset(&mut self) {
        info!(seed = self.bag.seed(), "reset");
        self.board.reset();
        self.hold.clear();
        self.active = None;
        self.events.clear();
        self.lines = 0;
        self.paused = false;
        self.game_over = false;

        self.bag.discard();
        self.next = self.bag.next();
        self.spawn();
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::RotateCw => self.rotate_cw(),
            GameAction::RotateCcw => self.rotate_ccw(),
            GameAction::Hold => self.hold(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => {
                self.reset();
                true
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut crate::snapshot::GameSnapshot) {
        use crate::snapshot::{ActiveSnapshot, TimersSnapshot};

        out.width = self.board.width();
        out.height = self.board.height();
        out.board.clear();
        out.board.extend_from_slice(self.board.cells());

        out.active = self.active.map(|piece| {
            let (_, ghost_y) = ghost::project(&self.board, &piece);
            ActiveSnapshot {
                kind: piece.kind,
                shape: piece.shape,
                x: piece.x,
                y: piece.y,
                ghost_y,
            }
        });
        out.hold = self.hold.kind();
        out.hold_shape = self.hold.kind().map(|kind| self.shapes.get(kind));
        out.hold_used = self.hold.is_used();
        out.next = self.next;
        out.next_shape = self.shapes.get(self.next);
        out.lines = self.lines;
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.timers = TimersSnapshot {
            drop_ms: self.gravity.accumulated_ms(),
            lock_ms: self.lock.timer_ms(),
            grounded: self.lock.is_grounded(),
        };
    }

    pub fn snapshot(&self) -> crate::snapshot::GameSnapshot {
        let mut s = crate::snapshot::GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(1)
    }
}
