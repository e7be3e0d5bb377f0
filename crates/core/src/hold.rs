//! Hold slot - one stashed piece kind, exchangeable once per spawn cycle

use crate::types::PieceKind;

/// Outcome of a successful hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldExchange {
    /// The slot was empty; the caller spawns the next piece
    Stored,
    /// The slot held this kind; it becomes the active piece
    Swapped(PieceKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HoldSlot {
    kind: Option<PieceKind>,
    used: bool,
}

impl HoldSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `active` into the slot.
    ///
    /// Returns `None` without touching anything if the slot was already used
    /// this spawn cycle.
    pub fn exchange(&mut self, active: PieceKind) -> Option<HoldExchange> {
        if self.used {
            return None;
        }
        self.used = true;
        match self.kind.replace(active) {
            None => Some(HoldExchange::Stored),
            Some(previous) => Some(HoldExchange::Swapped(previous)),
        }
    }

    /// Allow one more exchange (called on bag-driven spawns only)
    pub fn rearm(&mut self) {
        self.used = false;
    }

    /// Empty the slot and clear the used flag
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn kind(&self) -> Option<PieceKind> {
        self.kind
    }

    pub fn is_used(&self) -> bool {
        self.used
    }
}
