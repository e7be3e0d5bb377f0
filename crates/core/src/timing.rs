//! Timing module - gravity and lock delay
//!
//! Both timers are plain counters advanced only by the engine's `advance`
//! call; nothing here reads a clock.

use serde::{Deserialize, Serialize};

/// Accumulates elapsed time and reports when an automatic drop is due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GravityClock {
    interval_ms: u32,
    accumulated_ms: u32,
}

impl GravityClock {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            accumulated_ms: 0,
        }
    }

    /// Add elapsed time; returns true once the accumulator exceeds the interval.
    ///
    /// The accumulator keeps its value until [`GravityClock::reset`], so a
    /// drop that could not happen is retried on the next call.
    pub fn accumulate(&mut self, elapsed_ms: u32) -> bool {
        self.accumulated_ms = self.accumulated_ms.saturating_add(elapsed_ms);
        self.accumulated_ms > self.interval_ms
    }

    pub fn reset(&mut self) {
        self.accumulated_ms = 0;
    }

    pub fn accumulated_ms(&self) -> u32 {
        self.accumulated_ms
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }
}

/// How often a grounded piece may earn a fresh grace window by moving or rotating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockResetPolicy {
    /// Every successful move or rotation restarts the timer
    #[default]
    Unlimited,
    /// At most this many restarts per spawned piece
    Limited(u32),
}

/// Lock delay state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Airborne,
    Grounded { timer_ms: u32 },
}

/// Lock-delay state machine
///
/// `Airborne` → `Grounded` when a downward move fails; back to `Airborne` when
/// one succeeds. While grounded the timer runs, and [`LockController::tick`]
/// reports when it reaches the delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockController {
    state: LockState,
    delay_ms: u32,
    policy: LockResetPolicy,
    resets_used: u32,
}

impl LockController {
    pub fn new(delay_ms: u32, policy: LockResetPolicy) -> Self {
        Self {
            state: LockState::Airborne,
            delay_ms,
            policy,
            resets_used: 0,
        }
    }

    /// Feed the outcome of a downward move attempt
    pub fn on_drop_attempt(&mut self, moved: bool) {
        self.state = match (moved, self.state) {
            (true, _) => LockState::Airborne,
            (false, LockState::Grounded { timer_ms }) => LockState::Grounded { timer_ms },
            (false, LockState::Airborne) => LockState::Grounded { timer_ms: 0 },
        };
    }

    /// Successful lateral move or rotation.
    ///
    /// While grounded this restarts the timer (subject to the reset policy)
    /// but stays grounded. Returns whether the timer was restarted.
    pub fn on_shift(&mut self) -> bool {
        let LockState::Grounded { .. } = self.state else {
            return false;
        };
        if let LockResetPolicy::Limited(max) = self.policy {
            if self.resets_used >= max {
                return false;
            }
        }
        self.resets_used += 1;
        self.state = LockState::Grounded { timer_ms: 0 };
        true
    }

    /// Advance the grace timer; returns true when the piece must lock now
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        match self.state {
            LockState::Airborne => false,
            LockState::Grounded { timer_ms } => {
                let timer_ms = timer_ms.saturating_add(elapsed_ms);
                self.state = LockState::Grounded { timer_ms };
                timer_ms >= self.delay_ms
            }
        }
    }

    /// Back to `Airborne` with a fresh reset budget (new piece)
    pub fn reset(&mut self) {
        self.state = LockState::Airborne;
        self.resets_used = 0;
    }

    pub fn state(&self) -> LockState {
        self.state
    }

    pub fn is_grounded(&self) -> bool {
        matches!(self.state, LockState::Grounded { .. })
    }

    pub fn timer_ms(&self) -> u32 {
        match self.state {
            LockState::Airborne => 0,
            LockState::Grounded { timer_ms } => timer_ms,
        }
    }

    pub fn resets_used(&self) -> u32 {
        self.resets_used
    }
}
