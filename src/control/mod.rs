//! Bounded counters driven by the user buttons.
//!
//! Both counters "ping-pong": they reverse at their bounds instead of
//! wrapping. They keep separate [`Direction`] state.

pub mod countdown;
pub mod level;

/// Travel direction of a ping-pong counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Signed increment applied per step.
    pub const fn delta(self) -> i8 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }

    /// Direction that keeps `value` inside `[min, max]` on the next step.
    ///
    /// Reverses exactly at the bounds and leaves it unchanged elsewhere.
    pub fn bounded(self, value: u8, min: u8, max: u8) -> Self {
        if value >= max {
            Self::Down
        } else if value <= min {
            Self::Up
        } else {
            self
        }
    }

    /// Apply one step to `value`.
    pub fn apply(self, value: u8) -> u8 {
        value.saturating_add_signed(self.delta())
    }
}
