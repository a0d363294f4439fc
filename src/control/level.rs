//! Illumination level stepper.
//!
//! Repeated presses of the level button walk the light through
//! 1,2,3,4,5,4,3,2,1,2,... The direction is corrected right after each
//! step, so the very next step already moves away from the bound.

use super::Direction;
use crate::config::{LEVEL_MAX, LEVEL_MIN};

/// Ping-pong level counter over `LEVEL_MIN..=LEVEL_MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelStepper {
    level: u8,
    direction: Direction,
}

impl LevelStepper {
    /// Start at `level` heading up (or down if already at the top).
    pub fn new(level: u8) -> Self {
        Self::with_direction(level, Direction::Up)
    }

    /// Start at `level` with an explicit direction, normalised against the
    /// bounds before the first step.
    pub fn with_direction(level: u8, direction: Direction) -> Self {
        let level = level.clamp(LEVEL_MIN, LEVEL_MAX);
        Self {
            level,
            direction: direction.bounded(level, LEVEL_MIN, LEVEL_MAX),
        }
    }

    /// Advance one level and return the new level.
    pub fn step(&mut self) -> u8 {
        self.level = self.direction.apply(self.level);
        self.direction = self.direction.bounded(self.level, LEVEL_MIN, LEVEL_MAX);
        self.level
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}
