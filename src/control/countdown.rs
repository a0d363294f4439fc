//! Countdown timer model.
//!
//! Tracks the configured session length and when the session (re)started.
//! Every extending interaction calls [`CountdownModel::reset`]; the session
//! ends once a full `initial_minutes` have elapsed since the last reset.

use super::Direction;
use crate::app::ports::elapsed_ms;
use crate::config::{MINUTES_MAX, MINUTES_MIN};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownModel {
    initial_minutes: u8,
    start_ms: u32,
    /// Increment sign used by [`bump`](Self::bump). Independent of the
    /// level stepper's direction.
    sign: Direction,
    minute_ms: u32,
}

impl CountdownModel {
    pub fn new(initial_minutes: u8, now_ms: u32, minute_ms: u32) -> Self {
        let initial_minutes = initial_minutes.clamp(MINUTES_MIN, MINUTES_MAX);
        Self {
            initial_minutes,
            start_ms: now_ms,
            sign: Direction::Up.bounded(initial_minutes, MINUTES_MIN, MINUTES_MAX),
            minute_ms,
        }
    }

    /// Whole minutes left, truncating. Zero or negative means expired.
    pub fn remaining_minutes(&self, now_ms: u32) -> i32 {
        let elapsed_minutes = elapsed_ms(now_ms, self.start_ms) / self.minute_ms;
        i32::from(self.initial_minutes) - elapsed_minutes as i32
    }

    pub fn is_expired(&self, now_ms: u32) -> bool {
        elapsed_ms(now_ms, self.start_ms) >= u32::from(self.initial_minutes) * self.minute_ms
    }

    /// Restart the session at `now_ms`.
    pub fn reset(&mut self, now_ms: u32) {
        self.start_ms = now_ms;
    }

    /// Step the session length by the current sign, reversing at 1 and 31,
    /// and restart the session. Returns the new length.
    pub fn bump(&mut self, now_ms: u32) -> u8 {
        self.initial_minutes = self.sign.apply(self.initial_minutes);
        self.sign = self
            .sign
            .bounded(self.initial_minutes, MINUTES_MIN, MINUTES_MAX);
        self.reset(now_ms);
        self.initial_minutes
    }

    pub fn initial_minutes(&self) -> u8 {
        self.initial_minutes
    }

    pub fn start_ms(&self) -> u32 {
        self.start_ms
    }

    pub fn sign(&self) -> Direction {
        self.sign
    }
}
