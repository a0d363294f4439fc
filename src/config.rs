//! Controller configuration parameters
//!
//! Product timing constants for the illumination timer. These are fixed by
//! the hardware and the user-facing feel of the buttons; they are collected
//! here so no module carries a bare literal.

// ---------------------------------------------------------------------------
// Persistent setting bounds and defaults
// ---------------------------------------------------------------------------

/// Smallest countdown duration the binary display can express usefully.
pub const MINUTES_MIN: u8 = 1;
/// Largest countdown duration (five display bits).
pub const MINUTES_MAX: u8 = 31;
/// Substituted when the stored countdown duration is corrupt.
pub const MINUTES_DEFAULT: u8 = 10;

pub const LEVEL_MIN: u8 = 1;
pub const LEVEL_MAX: u8 = 5;
/// Substituted when the stored light level is corrupt.
pub const LEVEL_DEFAULT: u8 = 3;

/// Highest value the five-LED binary display can show.
pub const DISPLAY_MAX: u8 = 0b1_1111;

/// Core timing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    // --- Buttons ---
    /// Stable-release window that ends a press (milliseconds)
    pub debounce_ms: u32,
    /// Hold duration above which a press is long (milliseconds)
    pub long_press_ms: u32,

    // --- Display ---
    /// Time after the last short press before the display fades out (milliseconds)
    pub display_timeout_ms: u32,

    // --- Countdown ---
    /// Length of one countdown minute (milliseconds)
    pub minute_ms: u32,

    // --- Fades ---
    /// Delay per duty step on the illumination channel (microseconds)
    pub illumination_step_us: u32,
    /// Delay per duty step on the binary display (microseconds)
    pub display_step_us: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            // Buttons
            debounce_ms: 10,
            long_press_ms: 2000,

            // Display
            display_timeout_ms: 5000,

            // Countdown
            minute_ms: 60_000,

            // Fades
            illumination_step_us: 2000, // ~0.5 s full-scale
            display_step_us: 1500,      // ~0.4 s full-scale
        }
    }
}
