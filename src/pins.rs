//! GPIO / peripheral pin assignments for the modellight controller board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Buttons (active-low with pull-up)
// ---------------------------------------------------------------------------

/// Main button: short press shows / bumps the timer, long press powers off.
pub const MAIN_BUTTON_GPIO: i32 = 4;
/// Level-select button: steps the illumination level.
pub const LEVEL_BUTTON_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Supply latch
// ---------------------------------------------------------------------------

/// Digital output held HIGH from boot to keep the supply on; LOW cuts power.
pub const POWER_HOLD_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// PWM outputs
// ---------------------------------------------------------------------------

/// Model illumination (MOSFET gate).
pub const ILLUMINATION_GPIO: i32 = 7;

/// Binary display LEDs, least significant bit first.
pub const DISPLAY_GPIOS: [i32; 5] = [8, 9, 10, 11, 12];

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits).  8-bit gives 0 – 255 duty levels.
pub const PWM_RESOLUTION_BITS: u32 = 8;
/// LEDC frequency for all LED outputs (1 kHz, flicker-free).
pub const LED_PWM_FREQ_HZ: u32 = 1_000;
