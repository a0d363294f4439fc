//! Port traits: the boundary between the controller logic and the board.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Controller (domain)
//! ```
//!
//! Buttons, PWM outputs and busy-wait delays use the `embedded-hal` 1.0
//! traits directly. The three capabilities `embedded-hal` has no trait for
//! are defined here: a free-running millisecond clock, the supply latch,
//! and the two-slot settings store.

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: hardware timer → domain)
// ───────────────────────────────────────────────────────────────

/// Free-running monotonic millisecond counter.
///
/// The counter wraps at `u32::MAX`; callers compare timestamps with
/// `wrapping_sub`, never with `<` on absolute values.
pub trait Clock {
    fn now_ms(&self) -> u32;
}

/// Milliseconds elapsed from `since` to `now`, tolerant of counter wrap.
pub fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}

// ───────────────────────────────────────────────────────────────
// Power port (driven adapter: domain → supply latch)
// ───────────────────────────────────────────────────────────────

/// Soft-power latch that keeps the board supplied.
pub trait PowerControl {
    /// Assert the supply-hold line. Called once at startup.
    fn keep_alive(&mut self);

    /// Release the supply-hold line. Idempotent; once called, the board is
    /// expected to lose power.
    fn cut_power(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Settings store port (driven adapter: domain ↔ NVS / EEPROM)
// ───────────────────────────────────────────────────────────────

/// One of the two independently addressed byte slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Countdown duration in minutes.
    TimerMinutes = 0,
    /// Illumination level index.
    LightLevel = 1,
}

impl Slot {
    /// Storage key for this slot.
    pub const fn key(self) -> &'static str {
        match self {
            Self::TimerMinutes => "minutes",
            Self::LightLevel => "level",
        }
    }
}

/// Byte-addressed persistent storage for the two user settings.
///
/// Range validation is the caller's job (see
/// [`Settings::load`](super::settings::Settings::load)); the store only
/// moves bytes.
pub trait SettingsStore {
    fn read(&mut self, slot: Slot) -> Result<u8, StorageError>;

    fn write(&mut self, slot: Slot, value: u8) -> Result<(), StorageError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`SettingsStore`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// Slot has never been written (fresh flash).
    NotFound,
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "slot not found"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
