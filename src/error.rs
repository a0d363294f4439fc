//! Unified error types for the modellight firmware.
//!
//! A single `Error` enum that every driver and port failure converts into,
//! keeping the control loop's error handling uniform. All variants are
//! `Copy` so they pass through the loop without allocation.
//!
//! Out-of-domain arguments (a light level above 5, a display value above 31)
//! are not errors: the fade engine ignores them.

use core::fmt;

use crate::app::ports::StorageError;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A button input could not be sampled.
    ButtonRead,
    /// A PWM duty-cycle write failed.
    PwmWrite,
    /// The supply-hold output could not be driven.
    PowerLatch,
    /// The settings store failed.
    Storage(StorageError),
    /// Peripheral initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ButtonRead => write!(f, "button read failed"),
            Self::PwmWrite => write!(f, "PWM write failed"),
            Self::PowerLatch => write!(f, "power latch write failed"),
            Self::Storage(e) => write!(f, "storage: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
