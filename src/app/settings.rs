//! Persistent user settings.
//!
//! Two bytes survive a power cycle: the countdown length and the light
//! level. They are read once at boot and written back only at shutdown,
//! and only when they changed.
//!
//! A missing, unreadable or out-of-range slot is replaced by its default
//! and rewritten at once, so corruption never survives more than one boot.

use core::ops::RangeInclusive;

use log::{info, warn};

use super::ports::{SettingsStore, Slot, StorageError};
use crate::config::{LEVEL_DEFAULT, LEVEL_MAX, LEVEL_MIN, MINUTES_DEFAULT, MINUTES_MAX, MINUTES_MIN};
use crate::error::Result;

const MINUTES_RANGE: RangeInclusive<u8> = MINUTES_MIN..=MINUTES_MAX;
const LEVEL_RANGE: RangeInclusive<u8> = LEVEL_MIN..=LEVEL_MAX;

/// Validated settings plus the bytes currently in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub minutes: u8,
    pub level: u8,
    stored_minutes: Option<u8>,
    stored_level: Option<u8>,
}

impl Settings {
    /// Read and validate both slots, repairing any that are bad.
    pub fn load<S: SettingsStore>(store: &mut S) -> Self {
        let (minutes, stored_minutes) =
            load_slot(store, Slot::TimerMinutes, &MINUTES_RANGE, MINUTES_DEFAULT);
        let (level, stored_level) = load_slot(store, Slot::LightLevel, &LEVEL_RANGE, LEVEL_DEFAULT);
        info!("settings: {} min, level {}", minutes, level);
        Self {
            minutes,
            level,
            stored_minutes,
            stored_level,
        }
    }

    /// Write back whichever of `minutes` / `level` differs from the store.
    ///
    /// Both slots are attempted; the first failure is returned.
    pub fn persist<S: SettingsStore>(&mut self, store: &mut S, minutes: u8, level: u8) -> Result<()> {
        self.minutes = minutes;
        self.level = level;

        let first = write_if_changed(store, Slot::TimerMinutes, minutes, &mut self.stored_minutes);
        let second = write_if_changed(store, Slot::LightLevel, level, &mut self.stored_level);
        first.and(second).map_err(Into::into)
    }
}

/// Returns the value to use and what the store now holds (`None` if the
/// repair write failed).
fn load_slot<S: SettingsStore>(
    store: &mut S,
    slot: Slot,
    valid: &RangeInclusive<u8>,
    default: u8,
) -> (u8, Option<u8>) {
    match store.read(slot) {
        Ok(v) if valid.contains(&v) => return (v, Some(v)),
        Ok(v) => warn!("settings: {:?}={} out of range, resetting to {}", slot, v, default),
        Err(StorageError::NotFound) => info!("settings: {:?} unset, using {}", slot, default),
        Err(e) => warn!("settings: {:?} read failed ({}), using {}", slot, e, default),
    }

    match store.write(slot, default) {
        Ok(()) => (default, Some(default)),
        Err(e) => {
            warn!("settings: {:?} repair write failed ({})", slot, e);
            (default, None)
        }
    }
}

fn write_if_changed<S: SettingsStore>(
    store: &mut S,
    slot: Slot,
    value: u8,
    stored: &mut Option<u8>,
) -> core::result::Result<(), StorageError> {
    if *stored == Some(value) {
        return Ok(());
    }
    store.write(slot, value).inspect_err(|e| {
        warn!("settings: {:?} write failed ({})", slot, e);
    })?;
    info!("settings: {:?} <- {}", slot, value);
    *stored = Some(value);
    Ok(())
}
