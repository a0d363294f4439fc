//! Controller state aggregate.
//!
//! Everything the control loop mutates lives in one [`ControllerState`]
//! owned by the [`Controller`](super::controller::Controller) and lent to
//! each component operation.

use super::ports::elapsed_ms;
use super::settings::Settings;
use crate::config::ControllerConfig;
use crate::control::countdown::CountdownModel;
use crate::control::level::LevelStepper;

/// Binary display bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayState {
    /// Last value rendered on the five LEDs.
    pub last_shown: u8,
    pub visible: bool,
    /// Time of the last short press that showed or changed the display.
    pub last_interaction_ms: u32,
}

impl DisplayState {
    /// Mark the display shown as of `now_ms`.
    pub fn touch(&mut self, now_ms: u32) {
        self.visible = true;
        self.last_interaction_ms = now_ms;
    }

    /// Visible and not interacted with for at least `timeout_ms`.
    pub fn is_stale(&self, now_ms: u32, timeout_ms: u32) -> bool {
        self.visible && elapsed_ms(now_ms, self.last_interaction_ms) >= timeout_ms
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerState {
    pub countdown: CountdownModel,
    pub light: LevelStepper,
    pub display: DisplayState,
    /// Level index the illumination is currently driven at; 0 once the
    /// illumination has been cut.
    pub illumination: u8,
    pub powered_off: bool,
}

impl ControllerState {
    pub fn new(settings: &Settings, now_ms: u32, config: &ControllerConfig) -> Self {
        Self {
            countdown: CountdownModel::new(settings.minutes, now_ms, config.minute_ms),
            light: LevelStepper::new(settings.level),
            display: DisplayState::default(),
            illumination: 0,
            powered_off: false,
        }
    }
}
