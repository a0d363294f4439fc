//! The control loop.
//!
//! [`Controller`] owns the board, the settings store and the
//! [`ControllerState`]. Each [`poll`](Controller::poll) runs one loop
//! iteration: the checks below are tried in order, and the first that fires
//! ends the iteration.
//!
//! ```text
//!  1. countdown expired      ──▶ shutdown
//!  2. display stale (5 s)    ──▶ fade display out
//!  3. level button           ──▶ step light level, restart countdown
//!  4. main button  short     ──▶ show display / bump minutes
//!                  long      ──▶ shutdown
//! ```
//!
//! Shutdown fades everything out, writes back changed settings and
//! releases the supply latch. The board is expected to lose power; any
//! later poll is a no-op.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;
use embedded_hal::pwm::SetDutyCycle;
use log::{debug, info, warn};

use super::ports::{Clock, PowerControl, SettingsStore};
use super::settings::Settings;
use super::state::ControllerState;
use crate::config::{ControllerConfig, DISPLAY_MAX};
use crate::drivers::button::{Gesture, GestureDetector};
use crate::drivers::fade::{DISPLAY_BITS, FadeEngine};
use crate::error::Result;

/// Everything the controller drives.
///
/// `time` is both the millisecond clock and the busy-wait delay used by
/// the fades.
pub struct Hardware<B, P, T, W> {
    pub main_button: B,
    pub level_button: B,
    pub illumination: P,
    pub display: [P; DISPLAY_BITS],
    pub time: T,
    pub power: W,
}

/// What one loop iteration did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Idle,
    DisplayHidden,
    LevelChanged(u8),
    DisplayShown(u8),
    MinutesBumped(u8),
    PoweredOff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownCause {
    Expired,
    LongPress,
}

pub struct Controller<B, P, T, W, S> {
    hw: Hardware<B, P, T, W>,
    store: S,
    settings: Settings,
    state: ControllerState,
    config: ControllerConfig,
    buttons: GestureDetector,
    fader: FadeEngine,
}

impl<B, P, T, W, S> Controller<B, P, T, W, S>
where
    B: InputPin,
    P: SetDutyCycle,
    T: Clock + DelayNs,
    W: PowerControl,
    S: SettingsStore,
{
    /// Construct the controller. Does **not** touch the outputs; call
    /// [`start`](Self::start) next.
    pub fn new(hw: Hardware<B, P, T, W>, store: S, settings: Settings, config: ControllerConfig) -> Self {
        let state = ControllerState::new(&settings, hw.time.now_ms(), &config);
        Self {
            hw,
            store,
            settings,
            state,
            buttons: GestureDetector::new(&config),
            fader: FadeEngine::new(&config),
            config,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Latch the supply, fade the illumination up to the stored level and
    /// start the countdown.
    pub fn start(&mut self) -> Result<()> {
        self.hw.power.keep_alive();

        let level = self.state.light.level();
        self.fader
            .fade(&mut self.hw.illumination, &mut self.hw.time, 0, level)?;
        self.state.illumination = level;

        self.state.countdown.reset(self.hw.time.now_ms());
        info!(
            "controller started: level {}, {} min",
            level,
            self.state.countdown.initial_minutes()
        );
        Ok(())
    }

    // ── Per-iteration orchestration ──────────────────────────

    /// Run one loop iteration.
    pub fn poll(&mut self) -> Result<Step> {
        if self.state.powered_off {
            return Ok(Step::PoweredOff);
        }

        let now = self.hw.time.now_ms();

        if self.state.countdown.is_expired(now) {
            self.shutdown(ShutdownCause::Expired);
            return Ok(Step::PoweredOff);
        }

        if self
            .state
            .display
            .is_stale(now, self.config.display_timeout_ms)
        {
            return self.hide_display();
        }

        if self
            .buttons
            .poll_secondary(&mut self.hw.level_button, &self.hw.time)?
        {
            return self.step_level();
        }

        match self.poll_main_button()? {
            Gesture::None => Ok(Step::Idle),
            Gesture::Short => self.short_press(),
            Gesture::Long => {
                self.shutdown(ShutdownCause::LongPress);
                Ok(Step::PoweredOff)
            }
        }
    }

    /// Poll the main button. Past the long-press threshold the illumination
    /// is dimmed to dark while the button is still held.
    fn poll_main_button(&mut self) -> Result<Gesture> {
        let Self {
            hw, state, buttons, fader, ..
        } = self;
        let Hardware {
            main_button,
            illumination,
            time,
            ..
        } = hw;

        buttons.poll(main_button, time, |time| {
            if state.illumination != 0 {
                debug!("long hold: dimming illumination");
                fader.fade(illumination, time, state.illumination, 0)?;
                state.illumination = 0;
            }
            Ok(())
        })
    }

    fn hide_display(&mut self) -> Result<Step> {
        let shown = self.state.display.last_shown;
        self.fader.fade_out(
            &mut self.hw.display,
            &mut self.hw.time,
            &mut self.state.display,
            shown,
        )?;
        self.state.display.visible = false;
        debug!("display hidden");
        Ok(Step::DisplayHidden)
    }

    fn step_level(&mut self) -> Result<Step> {
        let from = self.state.illumination;
        let to = self.state.light.step();
        self.fader
            .fade(&mut self.hw.illumination, &mut self.hw.time, from, to)?;
        self.state.illumination = to;

        self.state.countdown.reset(self.hw.time.now_ms());
        info!("light level {} -> {}", from, to);
        Ok(Step::LevelChanged(to))
    }

    fn short_press(&mut self) -> Result<Step> {
        let now = self.hw.time.now_ms();

        if self.state.display.visible {
            let prev = self.state.display.last_shown;
            let minutes = self.state.countdown.bump(now);
            self.fader.cross_fade(
                &mut self.hw.display,
                &mut self.hw.time,
                &mut self.state.display,
                prev,
                minutes,
            )?;
            self.state.display.touch(now);
            info!("timer set to {} min", minutes);
            return Ok(Step::MinutesBumped(minutes));
        }

        // The button wait may have run past expiry; show 0 rather than wrap.
        let remaining = self.state.countdown.remaining_minutes(now);
        let value = remaining.clamp(0, i32::from(DISPLAY_MAX)) as u8;
        self.fader.fade_in(
            &mut self.hw.display,
            &mut self.hw.time,
            &mut self.state.display,
            value,
        )?;
        self.state.display.touch(now);
        info!("display shown: {} min", value);
        Ok(Step::DisplayShown(value))
    }

    /// Fade out, save settings and release the supply latch. Output and
    /// storage failures are logged; power is cut regardless.
    fn shutdown(&mut self, cause: ShutdownCause) {
        info!("shutdown: {:?}", cause);

        if let Err(e) = self.fade_all_out() {
            warn!("shutdown: fade failed ({})", e);
        }

        let minutes = self.state.countdown.initial_minutes();
        let level = self.state.light.level();
        if let Err(e) = self.settings.persist(&mut self.store, minutes, level) {
            warn!("shutdown: settings not saved ({})", e);
        }

        self.hw.power.cut_power();
        self.state.powered_off = true;
    }

    fn fade_all_out(&mut self) -> Result<()> {
        if self.state.display.visible {
            self.hide_display()?;
        }
        if self.state.illumination != 0 {
            self.fader.fade(
                &mut self.hw.illumination,
                &mut self.hw.time,
                self.state.illumination,
                0,
            )?;
            self.state.illumination = 0;
        }
        Ok(())
    }

    // ── Accessors ─────────────────────────────────────────────

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_powered_off(&self) -> bool {
        self.state.powered_off
    }
}
