//! Polled button driver with short / long press classification.
//!
//! ## Hardware
//!
//! Active-low momentary switches with pull-ups. No interrupts: the control
//! loop samples the pins, and a press turns into a blocking wait that
//! lasts until the button has been released for a full debounce window.
//!
//! ## Gesture detection
//!
//! | Gesture     | Condition                                  | Result            |
//! |-------------|--------------------------------------------|-------------------|
//! | None        | Button not asserted when polled            | `Gesture::None`   |
//! | Short press | Released (debounced) after <= 2 s          | `Gesture::Short`  |
//! | Long press  | Released (debounced) after > 2 s           | `Gesture::Long`   |
//!
//! Any bounce during release re-arms the debounce window. A hold that never
//! releases never returns.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin};

use crate::app::ports::{Clock, elapsed_ms};
use crate::config::ControllerConfig;
use crate::drivers::hw_init;
use crate::error::{Error, Result};

/// Classified outcome of one poll of the main button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    None,
    Short,
    Long,
}

pub struct GestureDetector {
    debounce_ms: u32,
    long_press_ms: u32,
}

impl GestureDetector {
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            debounce_ms: config.debounce_ms,
            long_press_ms: config.long_press_ms,
        }
    }

    /// Classify one interaction with the main button.
    ///
    /// Returns `Gesture::None` at once when the button is up. Otherwise
    /// blocks until a debounced release. `on_long_hold` runs once, inside
    /// the wait, as soon as the hold passes the long-press threshold; it
    /// receives the clock so it can drive timed fades.
    pub fn poll<B, T, F>(&self, button: &mut B, time: &mut T, mut on_long_hold: F) -> Result<Gesture>
    where
        B: InputPin,
        T: Clock,
        F: FnMut(&mut T) -> Result<()>,
    {
        if !is_pressed(button)? {
            return Ok(Gesture::None);
        }

        let pressed_at = time.now_ms();
        let mut released_at: Option<u32> = None;
        let mut hold_signalled = false;

        let ended_at = loop {
            let now = time.now_ms();

            if !hold_signalled && elapsed_ms(now, pressed_at) > self.long_press_ms {
                hold_signalled = true;
                on_long_hold(time)?;
            }

            if is_pressed(button)? {
                released_at = None;
                continue;
            }

            match released_at {
                None => released_at = Some(now),
                Some(since) if elapsed_ms(now, since) >= self.debounce_ms => break now,
                Some(_) => {}
            }
        };

        let held_ms = elapsed_ms(ended_at, pressed_at);
        let gesture = if held_ms > self.long_press_ms {
            Gesture::Long
        } else {
            Gesture::Short
        };
        log::debug!("button: {:?} after {} ms", gesture, held_ms);
        Ok(gesture)
    }

    /// Check the level button: `true` once it has stayed asserted for a full
    /// debounce window, `false` if it is up or drops out early.
    ///
    /// Does not wait for release, so a held button fires on every poll.
    pub fn poll_secondary<B, T>(&self, button: &mut B, time: &T) -> Result<bool>
    where
        B: InputPin,
        T: Clock,
    {
        if !is_pressed(button)? {
            return Ok(false);
        }

        let since = time.now_ms();
        loop {
            if !is_pressed(button)? {
                return Ok(false);
            }
            if elapsed_ms(time.now_ms(), since) >= self.debounce_ms {
                return Ok(true);
            }
        }
    }
}

fn is_pressed<B: InputPin>(button: &mut B) -> Result<bool> {
    button.is_low().map_err(|_| Error::ButtonRead)
}

// ── GPIO-backed button pin ───────────────────────────────────

/// Button input on a GPIO configured by `hw_init`.
pub struct ButtonPin {
    gpio: i32,
}

impl ButtonPin {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }
}

impl ErrorType for ButtonPin {
    type Error = Infallible;
}

impl InputPin for ButtonPin {
    fn is_high(&mut self) -> core::result::Result<bool, Self::Error> {
        Ok(hw_init::gpio_read(self.gpio))
    }

    fn is_low(&mut self) -> core::result::Result<bool, Self::Error> {
        Ok(!hw_init::gpio_read(self.gpio))
    }
}
