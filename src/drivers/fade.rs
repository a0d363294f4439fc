//! LED fade engine.
//!
//! Blocking, linear duty ramps for the two kinds of LED output:
//!
//! - **Illumination**: one channel, faded between the six entries of
//!   [`LEVEL_DUTY`] one raw duty unit at a time.
//! - **Binary display**: five channels showing a 5-bit value, bit 0 on the
//!   first LED. Fades in, fades out, or cross-fades to a new value.
//!
//! Ramps are linear in raw duty, not gamma corrected. Each duty step is
//! followed by a fixed busy-wait, so a full 0→255 ramp always takes
//! 256 steps regardless of how many LEDs are moving.
//!
//! Out-of-domain arguments (level above 5, display value above 31) are
//! ignored.

use embedded_hal::delay::DelayNs;
use embedded_hal::pwm::SetDutyCycle;

use crate::app::state::DisplayState;
use crate::config::{ControllerConfig, DISPLAY_MAX};
use crate::error::{Error, Result};

/// Illumination duty for each level index.
pub const LEVEL_DUTY: [u8; 6] = [0, 15, 75, 135, 195, 255];

/// Number of binary display LEDs.
pub const DISPLAY_BITS: usize = 5;

pub struct FadeEngine {
    illumination_step_us: u32,
    display_step_us: u32,
}

impl FadeEngine {
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            illumination_step_us: config.illumination_step_us,
            display_step_us: config.display_step_us,
        }
    }

    // ── Illumination ─────────────────────────────────────────

    /// Ramp the illumination from `from_level` to `to_level`, writing every
    /// intermediate duty value.
    pub fn fade<P, D>(&self, channel: &mut P, delay: &mut D, from_level: u8, to_level: u8) -> Result<()>
    where
        P: SetDutyCycle,
        D: DelayNs,
    {
        let (Some(&from), Some(&to)) = (
            LEVEL_DUTY.get(usize::from(from_level)),
            LEVEL_DUTY.get(usize::from(to_level)),
        ) else {
            return Ok(());
        };

        if from <= to {
            for duty in from..=to {
                write_duty(channel, duty)?;
                delay.delay_us(self.illumination_step_us);
            }
        } else {
            for duty in (to..=from).rev() {
                write_duty(channel, duty)?;
                delay.delay_us(self.illumination_step_us);
            }
        }
        Ok(())
    }

    // ── Binary display ───────────────────────────────────────

    /// Clear the display, then brighten the LEDs of `value` together.
    pub fn fade_in<P, D>(
        &self,
        leds: &mut [P; DISPLAY_BITS],
        delay: &mut D,
        display: &mut DisplayState,
        value: u8,
    ) -> Result<()>
    where
        P: SetDutyCycle,
        D: DelayNs,
    {
        if value > DISPLAY_MAX {
            return Ok(());
        }

        for led in leds.iter_mut() {
            write_duty(led, 0)?;
        }
        for duty in 0..=u8::MAX {
            for (_, led) in lit(leds, value) {
                write_duty(led, duty)?;
            }
            delay.delay_us(self.display_step_us);
        }

        display.last_shown = value;
        Ok(())
    }

    /// Dim the LEDs of `value` together, then force every LED off.
    pub fn fade_out<P, D>(
        &self,
        leds: &mut [P; DISPLAY_BITS],
        delay: &mut D,
        display: &mut DisplayState,
        value: u8,
    ) -> Result<()>
    where
        P: SetDutyCycle,
        D: DelayNs,
    {
        if value > DISPLAY_MAX {
            return Ok(());
        }

        for duty in (0..=u8::MAX).rev() {
            for (_, led) in lit(leds, value) {
                write_duty(led, duty)?;
            }
            delay.delay_us(self.display_step_us);
        }
        for led in leds.iter_mut() {
            write_duty(led, 0)?;
        }

        display.last_shown = value;
        Ok(())
    }

    /// Move from `prev` to `next`, touching only the LEDs whose bit differs.
    /// Rising and falling LEDs share one step counter.
    pub fn cross_fade<P, D>(
        &self,
        leds: &mut [P; DISPLAY_BITS],
        delay: &mut D,
        display: &mut DisplayState,
        prev: u8,
        next: u8,
    ) -> Result<()>
    where
        P: SetDutyCycle,
        D: DelayNs,
    {
        if prev > DISPLAY_MAX || next > DISPLAY_MAX {
            return Ok(());
        }

        let changed = prev ^ next;
        for step in 0..=u8::MAX {
            for (bit, led) in lit(leds, changed) {
                let duty = if next & (1 << bit) != 0 { step } else { u8::MAX - step };
                write_duty(led, duty)?;
            }
            delay.delay_us(self.display_step_us);
        }

        display.last_shown = next;
        Ok(())
    }
}

/// LEDs whose bit is set in `mask`, with their bit index.
fn lit<P>(leds: &mut [P; DISPLAY_BITS], mask: u8) -> impl Iterator<Item = (usize, &mut P)> {
    leds.iter_mut()
        .enumerate()
        .filter(move |(bit, _)| mask & (1 << *bit) != 0)
}

fn write_duty<P: SetDutyCycle>(channel: &mut P, duty: u8) -> Result<()> {
    channel
        .set_duty_cycle_fraction(u16::from(duty), u16::from(u8::MAX))
        .map_err(|_| Error::PwmWrite)
}
