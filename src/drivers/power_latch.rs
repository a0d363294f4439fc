//! Soft-power latch.
//!
//! The supply stays on only while the hold output is driven high. Startup
//! asserts it; shutdown releases it and the board loses power.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};
use log::{info, warn};

use crate::app::ports::PowerControl;
use crate::drivers::hw_init;
use crate::error::Error;

/// [`PowerControl`] over any output pin.
pub struct PowerLatch<P> {
    pin: P,
    cut: bool,
}

impl<P: OutputPin> PowerLatch<P> {
    pub fn new(pin: P) -> Self {
        Self { pin, cut: false }
    }

    pub fn is_cut(&self) -> bool {
        self.cut
    }
}

impl<P: OutputPin> PowerControl for PowerLatch<P> {
    fn keep_alive(&mut self) {
        if self.pin.set_high().is_err() {
            warn!("power: {}", Error::PowerLatch);
        }
    }

    fn cut_power(&mut self) {
        if self.cut {
            return;
        }
        info!("power: releasing supply latch");
        if self.pin.set_low().is_err() {
            warn!("power: {}", Error::PowerLatch);
        }
        self.cut = true;
    }
}

// ── GPIO-backed hold pin ─────────────────────────────────────

/// Output on a GPIO configured by `hw_init`.
pub struct HoldPin {
    gpio: i32,
}

impl HoldPin {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }
}

impl ErrorType for HoldPin {
    type Error = Infallible;
}

impl OutputPin for HoldPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        hw_init::gpio_write(self.gpio, false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        hw_init::gpio_write(self.gpio, true);
        Ok(())
    }
}
