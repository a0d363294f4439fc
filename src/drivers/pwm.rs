//! LEDC PWM output channel.
//!
//! Exposes one LEDC channel as an `embedded-hal` [`SetDutyCycle`] so the
//! fade engine stays hardware-agnostic.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: writes the LEDC duty register via hw_init.
//! On host/test: tracks the duty in-memory only.

use core::convert::Infallible;

use embedded_hal::pwm::{ErrorType, SetDutyCycle};

use crate::drivers::hw_init;

pub struct LedcChannel {
    channel: u32,
    duty: u16,
}

impl LedcChannel {
    pub fn new(channel: u32) -> Self {
        Self { channel, duty: 0 }
    }

    /// The illumination output.
    pub fn illumination() -> Self {
        Self::new(hw_init::LEDC_CH_ILLUMINATION)
    }

    /// The five display outputs, bit 0 first.
    pub fn display() -> [Self; 5] {
        core::array::from_fn(|bit| Self::new(hw_init::LEDC_CH_DISPLAY_BASE + bit as u32))
    }

    pub fn current_duty(&self) -> u16 {
        self.duty
    }
}

impl ErrorType for LedcChannel {
    type Error = Infallible;
}

impl SetDutyCycle for LedcChannel {
    fn max_duty_cycle(&self) -> u16 {
        hw_init::LEDC_MAX_DUTY
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        let duty = duty.min(hw_init::LEDC_MAX_DUTY);
        hw_init::ledc_set(self.channel, duty);
        self.duty = duty;
        Ok(())
    }
}
