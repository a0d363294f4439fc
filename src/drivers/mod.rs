//! LED and button drivers, hardware initialisation, and the supply latch.

pub mod button;
pub mod fade;
pub mod hw_init;
pub mod power_latch;
pub mod pwm;
