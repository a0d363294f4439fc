//! Application core: the control loop and the state it owns.
//!
//! All interaction with hardware happens through the `embedded-hal` traits
//! and the **port traits** defined in [`ports`], keeping this layer fully
//! testable without real peripherals.

pub mod controller;
pub mod ports;
pub mod settings;
pub mod state;
