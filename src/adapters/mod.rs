//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter | Implements          | Connects to            |
//! |---------|---------------------|------------------------|
//! | `nvs`   | SettingsStore       | NVS / in-memory store  |
//! | `time`  | Clock, DelayNs      | ESP32 system timer     |
//!
//! The GPIO and LEDC drivers implementing the `embedded-hal` traits live in
//! [`crate::drivers`].

pub mod nvs;
pub mod time;
