//! Modellight firmware library.
//!
//! Illumination timer for a scale model: two buttons, one dimmable light,
//! a five-LED binary minute display, and a soft-power latch.
//!
//! Exposes the pure-logic modules for integration testing. All
//! ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod pins;

pub mod adapters;
pub mod drivers;
