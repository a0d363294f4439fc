//! Modellight Firmware: Main Entry Point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                    │
//! │                                                              │
//! │  ButtonPin ×2   LedcChannel ×6   PowerLatch   Esp32Time      │
//! │  (InputPin)     (SetDutyCycle)   (Power)      (Clock+Delay)  │
//! │  NvsSettingsStore (SettingsStore)                            │
//! │                                                              │
//! │  ─────────────── Port Trait Boundary ─────────────────       │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────┐      │
//! │  │           Controller (pure logic)                  │      │
//! │  │  Gestures · Countdown · Level · Fades              │      │
//! │  └────────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{error, info, warn};

use modellight::adapters::nvs::NvsSettingsStore;
use modellight::adapters::time::Esp32TimeAdapter;
use modellight::app::controller::{Controller, Hardware, Step};
use modellight::app::settings::Settings;
use modellight::config::ControllerConfig;
use modellight::drivers::button::ButtonPin;
use modellight::drivers::hw_init;
use modellight::drivers::power_latch::{HoldPin, PowerLatch};
use modellight::drivers::pwm::LedcChannel;
use modellight::error::Error;
use modellight::pins;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Modellight v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Initialise hardware peripherals ────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Without the supply latch asserted the board powers down as soon
        // as the user lets go of the button.
        error!("HAL init failed: {}, halting", e);
        return Err(Error::from(e).into());
    }

    // ── 3. Load settings from NVS ─────────────────────────────
    let mut store = NvsSettingsStore::new().map_err(Error::from)?;
    let settings = Settings::load(&mut store);

    // ── 4. Construct the controller ───────────────────────────
    let hw = Hardware {
        main_button: ButtonPin::new(pins::MAIN_BUTTON_GPIO),
        level_button: ButtonPin::new(pins::LEVEL_BUTTON_GPIO),
        illumination: LedcChannel::illumination(),
        display: LedcChannel::display(),
        time: Esp32TimeAdapter::new(),
        power: PowerLatch::new(HoldPin::new(pins::POWER_HOLD_GPIO)),
    };
    let mut controller = Controller::new(hw, store, settings, ControllerConfig::default());

    if let Err(e) = controller.start() {
        warn!("startup fade failed: {}", e);
    }

    // ── 5. Control loop ───────────────────────────────────────
    loop {
        match controller.poll() {
            Ok(Step::PoweredOff) => {
                // Latch released; wait for the supply to collapse.
                esp_idf_hal::delay::FreeRtos::delay_ms(100);
            }
            Ok(_) => {}
            Err(e) => warn!("control loop: {}", e),
        }
    }
}
