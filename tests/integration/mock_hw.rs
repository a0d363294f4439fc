//! Mock hardware for integration tests.
//!
//! Every mock shares one simulated timeline: delays advance it, and every
//! button sample costs one millisecond. Handles are cheap clones over
//! shared state, so a test keeps its own copy after handing the mock to
//! the controller and can script presses or inspect writes later.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, InputPin};
use embedded_hal::pwm::{self, SetDutyCycle};

use modellight::app::controller::{Controller, Hardware};
use modellight::app::ports::{Clock, PowerControl, SettingsStore, Slot, StorageError};
use modellight::app::settings::Settings;
use modellight::config::ControllerConfig;

/// Cost of one button sample on the timeline.
const SAMPLE_US: u64 = 1_000;

// ── SimTime ───────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct SimTime {
    now_us: Rc<Cell<u64>>,
}

#[allow(dead_code)]
impl SimTime {
    pub fn advance_ms(&self, ms: u32) {
        self.advance_us(u64::from(ms) * 1_000);
    }

    fn advance_us(&self, us: u64) {
        self.now_us.set(self.now_us.get() + us);
    }
}

impl Clock for SimTime {
    fn now_ms(&self) -> u32 {
        (self.now_us.get() / 1_000) as u32
    }
}

impl DelayNs for SimTime {
    fn delay_ns(&mut self, ns: u32) {
        self.advance_us(u64::from(ns) / 1_000);
    }
}

// ── ScriptedButton ────────────────────────────────────────────

/// Active-low button held down during scripted `[start, end)` windows.
#[derive(Clone)]
pub struct ScriptedButton {
    time: SimTime,
    held: Rc<RefCell<Vec<(u32, u32)>>>,
    samples: Rc<Cell<u32>>,
}

#[allow(dead_code)]
impl ScriptedButton {
    pub fn new(time: &SimTime) -> Self {
        Self {
            time: time.clone(),
            held: Rc::default(),
            samples: Rc::default(),
        }
    }

    /// Hold the button for `duration_ms`, starting `delay_ms` from now.
    pub fn press_in(&self, delay_ms: u32, duration_ms: u32) {
        let start = self.time.now_ms() + delay_ms;
        self.held.borrow_mut().push((start, start + duration_ms));
    }

    /// Hold the button `[start, end)` in absolute milliseconds.
    pub fn hold(&self, start: u32, end: u32) {
        self.held.borrow_mut().push((start, end));
    }

    pub fn samples(&self) -> u32 {
        self.samples.get()
    }
}

impl digital::ErrorType for ScriptedButton {
    type Error = Infallible;
}

impl InputPin for ScriptedButton {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        self.is_low().map(|low| !low)
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        let t = self.time.now_ms();
        self.time.advance_us(SAMPLE_US);
        self.samples.set(self.samples.get() + 1);
        Ok(self
            .held
            .borrow()
            .iter()
            .any(|&(start, end)| (start..end).contains(&t)))
    }
}

// ── RecordingPwm ──────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct RecordingPwm {
    writes: Rc<RefCell<Vec<u16>>>,
}

#[allow(dead_code)]
impl RecordingPwm {
    pub fn writes(&self) -> Vec<u16> {
        self.writes.borrow().clone()
    }

    pub fn last(&self) -> Option<u16> {
        self.writes.borrow().last().copied()
    }

    pub fn clear(&self) {
        self.writes.borrow_mut().clear();
    }
}

impl pwm::ErrorType for RecordingPwm {
    type Error = Infallible;
}

impl SetDutyCycle for RecordingPwm {
    fn max_duty_cycle(&self) -> u16 {
        255
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
        self.writes.borrow_mut().push(duty);
        Ok(())
    }
}

// ── MockPower ─────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockPower {
    keep_alive: Rc<Cell<u32>>,
    cuts: Rc<Cell<u32>>,
}

#[allow(dead_code)]
impl MockPower {
    pub fn keep_alive_calls(&self) -> u32 {
        self.keep_alive.get()
    }

    pub fn cut_calls(&self) -> u32 {
        self.cuts.get()
    }
}

impl PowerControl for MockPower {
    fn keep_alive(&mut self) {
        self.keep_alive.set(self.keep_alive.get() + 1);
    }

    fn cut_power(&mut self) {
        self.cuts.set(self.cuts.get() + 1);
    }
}

// ── MockStore ─────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockStore {
    slots: Rc<RefCell<HashMap<Slot, u8>>>,
    writes: Rc<RefCell<Vec<(Slot, u8)>>>,
}

#[allow(dead_code)]
impl MockStore {
    pub fn with(minutes: u8, level: u8) -> Self {
        let store = Self::default();
        store.slots.borrow_mut().insert(Slot::TimerMinutes, minutes);
        store.slots.borrow_mut().insert(Slot::LightLevel, level);
        store
    }

    pub fn get(&self, slot: Slot) -> Option<u8> {
        self.slots.borrow().get(&slot).copied()
    }

    pub fn writes(&self) -> Vec<(Slot, u8)> {
        self.writes.borrow().clone()
    }
}

impl SettingsStore for MockStore {
    fn read(&mut self, slot: Slot) -> Result<u8, StorageError> {
        self.get(slot).ok_or(StorageError::NotFound)
    }

    fn write(&mut self, slot: Slot, value: u8) -> Result<(), StorageError> {
        self.slots.borrow_mut().insert(slot, value);
        self.writes.borrow_mut().push((slot, value));
        Ok(())
    }
}

// ── Bench ─────────────────────────────────────────────────────

pub type TestController = Controller<ScriptedButton, RecordingPwm, SimTime, MockPower, MockStore>;

/// A full set of mocks plus the handles to drive and inspect them.
pub struct Bench {
    pub time: SimTime,
    pub main: ScriptedButton,
    pub level: ScriptedButton,
    pub illumination: RecordingPwm,
    pub display: [RecordingPwm; 5],
    pub power: MockPower,
    pub store: MockStore,
}

#[allow(dead_code)]
impl Bench {
    pub fn new(store: MockStore) -> Self {
        let time = SimTime::default();
        Self {
            main: ScriptedButton::new(&time),
            level: ScriptedButton::new(&time),
            time,
            illumination: RecordingPwm::default(),
            display: Default::default(),
            power: MockPower::default(),
            store,
        }
    }

    pub fn with_settings(minutes: u8, level: u8) -> Self {
        Self::new(MockStore::with(minutes, level))
    }

    /// Load settings from the bench store and build a controller.
    pub fn controller(&self) -> TestController {
        let mut store = self.store.clone();
        let settings = Settings::load(&mut store);
        let hw = Hardware {
            main_button: self.main.clone(),
            level_button: self.level.clone(),
            illumination: self.illumination.clone(),
            display: self.display.clone(),
            time: self.time.clone(),
            power: self.power.clone(),
        };
        Controller::new(hw, store, settings, ControllerConfig::default())
    }

    /// Build and start a controller.
    pub fn started(&self) -> TestController {
        let mut ctrl = self.controller();
        ctrl.start().unwrap();
        ctrl
    }

    /// Display LED bit pattern by final duty (255 = lit).
    pub fn display_pattern(&self) -> u8 {
        self.display
            .iter()
            .enumerate()
            .filter(|(_, led)| led.last() == Some(255))
            .fold(0, |acc, (bit, _)| acc | (1 << bit))
    }

    pub fn clear_display_writes(&self) {
        for led in &self.display {
            led.clear();
        }
    }
}
