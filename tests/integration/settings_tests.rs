//! Settings across power cycles.

use modellight::adapters::nvs::NvsSettingsStore;
use modellight::app::ports::{SettingsStore, Slot};
use modellight::app::settings::Settings;
use modellight::config::{LEVEL_DEFAULT, MINUTES_DEFAULT};

use super::mock_hw::{Bench, MockStore};

#[test]
fn first_boot_writes_both_defaults() {
    let mut store = MockStore::default();
    let s = Settings::load(&mut store);

    assert_eq!((s.minutes, s.level), (MINUTES_DEFAULT, LEVEL_DEFAULT));
    assert_eq!(
        store.writes(),
        [(Slot::TimerMinutes, MINUTES_DEFAULT), (Slot::LightLevel, LEVEL_DEFAULT)]
    );
}

#[test]
fn zero_is_not_a_valid_level() {
    let mut store = MockStore::with(10, 0);
    let s = Settings::load(&mut store);
    assert_eq!(s.level, LEVEL_DEFAULT);
    assert_eq!(store.get(Slot::LightLevel), Some(LEVEL_DEFAULT));
}

#[test]
fn bounds_are_accepted_as_stored() {
    for (minutes, level) in [(1, 1), (31, 5)] {
        let mut store = MockStore::with(minutes, level);
        let s = Settings::load(&mut store);
        assert_eq!((s.minutes, s.level), (minutes, level));
        assert!(store.writes().is_empty());
    }
}

#[test]
fn persisted_settings_survive_the_next_boot() {
    let mut store = MockStore::with(10, 3);
    let mut s = Settings::load(&mut store);
    s.persist(&mut store, 17, 5).unwrap();

    let next = Settings::load(&mut store);
    assert_eq!((next.minutes, next.level), (17, 5));
}

#[test]
fn session_changes_carry_into_the_next_session() {
    let store = MockStore::with(10, 3);

    let first = Bench::new(store.clone());
    let mut ctrl = first.started();
    first.level.press_in(0, 20);
    ctrl.poll().unwrap();
    first.main.press_in(0, 3_000);
    ctrl.poll().unwrap();

    let second = Bench::new(store);
    let ctrl = second.started();
    assert_eq!(ctrl.settings().level, 4);
    assert_eq!(ctrl.state().illumination, 4);
    assert_eq!(second.illumination.last(), Some(195));
}

#[test]
fn nvs_simulation_backend_round_trips_through_settings() {
    let mut nvs = NvsSettingsStore::new().unwrap();
    let mut s = Settings::load(&mut nvs);
    assert_eq!(nvs.read(Slot::TimerMinutes), Ok(MINUTES_DEFAULT));

    s.persist(&mut nvs, 25, 2).unwrap();
    assert_eq!(nvs.read(Slot::TimerMinutes), Ok(25));
    assert_eq!(nvs.read(Slot::LightLevel), Ok(2));
}
