//! NVS (Non-Volatile Storage) adapter.
//!
//! Implements [`SettingsStore`] with one `u8` NVS entry per slot in the
//! `modellight` namespace. The host build keeps the bytes in memory.
//!
//! Range validation happens in [`Settings`](crate::app::settings::Settings);
//! this adapter stores whatever byte it is given.

use log::info;

use crate::app::ports::{SettingsStore, Slot, StorageError};

#[cfg(not(target_os = "espidf"))]
use std::collections::HashMap;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::warn;

#[cfg(target_os = "espidf")]
const NAMESPACE: &[u8] = b"modellight\0";

pub struct NvsSettingsStore {
    #[cfg(not(target_os = "espidf"))]
    store: HashMap<Slot, u8>,
}

impl NvsSettingsStore {
    /// Create the store and initialise NVS flash.
    ///
    /// On a full or version-mismatched partition the flash is erased and
    /// re-initialised; the settings then load as defaults.
    pub fn new() -> Result<Self, StorageError> {
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: nvs_flash_init / nvs_flash_erase are called from the
            // single main-task context before any NVS access.
            let ret = unsafe { nvs_flash_init() };
            if ret == ESP_ERR_NVS_NO_FREE_PAGES as i32 || ret == ESP_ERR_NVS_NEW_VERSION_FOUND as i32 {
                warn!("NVS: erasing and re-initialising flash partition");
                if unsafe { nvs_flash_erase() } != ESP_OK as i32 {
                    return Err(StorageError::IoError);
                }
                if unsafe { nvs_flash_init() } != ESP_OK as i32 {
                    return Err(StorageError::IoError);
                }
            } else if ret != ESP_OK as i32 {
                return Err(StorageError::IoError);
            }
            info!("NvsSettingsStore: ESP-IDF NVS initialised");
        }

        #[cfg(not(target_os = "espidf"))]
        info!("NvsSettingsStore: simulation backend");

        Ok(Self {
            #[cfg(not(target_os = "espidf"))]
            store: HashMap::new(),
        })
    }

    #[cfg(target_os = "espidf")]
    fn key_cstr(slot: Slot) -> &'static [u8] {
        match slot {
            Slot::TimerMinutes => b"minutes\0",
            Slot::LightLevel => b"level\0",
        }
    }

    /// Open the namespace, execute a closure with the handle, then close.
    #[cfg(target_os = "espidf")]
    fn with_nvs_handle<F, T>(write: bool, f: F) -> Result<T, i32>
    where
        F: FnOnce(nvs_handle_t) -> Result<T, i32>,
    {
        let mut handle: nvs_handle_t = 0;
        let mode = if write {
            nvs_open_mode_t_NVS_READWRITE
        } else {
            nvs_open_mode_t_NVS_READONLY
        };

        let ret = unsafe { nvs_open(NAMESPACE.as_ptr() as *const _, mode, &mut handle) };
        if ret != ESP_OK as i32 {
            return Err(ret);
        }

        let result = f(handle);
        unsafe {
            nvs_close(handle);
        }
        result
    }
}

impl SettingsStore for NvsSettingsStore {
    fn read(&mut self, slot: Slot) -> Result<u8, StorageError> {
        #[cfg(not(target_os = "espidf"))]
        {
            self.store.get(&slot).copied().ok_or(StorageError::NotFound)
        }

        #[cfg(target_os = "espidf")]
        {
            let key = Self::key_cstr(slot);
            let result = Self::with_nvs_handle(false, |handle| {
                let mut value: u8 = 0;
                let ret = unsafe { nvs_get_u8(handle, key.as_ptr() as *const _, &mut value) };
                if ret != ESP_OK as i32 {
                    return Err(ret);
                }
                Ok(value)
            });
            match result {
                Ok(value) => Ok(value),
                // A namespace that was never opened for writing reads as absent too.
                Err(e) if e == ESP_ERR_NVS_NOT_FOUND as i32 => Err(StorageError::NotFound),
                Err(e) => {
                    warn!("NvsSettingsStore: read {:?} failed ({})", slot, e);
                    Err(StorageError::IoError)
                }
            }
        }
    }

    fn write(&mut self, slot: Slot, value: u8) -> Result<(), StorageError> {
        #[cfg(not(target_os = "espidf"))]
        {
            self.store.insert(slot, value);
            info!("NvsSettingsStore: {} = {} (simulation)", slot.key(), value);
            Ok(())
        }

        #[cfg(target_os = "espidf")]
        {
            let key = Self::key_cstr(slot);
            let result = Self::with_nvs_handle(true, |handle| {
                let ret = unsafe { nvs_set_u8(handle, key.as_ptr() as *const _, value) };
                if ret != ESP_OK as i32 {
                    return Err(ret);
                }
                let ret = unsafe { nvs_commit(handle) };
                if ret != ESP_OK as i32 {
                    return Err(ret);
                }
                Ok(())
            });
            match result {
                Ok(()) => {
                    info!("NvsSettingsStore: {} = {}", slot.key(), value);
                    Ok(())
                }
                Err(e) => {
                    warn!("NvsSettingsStore: write {:?} failed ({})", slot, e);
                    Err(StorageError::IoError)
                }
            }
        }
    }
}
