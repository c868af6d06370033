//! Radio state persistence
//!
//! Volume, tuner parameters and stored stations each live under their own
//! flash key. Missing or unreadable records fall back to power-on defaults.

use defmt::*;
use serde::de::DeserializeOwned;
use serde::Serialize;

use fmclock_core::config::{decode_record, encode_record, TunerParams, MAX_RECORD_SIZE};
use fmclock_core::stations::StationList;
use fmclock_hal_rp2040::flash::{FlashError, SettingsFlash, StorageKey};
use fmclock_hal_rp2040::FlashStorage;

use super::settings::ConfigError;

/// Power-on volume
pub const DEFAULT_VOLUME: i8 = 10;

/// Power-on tuner state (101.1 MHz, stereo allowed)
pub const DEFAULT_TUNER: TunerParams = TunerParams {
    frequency: 10110,
    mono: false,
};

/// Radio state read at boot
pub struct StoredRadio {
    pub volume: i8,
    pub tuner: TunerParams,
    pub stations: StationList,
}

/// Load volume, tuner parameters and stations from flash
pub async fn load_radio(storage: &mut SettingsFlash<'_>) -> StoredRadio {
    let volume = load_or(storage, StorageKey::Volume, DEFAULT_VOLUME).await;
    let tuner = load_or(storage, StorageKey::TunerParams, DEFAULT_TUNER).await;
    let mut stations = load_or(storage, StorageKey::Stations, StationList::new()).await;
    stations.normalize();

    info!(
        "Radio state: volume={}, frequency={}, mono={}, {} stations",
        volume,
        tuner.frequency,
        tuner.mono,
        stations.len()
    );

    StoredRadio {
        volume,
        tuner,
        stations,
    }
}

async fn load_or<T: DeserializeOwned>(
    storage: &mut SettingsFlash<'_>,
    key: StorageKey,
    default: T,
) -> T {
    match load_record(storage, key).await {
        Ok(value) => value,
        Err(ConfigError::Flash(FlashError::NotFound)) => {
            debug!("No {:?} record in flash, using default", key);
            default
        }
        Err(e) => {
            warn!("Failed to load {:?} record: {:?}, using default", key, e);
            default
        }
    }
}

async fn load_record<T: DeserializeOwned>(
    storage: &mut SettingsFlash<'_>,
    key: StorageKey,
) -> Result<T, ConfigError> {
    let mut buffer = [0u8; MAX_RECORD_SIZE];
    let len = storage.read(key, &mut buffer).await?;
    Ok(decode_record(&buffer[..len])?)
}

/// Write one record to flash
pub async fn save_record<T: Serialize>(
    storage: &mut SettingsFlash<'_>,
    key: StorageKey,
    value: &T,
) -> Result<(), ConfigError> {
    let mut buffer = [0u8; MAX_RECORD_SIZE];
    let bytes = encode_record(value, &mut buffer)?;

    debug!("Saving {} bytes under {:?}", bytes.len(), key);
    storage.write(key, bytes).await?;

    Ok(())
}
