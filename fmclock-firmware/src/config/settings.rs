//! Engine settings persistence
//!
//! Loads and saves [`EngineSettings`] to flash storage. Missing or invalid
//! records fall back to defaults so the clock always comes up.

use defmt::*;

use fmclock_core::config::{EngineSettings, SettingsError, MAX_SETTINGS_SIZE};
use fmclock_hal_rp2040::flash::{FlashError, SettingsFlash, StorageKey};
use fmclock_hal_rp2040::FlashStorage;

/// Settings persistence errors
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Flash operation failed
    Flash(FlashError),
    /// Encoding or decoding failed
    Settings(SettingsError),
}

impl From<FlashError> for ConfigError {
    fn from(e: FlashError) -> Self {
        ConfigError::Flash(e)
    }
}

impl From<SettingsError> for ConfigError {
    fn from(e: SettingsError) -> Self {
        ConfigError::Settings(e)
    }
}

/// Load engine settings from flash
///
/// Returns the stored settings, or defaults if none are stored or the
/// record is invalid.
pub async fn load_settings(storage: &mut SettingsFlash<'_>) -> EngineSettings {
    match load_settings_inner(storage).await {
        Ok(settings) => {
            info!("Loaded engine settings from flash");
            log_settings(&settings);
            settings
        }
        Err(ConfigError::Flash(FlashError::NotFound)) => {
            debug!("No engine settings in flash, using defaults");
            EngineSettings::default()
        }
        Err(e) => {
            warn!("Failed to load engine settings: {:?}, using defaults", e);
            EngineSettings::default()
        }
    }
}

async fn load_settings_inner(storage: &mut SettingsFlash<'_>) -> Result<EngineSettings, ConfigError> {
    let mut buffer = [0u8; MAX_SETTINGS_SIZE];
    let len = storage.read(StorageKey::EngineSettings, &mut buffer).await?;

    debug!("Read {} bytes of settings from flash", len);

    Ok(EngineSettings::decode(&buffer[..len])?)
}

/// Save engine settings to flash
pub async fn save_settings(
    storage: &mut SettingsFlash<'_>,
    settings: &EngineSettings,
) -> Result<(), ConfigError> {
    let mut buffer = [0u8; MAX_SETTINGS_SIZE];
    let bytes = settings.encode(&mut buffer)?;

    debug!("Saving {} bytes of settings to flash", bytes.len());

    storage.write(StorageKey::EngineSettings, bytes).await?;

    info!("Saved engine settings to flash");
    log_settings(settings);

    Ok(())
}

fn log_settings(settings: &EngineSettings) {
    debug!(
        "  encoder resolution={}, zero hour={}, brightness={}",
        settings.encoder_resolution, settings.zero_hour, settings.brightness
    );
}
