//! Persisted engine settings
//!
//! Read once at boot and handed to the engine's `init`. Stored in flash as
//! postcard-serialized binary data with a leading format version.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::display::TimeFormat;
use crate::engine::mux::{Brightness, BRIGHTNESS_MAX};
use crate::input::EncoderResolution;

/// Current settings format version
pub const SETTINGS_FORMAT_VERSION: u8 = 1;

/// Upper bound on the serialized settings size
pub const MAX_SETTINGS_SIZE: usize = 16;

/// Settings persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsError {
    /// Serialization failed (buffer too small)
    Serialize,
    /// Deserialization failed
    Deserialize,
    /// Stored data was written by a different format version
    VersionMismatch(u8),
}

/// Settings consumed by the display and input engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineSettings {
    /// Format version, always [`SETTINGS_FORMAT_VERSION`] when valid
    pub version: u8,
    /// Decoder ticks per encoder step; 0 = encoder lines are buttons,
    /// negative = inverted direction
    pub encoder_resolution: i8,
    /// Show the zero hour as "00" with leading zeros
    pub zero_hour: bool,
    /// Display brightness (0..=12)
    pub brightness: u8,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_FORMAT_VERSION,
            encoder_resolution: EncoderResolution::default().0,
            zero_hour: false,
            brightness: BRIGHTNESS_MAX,
        }
    }
}

impl EngineSettings {
    pub fn resolution(&self) -> EncoderResolution {
        EncoderResolution(self.encoder_resolution)
    }

    pub fn time_format(&self) -> TimeFormat {
        TimeFormat::from_zero_hour(self.zero_hour)
    }

    /// Brightness, clamped to the valid range
    pub fn brightness(&self) -> Brightness {
        Brightness::new(self.brightness)
    }

    /// Serialize into `buffer`, returning the used part
    #[cfg(feature = "serde")]
    pub fn encode<'a>(&self, buffer: &'a mut [u8]) -> Result<&'a mut [u8], SettingsError> {
        super::encode_record(self, buffer)
    }

    /// Deserialize and check the format version
    #[cfg(feature = "serde")]
    pub fn decode(bytes: &[u8]) -> Result<Self, SettingsError> {
        let settings: Self = super::decode_record(bytes)?;

        if settings.version != SETTINGS_FORMAT_VERSION {
            return Err(SettingsError::VersionMismatch(settings.version));
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = EngineSettings::default();
        assert_eq!(settings.resolution(), EncoderResolution(4));
        assert_eq!(settings.time_format(), TimeFormat::Suppressed);
        assert_eq!(settings.brightness(), Brightness::MAX);
    }

    #[test]
    fn test_brightness_clamped() {
        let settings = EngineSettings {
            brightness: 99,
            ..EngineSettings::default()
        };
        assert_eq!(settings.brightness().level(), BRIGHTNESS_MAX);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_stored_settings_are_read_back() {
        let settings = EngineSettings {
            encoder_resolution: -2,
            zero_hour: true,
            brightness: 7,
            ..EngineSettings::default()
        };

        let mut buffer = [0u8; MAX_SETTINGS_SIZE];
        let bytes = settings.encode(&mut buffer).unwrap();
        assert_eq!(bytes[0], SETTINGS_FORMAT_VERSION);

        assert_eq!(EngineSettings::decode(bytes), Ok(settings));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_version_mismatch() {
        let mut buffer = [0u8; MAX_SETTINGS_SIZE];
        let len = EngineSettings::default().encode(&mut buffer).unwrap().len();
        buffer[0] = 9;

        assert_eq!(
            EngineSettings::decode(&buffer[..len]),
            Err(SettingsError::VersionMismatch(9))
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_truncated_data() {
        assert_eq!(EngineSettings::decode(&[1, 4]), Err(SettingsError::Deserialize));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_buffer_too_small() {
        let mut buffer = [0u8; 2];
        assert_eq!(
            EngineSettings::default().encode(&mut buffer).err(),
            Some(SettingsError::Serialize)
        );
    }
}
