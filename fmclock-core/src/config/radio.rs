//! Persisted radio records
//!
//! Volume, tuner parameters and the station list are stored as separate
//! postcard records so each can be rewritten on its own.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "serde")]
use super::SettingsError;

/// Upper bound on any serialized radio record (a full station list)
pub const MAX_RECORD_SIZE: usize = 160;

/// Tuner state restored at power-on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TunerParams {
    /// Tuned frequency in 10 kHz units
    pub frequency: u16,
    /// Forced mono reception
    pub mono: bool,
}

/// Serialize a record into `buffer`, returning the used part
#[cfg(feature = "serde")]
pub fn encode_record<'a, T: Serialize>(
    value: &T,
    buffer: &'a mut [u8],
) -> Result<&'a mut [u8], SettingsError> {
    postcard::to_slice(value, buffer).map_err(|_| SettingsError::Serialize)
}

/// Deserialize a record
#[cfg(feature = "serde")]
pub fn decode_record<'a, T: Deserialize<'a>>(bytes: &'a [u8]) -> Result<T, SettingsError> {
    postcard::from_bytes(bytes).map_err(|_| SettingsError::Deserialize)
}
