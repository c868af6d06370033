//! Persistent record storage
//!
//! The clock keeps a handful of small records across power cycles: engine
//! settings, the volume, the tuner state and the stored stations. Each
//! record lives under its own [`StorageKey`] so rewriting one leaves the
//! others alone. Chip HALs back this with a wear-levelled map in flash.

/// Record identifiers
///
/// The byte values are written to flash and must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageKey {
    /// Display/input engine settings
    EngineSettings = 0,
    /// Audio volume level
    Volume = 1,
    /// Tuned frequency and mono flag
    TunerParams = 2,
    /// Sorted list of stored stations
    Stations = 3,
}

impl StorageKey {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(StorageKey::EngineSettings),
            1 => Some(StorageKey::Volume),
            2 => Some(StorageKey::TunerParams),
            3 => Some(StorageKey::Stations),
            _ => None,
        }
    }
}

/// Errors from record storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashError {
    /// Underlying storage operation failed
    Storage,
    /// No record under this key
    NotFound,
    /// Record does not fit the caller's buffer
    BufferTooSmall,
    /// No space left, even after garbage collection
    Full,
}

/// Key-value record storage
pub trait FlashStorage {
    /// Read the record under `key` into `buffer`, returning its length
    fn read(
        &mut self,
        key: StorageKey,
        buffer: &mut [u8],
    ) -> impl core::future::Future<Output = Result<usize, FlashError>>;

    /// Replace the record under `key`
    fn write(
        &mut self,
        key: StorageKey,
        data: &[u8],
    ) -> impl core::future::Future<Output = Result<(), FlashError>>;
}

#[cfg(feature = "sequential-storage")]
impl sequential_storage::map::Key for StorageKey {
    fn serialize_into(
        &self,
        buffer: &mut [u8],
    ) -> Result<usize, sequential_storage::map::SerializationError> {
        match buffer.first_mut() {
            Some(byte) => {
                *byte = self.as_u8();
                Ok(1)
            }
            None => Err(sequential_storage::map::SerializationError::BufferTooSmall),
        }
    }

    fn deserialize_from(
        buffer: &[u8],
    ) -> Result<(Self, usize), sequential_storage::map::SerializationError> {
        let byte = buffer
            .first()
            .ok_or(sequential_storage::map::SerializationError::BufferTooSmall)?;
        StorageKey::from_u8(*byte)
            .map(|key| (key, 1))
            .ok_or(sequential_storage::map::SerializationError::InvalidFormat)
    }
}
