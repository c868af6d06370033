//! Record storage in RP2040 flash
//!
//! Records go into a `sequential-storage` map in the last 64 KiB of the
//! Pico's 2 MiB flash. The linker script keeps program code out of that
//! range.

use core::ops::Range;

use embassy_rp::dma::Channel;
use embassy_rp::flash::{Async, Flash};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use sequential_storage::cache::NoCache;
use sequential_storage::map;

pub use fmclock_hal::flash::{FlashError, StorageKey};

const FLASH_SIZE: usize = 2 * 1024 * 1024;
const PARTITION_SIZE: usize = 64 * 1024;

/// Flash range holding the record map
pub const SETTINGS_RANGE: Range<u32> = ((FLASH_SIZE - PARTITION_SIZE) as u32)..(FLASH_SIZE as u32);

/// Scratch space per operation; the largest record is a full station list
const MAX_ITEM_SIZE: usize = 256;

/// Settings partition of the on-board flash
pub struct SettingsFlash<'d> {
    flash: Flash<'d, FLASH, Async, FLASH_SIZE>,
}

impl<'d> SettingsFlash<'d> {
    pub fn new(flash: Peri<'d, FLASH>, dma: Peri<'d, impl Channel>) -> Self {
        Self {
            flash: Flash::new(flash, dma),
        }
    }
}

impl<'d> fmclock_hal::FlashStorage for SettingsFlash<'d> {
    async fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, FlashError> {
        let mut scratch = [0u8; MAX_ITEM_SIZE];

        let data = map::fetch_item::<StorageKey, &[u8], _>(
            &mut self.flash,
            SETTINGS_RANGE,
            &mut NoCache::new(),
            &mut scratch,
            &key,
        )
        .await
        .map_err(|_| FlashError::Storage)?
        .ok_or(FlashError::NotFound)?;

        let target = buffer
            .get_mut(..data.len())
            .ok_or(FlashError::BufferTooSmall)?;
        target.copy_from_slice(data);
        Ok(data.len())
    }

    async fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), FlashError> {
        let mut scratch = [0u8; MAX_ITEM_SIZE];

        map::store_item(
            &mut self.flash,
            SETTINGS_RANGE,
            &mut NoCache::new(),
            &mut scratch,
            &key,
            &data,
        )
        .await
        .map_err(|e| match e {
            sequential_storage::Error::FullStorage => FlashError::Full,
            _ => FlashError::Storage,
        })
    }
}
