//! Stored FM stations
//!
//! Stations are kept sorted by frequency so the station number (1-based
//! position) follows the band, and stepping through them with the encoder
//! moves up or down the dial.

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum number of stored stations
pub const MAX_STATIONS: usize = 50;

/// Result of toggling a frequency in the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StationToggle {
    /// Frequency was added
    Stored,
    /// Frequency was already stored and has been removed
    Removed,
    /// List is full, nothing changed
    Full,
}

/// Sorted list of stored frequencies (10 kHz units)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StationList {
    frequencies: Vec<u16, MAX_STATIONS>,
}

impl StationList {
    pub const fn new() -> Self {
        Self {
            frequencies: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.frequencies
    }

    /// 1-based station number of `frequency`, 0 if not stored
    pub fn number(&self, frequency: u16) -> u8 {
        self.frequencies
            .iter()
            .position(|&f| f == frequency)
            .map_or(0, |index| (index + 1) as u8)
    }

    /// Store `frequency`, or remove it if already stored
    pub fn toggle(&mut self, frequency: u16) -> StationToggle {
        match self.frequencies.binary_search(&frequency) {
            Ok(index) => {
                self.frequencies.remove(index);
                StationToggle::Removed
            }
            Err(index) => match self.frequencies.insert(index, frequency) {
                Ok(()) => StationToggle::Stored,
                Err(_) => StationToggle::Full,
            },
        }
    }

    /// Frequency reached by moving `steps` stored stations away from
    /// `frequency` (positive = up the band)
    ///
    /// Stops at the last station in that direction. Returns `None` when
    /// there is no stored station to move to.
    pub fn step_from(&self, frequency: u16, steps: i16) -> Option<u16> {
        let mut current = frequency;
        let mut moved = false;

        for _ in 0..steps.unsigned_abs() {
            let next = if steps > 0 {
                self.frequencies.iter().copied().find(|&f| f > current)
            } else {
                self.frequencies.iter().rev().copied().find(|&f| f < current)
            };
            match next {
                Some(f) => {
                    current = f;
                    moved = true;
                }
                None => break,
            }
        }

        moved.then_some(current)
    }

    /// Restore ordering after loading a list from storage
    pub fn normalize(&mut self) {
        self.frequencies.sort_unstable();
        let mut last = None;
        self.frequencies.retain(|&f| {
            let keep = last != Some(f);
            last = Some(f);
            keep
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(frequencies: &[u16]) -> StationList {
        let mut stations = StationList::new();
        for &f in frequencies {
            stations.toggle(f);
        }
        stations
    }

    #[test]
    fn test_toggle_keeps_sorted() {
        let stations = list(&[10110, 8800, 9520]);
        assert_eq!(stations.as_slice(), &[8800, 9520, 10110]);
        assert_eq!(stations.number(9520), 2);
        assert_eq!(stations.number(9000), 0);
    }

    #[test]
    fn test_toggle_removes_stored() {
        let mut stations = list(&[8800, 9520]);
        assert_eq!(stations.toggle(8800), StationToggle::Removed);
        assert_eq!(stations.as_slice(), &[9520]);
        assert_eq!(stations.number(9520), 1);
    }

    #[test]
    fn test_full_list() {
        let mut stations = StationList::new();
        for i in 0..MAX_STATIONS as u16 {
            assert_eq!(stations.toggle(8750 + i * 10), StationToggle::Stored);
        }
        assert_eq!(stations.toggle(10800), StationToggle::Full);
        assert_eq!(stations.len(), MAX_STATIONS);

        // Removing still works when full
        assert_eq!(stations.toggle(8750), StationToggle::Removed);
    }

    #[test]
    fn test_step_between_stations() {
        let stations = list(&[8800, 9520, 10110]);

        assert_eq!(stations.step_from(9000, 1), Some(9520));
        assert_eq!(stations.step_from(9000, -1), Some(8800));
        assert_eq!(stations.step_from(9520, 1), Some(10110));
        assert_eq!(stations.step_from(9520, 2), Some(10110));
        assert_eq!(stations.step_from(10110, -2), Some(8800));
    }

    #[test]
    fn test_step_past_the_ends() {
        let stations = list(&[8800, 9520]);
        assert_eq!(stations.step_from(9520, 1), None);
        assert_eq!(stations.step_from(8750, -1), None);
        assert_eq!(stations.step_from(9000, 0), None);
        assert_eq!(StationList::new().step_from(9000, 3), None);
    }

    #[test]
    fn test_normalize_sorts_and_dedups() {
        let mut stations = StationList::new();
        for f in [9520, 8800, 9520, 10110, 8800] {
            stations.frequencies.push(f).unwrap();
        }
        stations.normalize();
        assert_eq!(stations.as_slice(), &[8800, 9520, 10110]);
    }
}
