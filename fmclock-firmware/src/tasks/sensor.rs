//! Temperature sampling
//!
//! Reads the RP2040's internal temperature sensor and publishes the result
//! in 0.1°C units.

use defmt::*;
use embassy_rp::adc::{Adc, Async, Channel};
use embassy_time::{Duration, Ticker};

use crate::channels::TEMP_READING;

/// ADC reference voltage in millivolts
const ADC_VREF_MV: i32 = 3300;

/// ADC resolution (12-bit = 4096)
const ADC_MAX: i32 = 4096;

/// Convert a temperature-sensor ADC reading to 0.1°C
///
/// T = 27 - (V - 0.706 V) / 1.721 mV/°C
pub fn adc_to_temp_x10(adc_value: u16) -> i16 {
    let microvolts = i32::from(adc_value) * ADC_VREF_MV * 1000 / ADC_MAX;
    // 1.721 mV/°C is 172.1 µV per 0.1°C
    let temp_x10 = 270 - (microvolts - 706_000) * 10 / 1721;
    temp_x10.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
}

/// Sensor task - samples the temperature sensor periodically
#[embassy_executor::task]
pub async fn sensor_task(mut adc: Adc<'static, Async>, mut sensor: Channel<'static>, interval: Duration) {
    info!("Sensor task started");

    let mut ticker = Ticker::every(interval);

    loop {
        match adc.read(&mut sensor).await {
            Ok(adc_value) => {
                let temp_x10 = adc_to_temp_x10(adc_value);
                trace!("Temperature: {}.{}°C", temp_x10 / 10, (temp_x10 % 10).abs());
                TEMP_READING.signal(Some(temp_x10));
            }
            Err(e) => {
                warn!("Temperature read failed: {:?}", e);
                TEMP_READING.signal(None);
            }
        }

        ticker.next().await;
    }
}
