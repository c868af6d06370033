//! Display multiplex tick
//!
//! Runs the two halves of the engine tick: at the start of every period the
//! next digit is lit and the inputs are sampled, and after the brightness
//! compare interval every display line is switched off again.

use defmt::*;
use embassy_time::{Duration, Ticker, Timer};

use fmclock_core::engine::SharedEngine;
use fmclock_hal_rp2040::gpio::{DisplayLines, InputLines};

/// Tick task - drives the display and samples the inputs
#[embassy_executor::task]
pub async fn tick_task(
    engine: &'static SharedEngine,
    mut display: DisplayLines<'static>,
    inputs: InputLines<'static>,
    period: Duration,
) {
    info!("Tick task started, period {} us", period.as_micros());

    display.write(engine.blank_levels());
    let mut ticker = Ticker::every(period);

    loop {
        ticker.next().await;

        display.write(engine.on_overflow(inputs.sample()));

        let compare = engine.brightness_compare();
        Timer::after_micros(u64::from(compare)).await;

        display.write(engine.on_compare());
    }
}
