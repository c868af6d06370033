//! fmclock - Clock / FM Radio Firmware
//!
//! Main firmware binary for RP2040-based clock radios: a multiplexed
//! 4-digit 7-segment display, a rotary encoder and four buttons.
//!
//! The display tick runs on a high-priority interrupt executor so the
//! multiplex timing is unaffected by flash writes and foreground work.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::adc::{Adc, Channel, InterruptHandler as AdcInterruptHandler};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Pin};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::Peri;
use {defmt_rtt as _, panic_probe as _};

use fmclock_core::engine::SharedEngine;
use fmclock_hal_rp2040::flash::SettingsFlash;
use fmclock_hal_rp2040::gpio::{DisplayLines, InputLines, RpInput, RpOutput};

use crate::appliance::ClockRadio;

mod appliance;
mod boards;
mod channels;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    ADC_IRQ_FIFO => AdcInterruptHandler;
});

/// Display and input engine shared by the tick and the foreground
static ENGINE: SharedEngine = SharedEngine::new(boards::ENGINE_CONFIG);

/// Executor for the display tick, preempts everything in thread mode
static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_HIGH.on_interrupt()
}

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("fmclock firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Load engine settings from flash (or use defaults)
    let mut storage = SettingsFlash::new(p.FLASH, p.DMA_CH0);
    let settings = config::load_settings(&mut storage).await;
    ENGINE.init(&settings);

    // Volume, tuner and stations as they were at power-off
    let radio = ClockRadio::new(config::load_radio(&mut storage).await);

    // Display lines (see boards.rs for the pin map)
    let display = DisplayLines::new(
        [
            output(p.PIN_2),
            output(p.PIN_3),
            output(p.PIN_4),
            output(p.PIN_5),
            output(p.PIN_6),
            output(p.PIN_7),
            output(p.PIN_8),
            output(p.PIN_9),
        ],
        [
            output(p.PIN_10),
            output(p.PIN_11),
            output(p.PIN_12),
            output(p.PIN_13),
        ],
    );

    // Buttons and encoder contacts
    let inputs = InputLines::new(
        [
            input(p.PIN_14),
            input(p.PIN_15),
            input(p.PIN_16),
            input(p.PIN_17),
        ],
        input(p.PIN_18),
        input(p.PIN_19),
    );

    info!("Display and input lines initialized");

    // Internal temperature sensor
    let adc = Adc::new(p.ADC, Irqs, embassy_rp::adc::Config::default());
    let temp_sensor = Channel::new_temp_sensor(p.ADC_TEMP_SENSOR);

    // Display tick on the high-priority executor
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let high_spawner = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);
    high_spawner
        .spawn(tasks::tick_task(&ENGINE, display, inputs, boards::TICK_PERIOD))
        .unwrap();

    spawner
        .spawn(tasks::ui_task(&ENGINE, radio, storage, settings, boards::UI_REFRESH))
        .unwrap();
    spawner
        .spawn(tasks::sensor_task(adc, temp_sensor, boards::SENSOR_INTERVAL))
        .unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat, display {}", ENGINE.display_snapshot().to_text().as_str());
    }
}

fn output(pin: Peri<'static, impl Pin>) -> RpOutput<'static> {
    RpOutput::new(pin.into(), Level::Low)
}

fn input(pin: Peri<'static, impl Pin>) -> RpInput<'static> {
    RpInput::pull_up(pin.into())
}
