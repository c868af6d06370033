//! Foreground display and controls
//!
//! Polls the engine for button commands and encoder steps, applies them to
//! the appliance and keeps the display rendered for the current mode.
//!
//! Engine settings and the station list are written as soon as they
//! change. Volume and tuner changes arrive one encoder step at a time, so
//! they are written once the display drops back to the clock.

use defmt::*;
use embassy_time::{Duration, Ticker};

use fmclock_core::config::EngineSettings;
use fmclock_core::engine::SharedEngine;
use fmclock_core::stations::StationToggle;
use fmclock_core::traits::VolumeLevel;
use fmclock_core::ui::{ModeController, UiAction, UnsavedRecords};
use fmclock_hal_rp2040::flash::SettingsFlash;
use fmclock_hal_rp2040::StorageKey;

use crate::appliance::ClockRadio;
use crate::channels::TEMP_READING;
use crate::config::{save_record, save_settings};

/// UI task - input handling and display refresh
#[embassy_executor::task]
pub async fn ui_task(
    engine: &'static SharedEngine,
    mut radio: ClockRadio,
    mut storage: SettingsFlash<'static>,
    mut settings: EngineSettings,
    refresh: Duration,
) {
    info!("UI task started");

    let mut controller = ModeController::new();
    let mut unsaved = UnsavedRecords::default();
    let mut ticker = Ticker::every(refresh);

    loop {
        if let Some(reading) = TEMP_READING.try_take() {
            match reading {
                Some(temp_x10) => radio.set_temperature(temp_x10),
                None => debug!("Temperature sensor fault"),
            }
        }

        if let Some(command) = engine.poll_button_command() {
            debug!("Button: {:?}", command);
            if let Some(action) = controller.on_command(engine, command) {
                apply(action, engine, &mut radio, &mut storage, &mut settings, &mut unsaved).await;
            }
        }

        let steps = engine.poll_encoder();
        if let Some(action) = controller.on_encoder(engine, steps) {
            apply(action, engine, &mut radio, &mut storage, &mut settings, &mut unsaved).await;
        }

        controller.refresh(engine, &radio);

        let due = unsaved.take_due(controller.mode());
        flush(&radio, &mut storage, due).await;

        ticker.next().await;
    }
}

async fn apply(
    action: UiAction,
    engine: &SharedEngine,
    radio: &mut ClockRadio,
    storage: &mut SettingsFlash<'static>,
    settings: &mut EngineSettings,
    unsaved: &mut UnsavedRecords,
) {
    trace!("Action: {:?}", action);
    unsaved.note(action);

    match action {
        UiAction::AdjustVolume(steps) => radio.change_volume(steps),
        UiAction::AdjustHour(steps) => radio.adjust_hour(steps),
        UiAction::AdjustMinute(steps) => radio.adjust_minute(steps),
        UiAction::TuneBy(steps) => radio.tune_by(steps),
        UiAction::NextStation(steps) => {
            if !radio.step_station(steps) {
                debug!("No stored station in that direction");
            }
        }
        UiAction::ToggleMono => radio.toggle_mono(),
        UiAction::ToggleStation => match radio.toggle_station() {
            StationToggle::Full => warn!("Station list full"),
            _ => persist_record(storage, StorageKey::Stations, radio.stations()).await,
        },
        UiAction::ToggleZeroHour => {
            settings.zero_hour = !settings.zero_hour;
            engine.set_time_format(settings.time_format());
            persist_settings(storage, settings).await;
        }
        UiAction::BrightnessChanged(level) => {
            settings.brightness = level;
            persist_settings(storage, settings).await;
        }
    }
}

async fn flush(radio: &ClockRadio, storage: &mut SettingsFlash<'static>, due: UnsavedRecords) {
    if due.volume {
        persist_record(storage, StorageKey::Volume, &radio.volume()).await;
    }
    if due.tuner {
        persist_record(storage, StorageKey::TunerParams, &radio.tuner_params()).await;
    }
}

async fn persist_settings(storage: &mut SettingsFlash<'static>, settings: &EngineSettings) {
    if let Err(e) = save_settings(storage, settings).await {
        warn!("Failed to save engine settings: {:?}", e);
    }
}

async fn persist_record<T: serde::Serialize>(
    storage: &mut SettingsFlash<'static>,
    key: StorageKey,
    value: &T,
) {
    if let Err(e) = save_record(storage, key, value).await {
        warn!("Failed to save {:?}: {:?}", key, e);
    }
}
