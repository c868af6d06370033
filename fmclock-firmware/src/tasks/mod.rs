//! Embassy async tasks
//!
//! The tick task runs on the high-priority interrupt executor; the others
//! run in thread mode and talk to it only through the shared engine.

pub mod sensor;
pub mod tick;
pub mod ui;

pub use sensor::sensor_task;
pub use tick::tick_task;
pub use ui::ui_task;
