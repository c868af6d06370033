//! Configuration types
//!
//! Engine settings and radio records persisted in flash as postcard
//! binary data.

pub mod radio;
pub mod settings;

pub use radio::*;
pub use settings::*;
