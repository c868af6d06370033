//! Input decoding
//!
//! Turns sampled encoder and button lines into encoder steps and button
//! commands. Everything here runs from the periodic tick except the
//! accumulator drain and the mailbox take, which the foreground calls.

pub mod buttons;
pub mod encoder;
pub mod mailbox;
pub mod quadrature;

pub use buttons::{ButtonCommand, ButtonMask, DebounceConfig, DebounceEvent, Debouncer};
pub use encoder::{EncoderResolution, TickAccumulator};
pub use mailbox::CommandMailbox;
pub use quadrature::{Phase, QuadratureDecoder};
