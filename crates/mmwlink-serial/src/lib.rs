//! Serial transport for mmWave radar sensors.
//!
//! The sensor exposes two UARTs: a command channel that accepts a
//! configuration script with per-line acknowledgement, and a high-rate data
//! channel that streams binary frames. This is the lowest layer of mmwlink.
//! Everything else builds on top of the [`ByteSource`] trait provided here.

pub mod control;
pub mod data;
pub mod error;
pub mod source;

pub use control::{ControlPort, CONTROL_BAUD, DEFAULT_ACK_DEADLINE};
pub use data::{DataPort, DATA_BAUD};
pub use error::{Result, SerialError};
pub use source::{ByteSource, ReplaySource};
