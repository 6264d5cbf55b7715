//! High-level sensor session management for mmwlink.
//!
//! This is the "just works" layer. Open the sensor's ports, apply a
//! configuration script, then poll: bytes flow from the data UART through
//! the frame synchronizer and payload decoder into an ordered queue the
//! host drains at its own pace.

pub mod config;
pub mod error;
pub mod session;

pub use config::SensorConfig;
pub use error::{Result, SessionError};
pub use session::{SensorSession, READ_CHUNK_SIZE};
