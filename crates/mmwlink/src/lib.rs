//! Frame synchronization and decoding for TI mmWave radar sensor serial
//! streams.
//!
//! mmwlink reconstructs discrete frames from the sensor's continuous data
//! UART output, decodes their TLV payloads, and queues the results for the
//! host. The crates layer bottom-up:
//!
//! # Crate Structure
//!
//! - [`serial`] — Serial transport (data stream, configuration channel)
//! - [`frame`] — Magic-word frame synchronization and TLV payload decoding
//! - [`sensor`] — High-level sensor session (configure, poll, drain)

/// Re-export serial transport types.
pub mod serial {
    pub use mmwlink_serial::*;
}

/// Re-export framing types.
pub mod frame {
    pub use mmwlink_frame::*;
}

/// Re-export sensor session types.
pub mod sensor {
    pub use mmwlink_sensor::*;
}
