use std::time::Duration;

/// Errors that can occur on the sensor's serial ports.
#[derive(Debug, thiserror::Error)]
pub enum SerialError {
    /// Failed to open a serial device.
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        source: serialport::Error,
    },

    /// The underlying serial driver reported an error.
    #[error("serial port error: {0}")]
    Port(#[from] serialport::Error),

    /// An I/O error occurred while reading or writing.
    #[error("serial I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The sensor answered a configuration command with an error.
    #[error("sensor rejected command {command:?}: {response:?}")]
    CommandRejected { command: String, response: String },

    /// The sensor never acknowledged a configuration command.
    #[error("no acknowledgement for command {command:?} within {waited:?}")]
    AckTimeout { command: String, waited: Duration },
}

pub type Result<T> = std::result::Result<T, SerialError>;
