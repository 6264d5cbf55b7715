use std::path::PathBuf;

use mmwlink_serial::SerialError;

/// Errors that can occur while driving a sensor session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The serial transport failed. Fatal to the session; never retried
    /// internally.
    #[error("transport failure: {0}")]
    Transport(#[from] SerialError),

    /// The configuration script could not be read.
    #[error("failed to read configuration script {path}: {source}")]
    Script {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SessionError>;
