use std::io::Read;
use std::time::Duration;

use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use tracing::info;

use crate::error::{Result, SerialError};
use crate::source::ByteSource;

/// Default baud rate of the sensor's high-rate data UART.
pub const DATA_BAUD: u32 = 921_600;

const READ_TIMEOUT: Duration = Duration::from_millis(500);

/// The sensor's binary output channel.
///
/// Reads are bounded by what the driver reports ready, so the [`ByteSource`]
/// impl never blocks; the port timeout only applies if the driver lies about
/// availability.
pub struct DataPort {
    port: Box<dyn SerialPort>,
    path: String,
}

impl DataPort {
    /// Open the data UART at the standard baud rate.
    pub fn open(path: &str) -> Result<Self> {
        Self::open_with_baud(path, DATA_BAUD)
    }

    /// Open the data UART at an explicit baud rate. 8 data bits, no parity,
    /// one stop bit, no flow control.
    pub fn open_with_baud(path: &str, baud: u32) -> Result<Self> {
        let port = serialport::new(path, baud)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(READ_TIMEOUT)
            .open()
            .map_err(|source| SerialError::Open {
                path: path.to_string(),
                source,
            })?;

        info!(path, baud, "opened data port");
        Ok(Self {
            port,
            path: path.to_string(),
        })
    }

    /// The device path this port was opened on.
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl ByteSource for DataPort {
    fn available(&mut self) -> Result<usize> {
        Ok(self.port.bytes_to_read()? as usize)
    }

    fn read_up_to(&mut self, max: usize) -> Result<Vec<u8>> {
        let ready = self.available()?.min(max);
        if ready == 0 {
            return Ok(Vec::new());
        }
        let mut buf = vec![0u8; ready];
        let read = self.port.read(&mut buf)?;
        buf.truncate(read);
        Ok(buf)
    }
}

impl std::fmt::Debug for DataPort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataPort").field("path", &self.path).finish()
    }
}
