use std::io::{Read, Write};
use std::time::{Duration, Instant};

use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use tracing::{debug, info};

use crate::error::{Result, SerialError};

/// Default baud rate of the sensor's command UART.
pub const CONTROL_BAUD: u32 = 115_200;

/// How long to wait for per-command acknowledgement text before giving up.
pub const DEFAULT_ACK_DEADLINE: Duration = Duration::from_secs(2);

const ACK_POLL_INTERVAL: Duration = Duration::from_millis(10);
const ACK_READ_CHUNK: usize = 1024;

/// How the sensor answered a configuration command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AckOutcome {
    Acknowledged,
    Rejected,
}

/// Classify the response text accumulated so far.
///
/// The sensor CLI echoes each command and answers with a line containing
/// `Done` (executed) or `Skipped` (ignored in this mode); failures print a
/// line containing `Error`. `None` means keep reading.
fn ack_outcome(response: &str) -> Option<AckOutcome> {
    if response.contains("Error") {
        Some(AckOutcome::Rejected)
    } else if response.contains("Done") || response.contains("Skipped") {
        Some(AckOutcome::Acknowledged)
    } else {
        None
    }
}

/// The sensor's command channel.
///
/// Each command is written as one line and considered complete only once the
/// sensor's acknowledgement text arrives.
pub struct ControlPort {
    port: Box<dyn SerialPort>,
    path: String,
    ack_deadline: Duration,
}

impl ControlPort {
    /// Open the control UART at the standard baud rate. 8 data bits, no
    /// parity, one stop bit, no flow control.
    pub fn open(path: &str) -> Result<Self> {
        let port = serialport::new(path, CONTROL_BAUD)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(ACK_POLL_INTERVAL)
            .open()
            .map_err(|source| SerialError::Open {
                path: path.to_string(),
                source,
            })?;

        info!(path, baud = CONTROL_BAUD, "opened control port");
        Ok(Self {
            port,
            path: path.to_string(),
            ack_deadline: DEFAULT_ACK_DEADLINE,
        })
    }

    /// Override the per-command acknowledgement deadline.
    pub fn with_ack_deadline(mut self, deadline: Duration) -> Self {
        self.ack_deadline = deadline;
        self
    }

    /// The device path this port was opened on.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Send one command line and wait for its acknowledgement.
    pub fn send_command(&mut self, command: &str) -> Result<()> {
        debug!(command, "sending sensor command");
        self.port.write_all(command.as_bytes())?;
        self.port.write_all(b"\n")?;
        self.port.flush()?;

        let started = Instant::now();
        let mut response = String::new();
        loop {
            match ack_outcome(&response) {
                Some(AckOutcome::Acknowledged) => {
                    debug!(command, "command acknowledged");
                    return Ok(());
                }
                Some(AckOutcome::Rejected) => {
                    return Err(SerialError::CommandRejected {
                        command: command.to_string(),
                        response,
                    });
                }
                None => {}
            }

            if started.elapsed() >= self.ack_deadline {
                return Err(SerialError::AckTimeout {
                    command: command.to_string(),
                    waited: self.ack_deadline,
                });
            }

            let ready = self.port.bytes_to_read()? as usize;
            if ready == 0 {
                std::thread::sleep(ACK_POLL_INTERVAL);
                continue;
            }
            let mut buf = vec![0u8; ready.min(ACK_READ_CHUNK)];
            let read = self.port.read(&mut buf)?;
            response.push_str(&String::from_utf8_lossy(&buf[..read]));
        }
    }

    /// Send a whole configuration script, stopping at the first failure.
    pub fn run_script<'a>(&mut self, commands: impl IntoIterator<Item = &'a str>) -> Result<()> {
        for command in commands {
            self.send_command(command)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for ControlPort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlPort")
            .field("path", &self.path)
            .field("ack_deadline", &self.ack_deadline)
            .finish()
    }
}
