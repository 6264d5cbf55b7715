use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod ports;
pub mod replay;
pub mod stream;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Configure a sensor and stream decoded frames.
    Stream(StreamArgs),
    /// Replay a captured data-port byte stream through the decoder.
    Replay(ReplayArgs),
    /// List candidate serial ports.
    Ports(PortsArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Stream(args) => stream::run(args, format),
        Command::Replay(args) => replay::run(args, format),
        Command::Ports(args) => ports::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct StreamArgs {
    /// Data port device path (e.g. /dev/ttyUSB1).
    pub data_port: String,
    /// Control port device path, for sending the configuration script.
    #[arg(long, value_name = "DEV", requires = "config")]
    pub control_port: Option<String>,
    /// Configuration script to send before streaming.
    #[arg(long, value_name = "FILE", requires = "control_port")]
    pub config: Option<PathBuf>,
    /// Data port baud rate.
    #[arg(long, default_value_t = mmwlink_serial::DATA_BAUD)]
    pub baud: u32,
    /// Exit after printing N decoded frames.
    #[arg(long)]
    pub count: Option<usize>,
}

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Capture file of raw data-port bytes.
    pub file: PathBuf,
    /// Bytes delivered per simulated read.
    #[arg(long, default_value_t = 64)]
    pub chunk_size: usize,
}

#[derive(Args, Debug, Default)]
pub struct PortsArgs {}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
