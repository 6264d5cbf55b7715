mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "mmwlink", version, about = "mmWave radar sensor stream CLI")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stream_subcommand() {
        let cli = Cli::try_parse_from([
            "mmwlink",
            "stream",
            "/dev/ttyUSB1",
            "--control-port",
            "/dev/ttyUSB0",
            "--config",
            "profile.cfg",
            "--count",
            "10",
        ])
        .expect("stream args should parse");

        assert!(matches!(cli.command, Command::Stream(_)));
    }

    #[test]
    fn stream_control_port_requires_config() {
        let err = Cli::try_parse_from([
            "mmwlink",
            "stream",
            "/dev/ttyUSB1",
            "--control-port",
            "/dev/ttyUSB0",
        ])
        .expect_err("control port without config should fail");

        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn parses_replay_subcommand() {
        let cli = Cli::try_parse_from([
            "mmwlink",
            "replay",
            "capture.bin",
            "--chunk-size",
            "32",
            "--format",
            "json",
        ])
        .expect("replay args should parse");

        assert!(matches!(cli.command, Command::Replay(_)));
    }

    #[test]
    fn parses_ports_subcommand() {
        let cli = Cli::try_parse_from(["mmwlink", "ports"]).expect("ports args should parse");
        assert!(matches!(cli.command, Command::Ports(_)));
    }
}
