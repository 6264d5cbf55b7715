use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use mmwlink_sensor::{SensorConfig, SensorSession};
use mmwlink_serial::{ControlPort, DataPort};
use tracing::info;

use crate::cmd::StreamArgs;
use crate::exit::{serial_error, session_error, CliError, CliResult, SUCCESS};
use crate::output::{print_frame, OutputFormat};

const IDLE_BACKOFF: Duration = Duration::from_millis(5);

pub fn run(args: StreamArgs, format: OutputFormat) -> CliResult<i32> {
    if let (Some(control_path), Some(config_path)) = (&args.control_port, &args.config) {
        let config = SensorConfig::load(config_path)
            .map_err(|err| session_error("configuration load failed", err))?;
        let mut control = ControlPort::open(control_path)
            .map_err(|err| serial_error("control port open failed", err))?;
        info!(commands = config.len(), "applying configuration script");
        config
            .apply(&mut control)
            .map_err(|err| session_error("configuration failed", err))?;
    }

    let data = DataPort::open_with_baud(&args.data_port, args.baud)
        .map_err(|err| serial_error("data port open failed", err))?;
    let mut session = SensorSession::new(data);

    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    let mut printed = 0usize;
    while running.load(Ordering::SeqCst) {
        let emitted = session.poll().map_err(|err| session_error("poll failed", err))?;
        if emitted == 0 {
            std::thread::sleep(IDLE_BACKOFF);
            continue;
        }

        for frame in session.drain(usize::MAX) {
            print_frame(&frame, format);
            printed = printed.saturating_add(1);

            if let Some(count) = args.count {
                if printed >= count {
                    return Ok(SUCCESS);
                }
            }
        }
    }

    Ok(SUCCESS)
}

fn install_ctrlc_handler(running: Arc<AtomicBool>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .map_err(|err| {
        CliError::new(
            crate::exit::INTERNAL,
            format!("signal handler setup failed: {err}"),
        )
    })
}
