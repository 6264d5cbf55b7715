use mmwlink_sensor::SensorSession;
use mmwlink_serial::ReplaySource;
use tracing::info;

use crate::cmd::ReplayArgs;
use crate::exit::{io_error, session_error, CliResult, SUCCESS};
use crate::output::{print_frame, OutputFormat};

pub fn run(args: ReplayArgs, format: OutputFormat) -> CliResult<i32> {
    let data = std::fs::read(&args.file).map_err(|err| io_error("capture read failed", err))?;
    let source = ReplaySource::with_chunk_size(data, args.chunk_size.max(1));
    let mut session = SensorSession::new(source);

    let mut decoded = 0usize;
    while session.get_ref().remaining() > 0 {
        session
            .poll()
            .map_err(|err| session_error("replay poll failed", err))?;

        for frame in session.drain(usize::MAX) {
            print_frame(&frame, format);
            decoded = decoded.saturating_add(1);
        }
    }

    info!(
        decoded,
        failures = session.decode_failures(),
        pending_bytes = session.pending_bytes(),
        "replay complete"
    );

    Ok(SUCCESS)
}
