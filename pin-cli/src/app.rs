use crate::cli::{Cli, USAGE};
use std::ffi::OsString;
use std::io::Write;
use taskbar_pin::{PinCommand, PinError, ShellBackend};

/// Run one `pin` invocation and return its process exit code.
///
/// A usage error is reported before `backend` is touched. Any other failure
/// is written to `stderr` as a single line.
pub fn run<B, I, T, W>(args: I, backend: &B, stderr: &mut W) -> i32
where
    B: ShellBackend,
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
    W: Write,
{
    let Some(cli) = Cli::from_args(args) else {
        // A broken stderr leaves nowhere to report to; the exit code still tells.
        let _ = stderr.write_all(USAGE.as_bytes());
        return PinError::Usage.exit_code();
    };
    let request = cli.into_request();
    tracing::info!(path = ?request.path, operation = ?request.operation, "starting");

    match PinCommand::new(backend).execute(&request) {
        Ok(()) => {
            tracing::info!("done");
            PinError::EXIT_SUCCESS
        }
        Err(e) => {
            // Same as above: the exit code carries the failure if this write fails.
            let _ = writeln!(stderr, "{e}");
            e.exit_code()
        }
    }
}
