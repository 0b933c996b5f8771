// Argument handling and dispatch are platform-neutral; only the COM
// backend is Windows-only.
#[cfg_attr(not(windows), allow(dead_code))]
mod app;
#[cfg_attr(not(windows), allow(dead_code))]
mod cli;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn init_logging() {
    // Off unless RUST_LOG asks for it; stderr otherwise carries one line per failure.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(filter),
        )
        .init();
}

#[cfg(windows)]
fn main() {
    init_logging();
    let code = app::run(
        std::env::args_os(),
        &taskbar_pin::ComShell,
        &mut std::io::stderr(),
    );
    // Every guard has been dropped by the time `run` returns.
    std::process::exit(code);
}

// Non-Windows stub builds cleanly and informs the user.
#[cfg(not(windows))]
fn main() {
    init_logging();
    eprintln!("pin is Windows-only. Build on Windows to run.");
    std::process::exit(1);
}
