use std::env;
use std::io;
use std::process::ExitCode;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use dxclient::LaunchError;

/// Log filter, e.g. `DXCLIENT_LOG=debug`. Logs go to stderr.
const LOG_ENV: &str = "DXCLIENT_LOG";

fn main() -> ExitCode {
    init_logging();

    match launch() {
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(err) => {
            // Launcher failures are printed alongside the container output.
            println!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Resolve configuration, run the container, and return the exit code to use.
fn launch() -> Result<i32> {
    let config = dxclient::config::from_process().map_err(LaunchError::Config)?;
    tracing::debug!(
        runtime = %config.runtime,
        volume_dir = %config.volume_dir,
        image = %config.image_ref(),
        "configuration resolved"
    );

    let mut stdout = io::stdout();
    let report = dxclient::run(&config, env::args_os().skip(1), &mut stdout)?;
    Ok(report.exit_code())
}
