//! The launch procedure: rewrite, check, prepare, run, clean up.
//!
//! Every step reads from the [`Config`] assembled at start-up. Nothing is
//! retried and nothing loops back; a failure before execution aborts the
//! launch with a [`LaunchError`].

use std::ffi::OsString;
use std::io::Write;

use crate::args::{self, Argument};
use crate::config::Config;
use crate::error::LaunchError;
use crate::runtime::{self, ContainerCommand, ContainerResult};
use crate::volume::{self, FileFailure};

/// What a completed launch did.
#[derive(Debug)]
pub struct Report {
    pub args: Vec<Argument>,
    pub command: ContainerCommand,
    pub result: ContainerResult,
    pub stage_failures: Vec<FileFailure>,
    pub cleanup_failures: Vec<FileFailure>,
}

impl Report {
    /// Exit code for the launcher process: the container's own, or 1 when it had none.
    pub fn exit_code(&self) -> i32 {
        self.result.exit_code.unwrap_or(1)
    }
}

/// Launch the client container with `raw_args` forwarded.
///
/// The command line and the container output are written to `out`.
pub fn run<I, S, W>(config: &Config, raw_args: I, out: &mut W) -> Result<Report, LaunchError>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    W: Write,
{
    let args = args::rewrite(raw_args, &config.work_dir, &config.container_dir);
    tracing::debug!(
        files = args.iter().filter(|a| a.is_file()).count(),
        total = args.len(),
        "classified arguments"
    );

    let runtime_path = runtime::ensure_available(config)?;
    tracing::debug!(runtime = %runtime_path.display(), "runtime found");

    let tty = runtime::tty_flag(config.tty, runtime::stdin_is_tty());

    let volume_dir = config.volume_path();
    volume::ensure_dir(&volume_dir, config.dir_mode)?;

    let staged = volume::stage(&args, &config.work_dir, &volume_dir);
    for failure in &staged.failures {
        let _ = writeln!(out, "Error copying file {failure}");
    }

    let command = runtime::compose(config, &args, tty, &runtime::user_args());
    let _ = writeln!(out, "{}", command.render());

    let executed = runtime::execute(&command, &runtime_path, config.exec, &config.work_dir, out);
    if let Ok(result) = &executed
        && !result.success
    {
        let _ = writeln!(
            out,
            "Error executing {} command: exit code {}",
            config.runtime,
            result
                .exit_code
                .map_or_else(|| "none".to_string(), |c| c.to_string())
        );
    }

    let cleanup_failures = volume::cleanup(&args, &volume_dir, &staged.in_place);
    for failure in &cleanup_failures {
        let _ = writeln!(out, "Error removing file {failure}");
    }

    Ok(Report {
        args,
        command,
        result: executed?,
        stage_failures: staged.failures,
        cleanup_failures,
    })
}
