use std::io::{self, Read, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use crate::config::ExecMode;
use crate::error::LaunchError;

use super::types::{ContainerCommand, ContainerResult};

/// Run the container and echo its merged stdout/stderr to `out` as it arrives.
///
/// `runtime` is the binary resolved on PATH; it is only spawned directly in
/// [`ExecMode::Direct`]. A non-zero exit is a normal result, not an error.
pub fn execute<W: Write>(
    cmd: &ContainerCommand,
    runtime: &Path,
    mode: ExecMode,
    work_dir: &Path,
    out: &mut W,
) -> Result<ContainerResult, LaunchError> {
    let spawn_err = |source: io::Error| LaunchError::Spawn {
        program: cmd.program.clone(),
        source,
    };

    let mut command = match mode {
        ExecMode::Direct => {
            let mut c = Command::new(runtime);
            c.args(&cmd.args);
            c
        }
        ExecMode::Shell => shell_command(&cmd.shell_line()),
    };

    // One pipe for both streams keeps their relative order.
    let (mut reader, writer) = io::pipe().map_err(spawn_err)?;
    let writer_err = writer.try_clone().map_err(spawn_err)?;
    command
        .current_dir(work_dir)
        .stdin(Stdio::inherit())
        .stdout(writer)
        .stderr(writer_err);

    tracing::debug!(program = ?command.get_program(), mode = mode.as_str(), "spawning");
    let mut child = command.spawn().map_err(spawn_err)?;
    // The command still holds write ends; drop them so the read sees EOF.
    drop(command);

    let mut log = Vec::new();
    let mut buf = [0u8; 8192];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => {
                let _ = out.write_all(&buf[..n]);
                let _ = out.flush();
                log.extend_from_slice(&buf[..n]);
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::warn!(error = %e, "stopped reading container output");
                break;
            }
        }
    }

    let status = child.wait().map_err(spawn_err)?;
    let exit_code = status.code();
    tracing::info!(?exit_code, "container exited");

    Ok(ContainerResult {
        success: status.success(),
        exit_code,
        log: String::from_utf8_lossy(&log).into_owned(),
    })
}

fn shell_command(line: &str) -> Command {
    if cfg!(windows) {
        let mut c = Command::new("cmd.exe");
        c.args(["/C", line]);
        c
    } else {
        let mut c = Command::new("sh");
        c.args(["-c", line]);
        c
    }
}
