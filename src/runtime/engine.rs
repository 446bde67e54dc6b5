use std::path::{Path, PathBuf};

use crossterm::tty::IsTty;

use crate::config::{Config, TtyMode};
use crate::error::LaunchError;

/// Resolve the configured runtime on the captured search path.
pub fn ensure_available(config: &Config) -> Result<PathBuf, LaunchError> {
    let cwd: &Path = &config.work_dir;
    which::which_in(&config.runtime, config.search_path.as_ref(), cwd).map_err(|source| {
        LaunchError::MissingRuntime {
            runtime: config.runtime.clone(),
            source,
        }
    })
}

/// Whether to pass `-it`, given the mode and whether stdin is a terminal.
pub fn tty_flag(mode: TtyMode, stdin_is_tty: bool) -> bool {
    match mode {
        TtyMode::Auto => stdin_is_tty,
        TtyMode::Always => true,
        TtyMode::Never => false,
    }
}

pub fn stdin_is_tty() -> bool {
    std::io::stdin().is_tty()
}

/// Returns `["-u", "<uid>"]` on Unix so containers write files as the
/// invoking user. Empty on other platforms.
pub fn user_args() -> Vec<String> {
    #[cfg(unix)]
    {
        // SAFETY: getuid() is a simple POSIX getter that always succeeds and has no side effects.
        let uid = unsafe { libc::getuid() };
        vec!["-u".into(), uid.to_string()]
    }

    #[cfg(not(unix))]
    {
        Vec::new()
    }
}
