// Host side of the bind mount: creation, staging of file arguments, cleanup.

use std::collections::HashSet;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use crate::args::{Argument, base_name};
use crate::error::LaunchError;

/// A per-file failure that is reported but never stops the launch.
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: io::Error,
}

impl fmt::Display for FileFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.error)
    }
}

/// Create `path` and any missing parents. `mode` applies to new directories on Unix.
pub fn ensure_dir(path: &Path, mode: u32) -> Result<(), LaunchError> {
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    builder.create(path).map_err(|source| LaunchError::VolumeDir {
        path: path.to_path_buf(),
        source,
    })
}

/// Where a file argument lives inside the volume directory.
pub fn staged_path(volume: &Path, arg: &Argument) -> PathBuf {
    volume.join(base_name(&arg.original))
}

/// Result of staging: copy failures plus files that were already in place.
#[derive(Debug, Default)]
pub struct Staged {
    pub failures: Vec<FileFailure>,
    /// Arguments that already are their staged copy. Cleanup leaves these alone.
    pub in_place: HashSet<PathBuf>,
}

/// Copy every file argument into `volume` under its base name.
///
/// A file that already is its staged copy is left alone and recorded in
/// [`Staged::in_place`].
pub fn stage(args: &[Argument], work_dir: &Path, volume: &Path) -> Staged {
    let mut staged = Staged::default();
    for arg in args.iter().filter(|a| a.is_file()) {
        let source = work_dir.join(&arg.path);
        let dest = staged_path(volume, arg);
        if same_file(&source, &dest) {
            tracing::debug!(path = %dest.display(), "argument already in volume");
            staged.in_place.insert(dest);
            continue;
        }
        match std::fs::copy(&source, &dest) {
            Ok(bytes) => {
                tracing::debug!(from = %source.display(), to = %dest.display(), bytes, "staged");
            }
            Err(error) => staged.failures.push(FileFailure { path: dest, error }),
        }
    }
    staged
}

/// Delete the staged copy of every file argument, except paths in `keep`.
///
/// Each path is removed at most once; failures are collected and the rest
/// of the files are still processed.
pub fn cleanup(args: &[Argument], volume: &Path, keep: &HashSet<PathBuf>) -> Vec<FileFailure> {
    let mut seen = HashSet::new();
    let mut failures = Vec::new();
    for arg in args.iter().filter(|a| a.is_file()) {
        let path = staged_path(volume, arg);
        if !seen.insert(path.clone()) {
            continue;
        }
        if keep.contains(&path) {
            tracing::info!(path = %path.display(), "not removing file that was passed from the volume");
            continue;
        }
        match std::fs::remove_file(&path) {
            Ok(()) => tracing::debug!(path = %path.display(), "removed"),
            Err(error) => failures.push(FileFailure { path, error }),
        }
    }
    failures
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
