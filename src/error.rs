use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that stop a launch before or while the container runs.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("`{runtime}` was not found on PATH")]
    MissingRuntime {
        runtime: String,
        #[source]
        source: which::Error,
    },

    #[error("failed to create volume directory {}", path.display())]
    VolumeDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to execute `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration: {0:#}")]
    Config(anyhow::Error),
}
