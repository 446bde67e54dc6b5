use std::ffi::OsString;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// How the `-it` flag is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TtyMode {
    /// Pass `-it` only when stdin is a terminal.
    Auto,
    Always,
    Never,
}

impl TtyMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TtyMode::Auto => "auto",
            TtyMode::Always => "always",
            TtyMode::Never => "never",
        }
    }
}

/// How the composed command reaches the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecMode {
    /// Spawn the runtime binary with an argument vector.
    Direct,
    /// Hand the rendered command line to `sh -c` (or `cmd.exe /C`).
    Shell,
}

impl ExecMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecMode::Direct => "direct",
            ExecMode::Shell => "shell",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Host directory mounted into the container, relative to `work_dir`.
    pub volume_dir: String,
    /// Runtime executable, looked up on PATH.
    pub runtime: String,
    pub image: String,
    pub tag: String,
    /// Where `volume_dir` appears inside the container.
    pub container_dir: String,
    pub network: String,
    pub platform: String,
    pub container_name: String,
    pub entrypoint: String,
    /// Permission bits for a newly created volume directory (Unix only).
    pub dir_mode: u32,
    pub tty: TtyMode,
    pub exec: ExecMode,

    /// Directory relative arguments and `volume_dir` resolve against.
    #[serde(skip)]
    pub work_dir: PathBuf,
    /// Captured `PATH` used for the runtime lookup.
    #[serde(skip)]
    pub search_path: Option<OsString>,
}

impl Config {
    /// `image:tag` as handed to `run`.
    pub fn image_ref(&self) -> String {
        format!("{}:{}", self.image, self.tag)
    }

    /// The volume directory on the host, resolved against `work_dir`.
    pub fn volume_path(&self) -> PathBuf {
        self.work_dir.join(&self.volume_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            volume_dir: "store".to_string(),
            runtime: "docker".to_string(),
            image: "hcl/dx/client".to_string(),
            tag: "95_CF223_20240905-0159".to_string(),
            container_dir: "/dxclient/store".to_string(),
            network: "host".to_string(),
            platform: "linux/amd64".to_string(),
            container_name: "dxclient".to_string(),
            entrypoint: "./bin/dxclient".to_string(),
            dir_mode: 0o777,
            tty: TtyMode::Auto,
            exec: ExecMode::Direct,
            work_dir: PathBuf::new(),
            search_path: None,
        }
    }
}
