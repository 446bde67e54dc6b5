// Launcher configuration: defaults, `.dxclient.yaml`, environment overrides.

pub mod loader;
pub mod types;

pub use loader::{CONFIG_ENV, CONFIG_FILE, from_process, load_file, resolve};
pub use types::{Config, ExecMode, TtyMode};
