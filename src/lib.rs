pub mod args;
pub mod config;
pub mod error;
pub mod launcher;
pub mod runtime;
pub mod volume;

pub use error::LaunchError;
pub use launcher::{Report, run};
