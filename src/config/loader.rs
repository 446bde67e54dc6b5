use std::env;
use std::path::Path;

use anyhow::{Context, Result, bail};

use super::Config;

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = ".dxclient.yaml";

/// Names an alternative config file. Unlike the default file it must exist.
pub const CONFIG_ENV: &str = "DXCLIENT_CONFIG";

const VOLUME_DIR_ENV: &str = "VOLUME_DIR";
const RUNTIME_ENV: &str = "CONTAINER_RUNTIME";

/// Load a config file, falling back to defaults when it does not exist.
pub fn load_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    let config: Config =
        serde_yaml::from_str(&contents).with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

/// Resolve the configuration for a launch from `work_dir`.
///
/// `lookup` reads environment variables; an empty value counts as unset.
/// The search path is left for the caller to fill in.
pub fn resolve<F>(work_dir: &Path, lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| lookup(name).filter(|v| !v.is_empty());

    let mut config = match var(CONFIG_ENV) {
        Some(explicit) => {
            let path = work_dir.join(explicit);
            if !path.is_file() {
                bail!("config file {} does not exist", path.display());
            }
            load_file(&path)?
        }
        None => load_file(&work_dir.join(CONFIG_FILE))?,
    };

    if let Some(volume_dir) = var(VOLUME_DIR_ENV) {
        config.volume_dir = volume_dir;
    }
    if let Some(runtime) = var(RUNTIME_ENV) {
        config.runtime = runtime;
    }
    config.work_dir = work_dir.to_path_buf();

    Ok(config)
}

/// Resolve the configuration from the current process environment.
pub fn from_process() -> Result<Config> {
    let cwd = env::current_dir().context("reading the current directory")?;
    let mut config = resolve(&cwd, |name| env::var(name).ok())?;
    config.search_path = env::var_os("PATH");
    Ok(config)
}
