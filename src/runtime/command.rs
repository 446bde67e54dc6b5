use crate::args::{Argument, container_args};
use crate::config::Config;

use super::types::ContainerCommand;

/// Build the `run` invocation for the client image.
///
/// `user` is the output of [`user_args`](super::user_args); an empty slice
/// omits the flag entirely.
pub fn compose(
    config: &Config,
    args: &[Argument],
    tty: bool,
    user: &[String],
) -> ContainerCommand {
    let volume_env = format!("VOLUME_DIR={}", config.volume_dir);
    let mount = format!("{}:/{}", mount_source(config), config.container_dir);
    let tty_flag = if tty { "-it" } else { "" };
    let forwarded = container_args(args);

    let mut argv: Vec<String> = vec!["run".into(), "-e".into(), volume_env];
    argv.extend(user.iter().cloned());
    if tty {
        argv.push(tty_flag.into());
    }
    argv.extend([
        "-v".into(),
        format!("{mount}:Z"),
        format!("--network={}", config.network),
        "--platform".into(),
        config.platform.clone(),
        "--name".into(),
        config.container_name.clone(),
        "--rm".into(),
        config.image_ref(),
        config.entrypoint.clone(),
    ]);
    argv.extend(forwarded.iter().cloned());

    let user_part = if user.is_empty() {
        String::new()
    } else {
        format!("{} ", user.join(" "))
    };
    // Double quotes and the bare `:Z` suffix are part of the printed format.
    let prefix = format!(
        "{} run -e VOLUME_DIR=\"{}\" {}{} -v \"{}\":Z --network={} --platform {} --name {} --rm {} {}",
        config.runtime,
        config.volume_dir,
        user_part,
        tty_flag,
        mount,
        config.network,
        config.platform,
        config.container_name,
        config.image_ref(),
        config.entrypoint,
    );

    ContainerCommand {
        program: config.runtime.clone(),
        args: argv,
        prefix,
        forwarded,
    }
}

/// Absolute host side of the mount with forward slashes.
fn mount_source(config: &Config) -> String {
    config.volume_path().to_string_lossy().replace('\\', "/")
}
