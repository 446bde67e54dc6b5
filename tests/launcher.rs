//! End-to-end tests for the `dxclient` binary.
//!
//! A shell script named `docker` stands in for the container runtime, so
//! these run without a daemon. Unix only.
#![cfg(unix)]

use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use dxclient::config::{self, Config, TtyMode};

struct Sandbox {
    work: tempfile::TempDir,
    bin: tempfile::TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            work: tempfile::tempdir().expect("failed to create work dir"),
            bin: tempfile::tempdir().expect("failed to create bin dir"),
        }
    }

    fn work(&self) -> &Path {
        self.work.path()
    }

    /// Install a fake runtime under `name` with the given script body.
    fn runtime(&self, name: &str, body: &str) -> PathBuf {
        let path = self.bin.path().join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    /// Run the launcher binary with only the fake runtime dir (and /bin for `sh`) on PATH.
    fn launch(&self, args: &[&str], envs: &[(&str, &str)]) -> Output {
        let args: Vec<&OsStr> = args.iter().map(OsStr::new).collect();
        self.launch_os(&args, envs)
    }

    fn launch_os(&self, args: &[&OsStr], envs: &[(&str, &str)]) -> Output {
        let path = format!("{}:/bin:/usr/bin", self.bin.path().display());
        Command::new(env!("CARGO_BIN_EXE_dxclient"))
            .args(args)
            .current_dir(self.work())
            .env_clear()
            .env("PATH", path)
            .envs(envs.iter().copied())
            .output()
            .expect("failed to run dxclient")
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

const ECHO_ARGS: &str = "for a in \"$@\"; do echo \"arg:$a\"; done";

#[test]
fn forwards_rewritten_arguments_and_cleans_up() {
    let sb = Sandbox::new();
    sb.runtime("docker", ECHO_ARGS);
    std::fs::write(sb.work().join("config.yaml"), "a: 1\n").unwrap();

    let output = sb.launch(&["config.yaml", "--verbose"], &[]);
    let printed = stdout(&output);

    assert!(output.status.success(), "stdout: {printed}");
    let first = printed.lines().next().unwrap();
    assert!(first.starts_with("docker run -e VOLUME_DIR=\"store\" -u "));
    assert!(first.contains(&format!(
        "-v \"{}/store://dxclient/store\":Z",
        sb.work().display()
    )));
    assert!(first.ends_with("./bin/dxclient /dxclient/store/config.yaml --verbose"));
    assert!(printed.contains("arg:/dxclient/store/config.yaml\narg:--verbose\n"));
    // stdin is not a terminal here.
    assert!(!printed.contains("arg:-it"));

    assert!(sb.work().join("store").is_dir());
    assert!(!sb.work().join("store/config.yaml").exists());
}

#[test]
fn missing_runtime_fails_without_running_anything() {
    let sb = Sandbox::new();

    let output = sb.launch(&["config.yaml"], &[("CONTAINER_RUNTIME", "dx-missing-runtime")]);

    assert_eq!(output.status.code(), Some(1));
    let printed = stdout(&output);
    assert!(printed.contains("dx-missing-runtime"));
    assert!(!printed.contains(" run "));
    assert!(!sb.work().join("store").exists());
}

#[test]
fn environment_selects_runtime_and_volume() {
    let sb = Sandbox::new();
    sb.runtime("podman", ECHO_ARGS);
    std::fs::write(sb.work().join("theme.zip"), b"PK").unwrap();

    let output = sb.launch(
        &["theme.zip"],
        &[("CONTAINER_RUNTIME", "podman"), ("VOLUME_DIR", "shared")],
    );
    let printed = stdout(&output);

    assert!(output.status.success(), "stdout: {printed}");
    assert!(printed.starts_with("podman run -e VOLUME_DIR=\"shared\" "));
    assert!(printed.contains("arg:VOLUME_DIR=shared\n"));
    assert!(sb.work().join("shared").is_dir());
    assert!(!sb.work().join("shared/theme.zip").exists());
}

#[test]
fn container_exit_code_becomes_launcher_exit_code() {
    let sb = Sandbox::new();
    sb.runtime("docker", "echo boom >&2; exit 7");

    let output = sb.launch(&[], &[]);

    assert_eq!(output.status.code(), Some(7));
    let printed = stdout(&output);
    assert!(printed.contains("boom\n"), "stderr is merged into stdout");
    assert!(printed.contains("exit code 7"));
}

#[test]
fn config_file_switches_image_and_forces_tty() {
    let sb = Sandbox::new();
    sb.runtime("docker", ECHO_ARGS);
    std::fs::write(
        sb.work().join(config::CONFIG_FILE),
        "image: hcl/dx/client-next\ntag: \"2025\"\ntty: always\n",
    )
    .unwrap();

    let output = sb.launch(&["--help"], &[]);
    let printed = stdout(&output);

    assert!(output.status.success(), "stdout: {printed}");
    assert!(printed.contains("arg:-it\n"));
    assert!(printed.contains("arg:hcl/dx/client-next:2025\n"));
}

#[test]
fn invalid_config_file_is_reported() {
    let sb = Sandbox::new();
    sb.runtime("docker", ECHO_ARGS);
    std::fs::write(sb.work().join(config::CONFIG_FILE), "network: [host\n").unwrap();

    let output = sb.launch(&[], &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("invalid configuration"));
}

#[test]
fn shell_mode_keeps_metacharacters_inert() {
    let sb = Sandbox::new();
    sb.runtime("docker", ECHO_ARGS);
    std::fs::write(sb.work().join(config::CONFIG_FILE), "exec: shell\n").unwrap();

    let output = sb.launch(&["a b", "$(touch pwned)"], &[]);
    let printed = stdout(&output);

    assert!(output.status.success(), "stdout: {printed}");
    assert!(printed.contains("arg:a b\narg:$(touch pwned)\n"));
    assert!(!sb.work().join("pwned").exists());
}

#[test]
fn library_run_uses_resolved_config() {
    let sb = Sandbox::new();
    sb.runtime("docker", ECHO_ARGS);
    std::fs::write(sb.work().join("app.json"), "{}").unwrap();

    let mut cfg: Config = config::resolve(sb.work(), |name| match name {
        "VOLUME_DIR" => Some("vol".into()),
        _ => None,
    })
    .unwrap();
    cfg.search_path = Some(sb.bin.path().as_os_str().to_owned());
    cfg.tty = TtyMode::Never;

    let mut out = Vec::new();
    let report = dxclient::run(&cfg, ["app.json", "-x"], &mut out).unwrap();

    assert_eq!(report.exit_code(), 0);
    assert_eq!(report.command.args[2], "VOLUME_DIR=vol");
    assert!(report.result.log.contains("arg:/dxclient/store/app.json\narg:-x\n"));
    assert!(report.cleanup_failures.is_empty());
    assert!(!sb.work().join("vol/app.json").exists());
}

#[test]
fn non_utf8_file_argument_is_staged_and_removed() {
    let sb = Sandbox::new();
    sb.runtime("docker", "ls store");
    let name = OsStr::from_bytes(b"r\xe9sum\xe9.txt");
    std::fs::write(sb.work().join(name), "cv").unwrap();

    let output = sb.launch_os(&[name], &[]);
    let printed = stdout(&output);

    assert!(output.status.success(), "stdout: {printed}");
    assert!(printed.contains("./bin/dxclient /dxclient/store/r\u{FFFD}sum\u{FFFD}.txt"));
    // The staged copy existed while the runtime ran and is gone afterwards.
    assert!(printed.contains("r\u{FFFD}sum\u{FFFD}.txt\n"));
    assert_eq!(std::fs::read_dir(sb.work().join("store")).unwrap().count(), 0);
    assert!(sb.work().join(name).exists());
}
