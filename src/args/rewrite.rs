use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// What a forwarded argument turned out to be on the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// Not an existing path; forwarded untouched.
    Plain,
    File,
    Directory,
}

/// One forwarded argument, before and after rewriting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    /// The argument as text; non-UTF-8 bytes are replaced.
    pub original: String,
    /// The argument exactly as given, for host-side file access.
    pub path: PathBuf,
    pub rewritten: String,
    pub kind: ArgKind,
}

impl Argument {
    pub fn is_file(&self) -> bool {
        self.kind == ArgKind::File
    }
}

/// Classify every argument against the filesystem and point existing paths
/// at `container_dir`.
///
/// Relative paths resolve against `work_dir`. Order is preserved.
pub fn rewrite<I, S>(args: I, work_dir: &Path, container_dir: &str) -> Vec<Argument>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    args.into_iter()
        .map(|arg| {
            let path = PathBuf::from(arg.into());
            let original = path.to_string_lossy().into_owned();
            let kind = if path.as_os_str().is_empty() {
                // Joining "" would stat `work_dir` itself.
                ArgKind::Plain
            } else {
                classify(&work_dir.join(&path))
            };
            let rewritten = match kind {
                ArgKind::Plain => original.clone(),
                ArgKind::File | ArgKind::Directory => {
                    join_container(container_dir, base_name(&original))
                }
            };
            Argument {
                original,
                path,
                rewritten,
                kind,
            }
        })
        .collect()
}

/// The rewritten argument list as handed to the container.
pub fn container_args(args: &[Argument]) -> Vec<String> {
    args.iter().map(|a| a.rewritten.clone()).collect()
}

/// Last path element of `arg`, ignoring trailing separators.
///
/// Returns `"/"` for a path made only of separators and `"."` for an empty one.
pub fn base_name(arg: &str) -> &str {
    if arg.is_empty() {
        return ".";
    }
    let trimmed = arg.trim_end_matches(is_separator);
    if trimmed.is_empty() {
        return "/";
    }
    match trimmed.rfind(is_separator) {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

fn classify(path: &Path) -> ArgKind {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_dir() => ArgKind::Directory,
        Ok(_) => ArgKind::File,
        Err(_) => ArgKind::Plain,
    }
}

fn join_container(container_dir: &str, base: &str) -> String {
    let dir = container_dir.trim_end_matches('/');
    match base {
        "/" | "." => dir.to_string(),
        ".." => match dir.rfind('/') {
            Some(0) | None => "/".to_string(),
            Some(idx) => dir[..idx].to_string(),
        },
        _ => format!("{dir}/{base}"),
    }
}

fn is_separator(c: char) -> bool {
    c == '/' || (cfg!(windows) && c == '\\')
}
