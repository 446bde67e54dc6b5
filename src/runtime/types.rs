/// A fully composed `<runtime> run ...` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerCommand {
    /// Runtime name as configured, e.g. `docker`.
    pub program: String,
    /// Everything after the program, forwarded arguments last.
    pub args: Vec<String>,
    /// Rendered flags up to and including the entrypoint.
    pub(crate) prefix: String,
    /// The rewritten arguments handed to the entrypoint.
    pub(crate) forwarded: Vec<String>,
}

impl ContainerCommand {
    /// The command line printed before execution.
    ///
    /// Forwarded arguments are joined with single spaces and not quoted.
    pub fn render(&self) -> String {
        format!("{} {}", self.prefix, self.forwarded.join(" "))
    }

    /// The line handed to a shell in `shell` mode, with forwarded arguments quoted.
    pub fn shell_line(&self) -> String {
        format!("{} {}", self.prefix, shell_words::join(&self.forwarded))
    }
}

/// Outcome of a container run.
#[derive(Debug)]
pub struct ContainerResult {
    pub success: bool,
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    /// Merged stdout and stderr, as echoed.
    pub log: String,
}
