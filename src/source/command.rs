//! Backend invocation through an external command.
//!
//! The default backend is `gcloud logging read`. The invoker only runs the
//! process and captures its output; decoding happens in [`super::CommandLogSource`].

use std::io;
use std::process::Command;
use tracing::debug;

/// Program used when nothing else is configured.
pub const DEFAULT_PROGRAM: &str = "gcloud";

/// Captured result of one backend invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendOutput {
    /// Whether the backend exited with a success status.
    pub success: bool,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl BackendOutput {
    /// Successful invocation with the given stdout and no stderr.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Failed invocation with the given stderr and no stdout.
    pub fn failed(stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Stdout followed by stderr, with surrounding whitespace trimmed.
    ///
    /// This is what the user sees when the backend fails.
    pub fn combined(&self) -> String {
        let mut text = String::with_capacity(self.stdout.len() + self.stderr.len());
        text.push_str(&self.stdout);
        text.push_str(&self.stderr);
        text.trim().to_string()
    }
}

/// Runs the backend for a rendered query.
///
/// Blocking. Implementations must be shareable with the worker thread.
pub trait BackendInvoker: Send + Sync {
    /// Run the backend with `query` and a result cap of `limit` records.
    ///
    /// # Errors
    ///
    /// Returns an I/O error only when the backend could not be started at all.
    /// A backend that runs and fails is reported through [`BackendOutput::success`].
    fn invoke(&self, query: &str, limit: usize) -> io::Result<BackendOutput>;

    /// Name used in diagnostics when the backend cannot be started.
    fn name(&self) -> &str {
        "backend"
    }
}

/// Invokes `<program> logging read --limit N --format json [--project P] [query]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvoker {
    program: String,
    project: Option<String>,
}

impl Default for CommandInvoker {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM, None)
    }
}

impl CommandInvoker {
    /// Invoker running `program`, scoped to `project` when given.
    pub fn new(program: impl Into<String>, project: Option<String>) -> Self {
        Self {
            program: program.into(),
            project,
        }
    }

    /// Program name or path being run.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed to the program, in order.
    ///
    /// An empty query omits the filter argument entirely, which asks the
    /// backend for the most recent entries.
    pub fn args(&self, query: &str, limit: usize) -> Vec<String> {
        let mut args = vec![
            "logging".to_string(),
            "read".to_string(),
            "--limit".to_string(),
            limit.to_string(),
            "--format".to_string(),
            "json".to_string(),
        ];
        if let Some(project) = &self.project {
            args.push("--project".to_string());
            args.push(project.clone());
        }
        if !query.is_empty() {
            args.push(query.to_string());
        }
        args
    }
}

impl BackendInvoker for CommandInvoker {
    fn invoke(&self, query: &str, limit: usize) -> io::Result<BackendOutput> {
        let args = self.args(query, limit);
        debug!(program = %self.program, ?args, "Invoking backend");

        let output = Command::new(&self.program).args(&args).output()?;

        Ok(BackendOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn name(&self) -> &str {
        &self.program
    }
}
