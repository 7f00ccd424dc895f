//! The execution bridge: a seam between the editor and whatever interpreter
//! actually runs the script text.
//!
//! The editor never inspects or validates script syntax; it hands the
//! buffer's literal text to a [`ScriptHost`] and renders whatever entries
//! come back.

use anyhow::Result;
use pypad_core::log::LogEntry;

/// How the host should treat the submitted text.
///
/// Hosts that embed an interpreter distinguish running a whole buffer from
/// evaluating a single statement; hosts that don't may treat both alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Run the text as a complete script.
    File,
    /// Evaluate the text as a statement.
    Statement,
}

/// Structured result of one execution: an overall result value plus the
/// ordered, severity-tagged output lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutput {
    pub result: String,
    pub entries: Vec<LogEntry>,
}

/// An interpreter the editor can submit script text to.
///
/// `execute` blocks until the host is done. `Ok(None)` means the command
/// produced no output at all; execution failures inside the host are not
/// errors here, they come back as error-severity entries.
pub trait ScriptHost {
    /// Human-readable host name for logging and the window title.
    fn name(&self) -> &str;

    fn execute(&self, command: &str, mode: ExecutionMode) -> Result<Option<ExecutionOutput>>;
}

/// Fallback host used when no interpreter is found: accepts every command
/// and produces no captured output.
#[derive(Debug, Default)]
pub struct NoHost;

impl ScriptHost for NoHost {
    fn name(&self) -> &str {
        "none"
    }

    fn execute(&self, command: &str, _mode: ExecutionMode) -> Result<Option<ExecutionOutput>> {
        tracing::debug!(len = command.len(), "no host available, command dropped");
        Ok(None)
    }
}

/// Picks the best available host: a Python interpreter when one is on the
/// PATH, otherwise the no-output fallback.
pub fn detect_host() -> Box<dyn ScriptHost> {
    match crate::python::PythonHost::detect() {
        Some(host) => {
            tracing::info!(interpreter = host.interpreter(), "python host detected");
            Box::new(host)
        }
        None => {
            tracing::warn!("no python interpreter found, running without a host");
            Box::new(NoHost)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_host_returns_no_output() {
        let host = NoHost;
        let out = host.execute("print(1)", ExecutionMode::File).unwrap();
        assert!(out.is_none());
    }

    #[test]
    fn detect_host_always_yields_a_host() {
        // Either a real interpreter or the fallback; never a panic.
        let host = detect_host();
        assert!(!host.name().is_empty());
    }
}
