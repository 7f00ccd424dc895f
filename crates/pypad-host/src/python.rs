//! Host backed by a system Python interpreter run as a subprocess.

use std::process::{Command, Stdio};

use anyhow::{Context, Result};
use pypad_core::log::{LogEntry, Severity};

use crate::bridge::{ExecutionMode, ExecutionOutput, ScriptHost};

/// Interpreter names probed in order.
const CANDIDATES: &[&str] = &["python3", "python"];

/// Executes script text with a system Python interpreter.
///
/// Both execution modes run through `python -c`; the mode selector exists
/// for hosts whose embedded interpreter distinguishes them.
#[derive(Debug, Clone)]
pub struct PythonHost {
    interpreter: String,
}

impl PythonHost {
    /// Probes the PATH for a working interpreter.
    pub fn detect() -> Option<Self> {
        for candidate in CANDIDATES {
            let probe = Command::new(candidate)
                .arg("--version")
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status();
            if matches!(probe, Ok(status) if status.success()) {
                return Some(Self {
                    interpreter: candidate.to_string(),
                });
            }
        }
        None
    }

    /// Uses a specific interpreter program without probing.
    pub fn with_interpreter(program: impl Into<String>) -> Self {
        Self {
            interpreter: program.into(),
        }
    }

    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }
}

impl ScriptHost for PythonHost {
    fn name(&self) -> &str {
        &self.interpreter
    }

    fn execute(&self, command: &str, _mode: ExecutionMode) -> Result<Option<ExecutionOutput>> {
        let output = Command::new(&self.interpreter)
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("spawning {}", self.interpreter))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let mut entries = collect_entries(&stdout, &stderr);

        let result = match output.status.code() {
            Some(code) => format!("exit code {code}"),
            None => "terminated by signal".to_string(),
        };
        if !output.status.success() && entries.is_empty() {
            entries.push(LogEntry::error(result.clone()));
        }

        if entries.is_empty() {
            return Ok(None);
        }
        Ok(Some(ExecutionOutput { result, entries }))
    }
}

/// Turns captured stdout/stderr into ordered, severity-tagged entries.
fn collect_entries(stdout: &str, stderr: &str) -> Vec<LogEntry> {
    let mut entries = Vec::new();
    for line in stdout.lines() {
        entries.push(LogEntry::info(line));
    }
    for line in stderr.lines() {
        entries.push(LogEntry::new(classify_stderr_line(line), line));
    }
    entries
}

/// Lines emitted by the `warnings` machinery carry a `...Warning:` marker;
/// everything else on stderr is an error (tracebacks, interpreter noise).
fn classify_stderr_line(line: &str) -> Severity {
    if line.contains("Warning:") {
        Severity::Warning
    } else {
        Severity::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stdout_lines_are_info() {
        let entries = collect_entries("1\n2\n", "");
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.severity == Severity::Info));
        assert_eq!(entries[0].text, "1");
    }

    #[test]
    fn stderr_lines_are_errors() {
        let entries = collect_entries("", "Traceback (most recent call last):\nNameError: x\n");
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.severity == Severity::Error));
    }

    #[test]
    fn warning_marker_downgrades_severity() {
        let entries = collect_entries("", "script.py:1: DeprecationWarning: old\n");
        assert_eq!(entries[0].severity, Severity::Warning);
    }

    #[test]
    fn stdout_precedes_stderr_in_order() {
        let entries = collect_entries("out\n", "err\n");
        assert_eq!(entries[0].text, "out");
        assert_eq!(entries[1].text, "err");
    }

    #[test]
    fn run_print_yields_one_info_line() {
        // Exercises the real subprocess path; skipped when no interpreter
        // is installed.
        let Some(host) = PythonHost::detect() else {
            return;
        };
        let out = host
            .execute("print(1)", ExecutionMode::File)
            .expect("spawn ok")
            .expect("some output");
        assert_eq!(out.entries.len(), 1);
        assert_eq!(out.entries[0].severity, Severity::Info);
        assert_eq!(out.entries[0].text, "1");
    }

    #[test]
    fn run_with_no_output_yields_none() {
        let Some(host) = PythonHost::detect() else {
            return;
        };
        let out = host
            .execute("x = 1", ExecutionMode::File)
            .expect("spawn ok");
        assert!(out.is_none());
    }

    #[test]
    fn runtime_error_surfaces_as_error_entries() {
        let Some(host) = PythonHost::detect() else {
            return;
        };
        let out = host
            .execute("raise ValueError('boom')", ExecutionMode::File)
            .expect("spawn ok")
            .expect("some output");
        assert!(out
            .entries
            .iter()
            .any(|e| e.severity == Severity::Error && e.text.contains("ValueError")));
    }
}
