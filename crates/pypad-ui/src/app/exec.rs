//! Execution glue: sends script text to the host and renders the returned
//! entries, plus process-level panic reporting into the output panel.

use std::sync::{Arc, Mutex};

use pypad_core::log::{LogEntry, Severity};
use pypad_host::ExecutionMode;

use super::App;

impl App {
    /// Sends the active tab's full text to the host.
    pub(crate) fn run_all(&mut self) {
        let command = self.panel.active_tab().text();
        self.run_command(command);
    }

    /// Sends only the selected text of the active tab to the host.
    pub(crate) fn run_selection(&mut self) {
        if let Some(selected) = self.panel.active_tab().selected_text() {
            self.run_command(selected);
        }
    }

    fn run_command(&mut self, command: String) {
        if command.trim().is_empty() {
            return;
        }
        match self.host.execute(&command, ExecutionMode::File) {
            Ok(Some(output)) => {
                self.output.log("# Command executed:", Severity::Regular);
                for line in command.lines() {
                    self.output.log(line, Severity::Regular);
                }
                for entry in output.entries {
                    self.output.push(entry);
                }
                self.output.log("# Command execution ended", Severity::Regular);
                tracing::debug!(result = %output.result, "command finished");
            }
            // The command produced no output at all.
            Ok(None) => {}
            Err(e) => {
                tracing::error!("Host execution failed: {e:#}");
                self.output
                    .log(format!("Failed to reach host: {e:#}"), Severity::Error);
            }
        }
    }

    pub(crate) fn clear_log(&mut self) {
        self.output.clear();
    }

    pub(crate) fn clear_script(&mut self) {
        self.panel.active_tab_mut().set_text("");
    }

    pub(crate) fn clear_all(&mut self) {
        self.clear_script();
        self.clear_log();
    }

    /// Moves captured panic reports into the output panel.
    pub(crate) fn drain_panic_reports(&mut self) {
        let drained: Vec<LogEntry> = match self.panic_reports.lock() {
            Ok(mut reports) => reports.drain(..).collect(),
            Err(_) => return,
        };
        for entry in drained {
            self.output.push(entry);
        }
    }
}

/// Routes panic messages into the given sink so they surface in the output
/// panel instead of disappearing with the process, then chains to the
/// previous hook.
pub(crate) fn install_panic_hook(sink: &Arc<Mutex<Vec<LogEntry>>>) {
    let sink = Arc::clone(sink);
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let message = if let Some(s) = info.payload().downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "opaque panic payload".to_string()
        };
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_else(|| "unknown location".to_string());
        let text = format!("Panic: {message} ({location})");
        tracing::error!("{text}");
        if let Ok(mut entries) = sink.lock() {
            entries.push(LogEntry::error(text));
        }
        previous(info);
    }));
}
