//! Append-only execution log panel.
//!
//! Lines are tagged with a severity that picks their color; the view sticks
//! to the bottom as new lines arrive. Growth is unbounded: there is no cap
//! or eviction.

use egui::RichText;
use pypad_core::log::{LogEntry, Severity};

use crate::editor::EditorTheme;

#[derive(Debug, Default)]
pub struct OutputPanel {
    lines: Vec<LogEntry>,
}

impl OutputPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one line with the given severity.
    pub fn log(&mut self, text: impl Into<String>, severity: Severity) {
        self.lines.push(LogEntry::new(severity, text));
    }

    /// Appends an already-tagged entry.
    pub fn push(&mut self, entry: LogEntry) {
        self.lines.push(entry);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[LogEntry] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Renders the log with autoscroll.
    pub fn show(&self, ui: &mut egui::Ui, theme: &EditorTheme) {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                ui.spacing_mut().item_spacing.y = 2.0;
                for entry in &self.lines {
                    ui.label(
                        RichText::new(&entry.text)
                            .monospace()
                            .size(theme.font_size * 0.9)
                            .color(theme.severity_color(entry.severity)),
                    );
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_appends_in_order() {
        let mut panel = OutputPanel::new();
        panel.log("first", Severity::Info);
        panel.log("second", Severity::Error);
        let texts: Vec<&str> = panel.lines().iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn clear_empties_the_panel() {
        let mut panel = OutputPanel::new();
        panel.log("x", Severity::Regular);
        panel.clear();
        assert!(panel.is_empty());
    }

    #[test]
    fn push_keeps_entry_severity() {
        let mut panel = OutputPanel::new();
        panel.push(LogEntry::warning("careful"));
        assert_eq!(panel.lines()[0].severity, Severity::Warning);
    }
}
