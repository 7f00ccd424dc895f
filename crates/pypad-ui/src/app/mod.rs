//! Top-level application tying together the tab panel, editor, output log,
//! menu bar, and the execution host.

mod exec;
mod file_ops;
mod menu_bar;
mod shortcuts;
mod tab_bar;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use eframe::egui;

use pypad_config::session::{self, TabRecord};
use pypad_config::AppConfig;
use pypad_core::highlight::RuleHighlighter;
use pypad_core::log::{LogEntry, Severity};
use pypad_core::panel::{ScriptPanel, TabSnapshot, DEFAULT_TAB_LABEL};
use pypad_host::{detect_host, ScriptHost};

use crate::editor::{EditorTheme, EditorWidget};
use crate::output::OutputPanel;

/// Arguments passed from the command line to the application.
#[derive(Debug, Clone, Default)]
pub struct StartupArgs {
    /// Script files to open as tabs on startup.
    pub files: Vec<PathBuf>,
}

/// Which color theme to use: "System", "Dark" or "Light".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeMode(pub String);

impl Default for ThemeMode {
    fn default() -> Self {
        Self::system()
    }
}

impl ThemeMode {
    pub fn system() -> Self {
        Self("System".to_string())
    }

    pub fn is_system(&self) -> bool {
        self.0 == "System"
    }

    /// Resolves "System" to a concrete theme using the OS preference.
    pub fn resolve(&self) -> &str {
        if self.is_system() {
            match dark_light::detect() {
                Ok(dark_light::Mode::Light) => "Light",
                _ => "Dark",
            }
        } else {
            &self.0
        }
    }
}

/// The main application state.
pub struct App {
    pub panel: ScriptPanel,
    pub output: OutputPanel,
    pub theme: EditorTheme,
    pub theme_mode: ThemeMode,
    pub show_line_numbers: bool,
    pub restore_tabs: bool,
    pub output_panel_height: f32,
    pub last_used_folder: Option<PathBuf>,
    pub(crate) python_highlighter: RuleHighlighter,
    pub(crate) json_highlighter: RuleHighlighter,
    pub(crate) host: Box<dyn ScriptHost>,
    clipboard: Option<arboard::Clipboard>,
    config_path: PathBuf,
    session_path: PathBuf,
    panic_reports: Arc<Mutex<Vec<LogEntry>>>,
}

impl App {
    /// Creates the application: loads config, restores the tab session,
    /// opens CLI files, and detects the execution host.
    pub fn new(cc: &eframe::CreationContext<'_>, args: StartupArgs) -> Self {
        let config_path = AppConfig::config_path();
        let config = AppConfig::load_or_create(&config_path);

        let theme_mode = ThemeMode(config.theme_mode.clone());
        let mut theme = match theme_mode.resolve() {
            "Light" => EditorTheme::light(),
            _ => EditorTheme::dark(),
        };
        theme.font_size = config.font_size;
        Self::apply_visuals(&cc.egui_ctx, theme_mode.resolve() != "Light");

        let session_path = session::session_path();
        let mut panel = if config.restore_tabs {
            let snapshots = session::load_tabs(&session_path)
                .map(records_to_snapshots)
                .unwrap_or_default();
            ScriptPanel::from_snapshots(snapshots)
        } else {
            ScriptPanel::new()
        };

        let mut opened_any = false;
        for path in &args.files {
            match std::fs::read_to_string(path) {
                Ok(content) => {
                    panel.open_tab(tab_label_for(path), &content);
                    opened_any = true;
                }
                Err(e) => {
                    tracing::warn!("Failed to open '{}': {e}", path.display());
                }
            }
        }
        // Drop the pristine initial tab when CLI files took its place.
        if opened_any
            && panel.tab_count() > 1
            && panel.tabs[0].label == DEFAULT_TAB_LABEL
            && panel.tabs[0].buffer.is_empty()
        {
            panel.tabs.remove(0);
            panel.active = panel.active.saturating_sub(1);
        }

        let host = detect_host();
        let panic_reports = Arc::new(Mutex::new(Vec::new()));
        exec::install_panic_hook(&panic_reports);

        let mut output = OutputPanel::new();
        output.log(format!("# host: {}", host.name()), Severity::Regular);

        Self {
            panel,
            output,
            theme,
            theme_mode,
            show_line_numbers: config.show_line_numbers,
            restore_tabs: config.restore_tabs,
            output_panel_height: config.output_panel_height,
            last_used_folder: if config.last_used_folder.is_empty() {
                None
            } else {
                Some(PathBuf::from(config.last_used_folder))
            },
            python_highlighter: RuleHighlighter::python(),
            json_highlighter: RuleHighlighter::json(),
            host,
            clipboard: arboard::Clipboard::new().ok(),
            config_path,
            session_path,
            panic_reports,
        }
    }

    /// Switches theme mode and reapplies colors.
    pub fn set_theme_mode(&mut self, mode: ThemeMode, ctx: &egui::Context) {
        self.theme_mode = mode;
        let font_size = self.theme.font_size;
        self.theme = match self.theme_mode.resolve() {
            "Light" => EditorTheme::light(),
            _ => EditorTheme::dark(),
        };
        self.theme.font_size = font_size;
        Self::apply_visuals(ctx, self.theme_mode.resolve() != "Light");
    }

    fn apply_visuals(ctx: &egui::Context, dark_mode: bool) {
        let visuals = if dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        ctx.set_visuals(visuals);
        ctx.style_mut(|style| {
            style.spacing.item_spacing = egui::Vec2::new(8.0, 6.0);
            style.spacing.button_padding = egui::Vec2::new(8.0, 4.0);
        });
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_panic_reports();
        self.handle_global_shortcuts(ctx);

        let panel_fill = ctx.style().visuals.panel_fill;
        let faint_bg = ctx.style().visuals.faint_bg_color;

        egui::TopBottomPanel::top("menu_bar")
            .frame(
                egui::Frame::new()
                    .fill(panel_fill)
                    .inner_margin(egui::Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                self.show_menu_bar(ui, ctx);
            });

        egui::TopBottomPanel::top("tab_bar")
            .frame(
                egui::Frame::new()
                    .fill(faint_bg)
                    .inner_margin(egui::Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                self.show_tab_bar(ui);
            });

        // Output log below the editor, resizable by dragging the divider.
        let output_response = egui::TopBottomPanel::bottom("output_panel")
            .resizable(true)
            .default_height(self.output_panel_height)
            .min_height(60.0)
            .frame(
                egui::Frame::new()
                    .fill(self.theme.output_bg)
                    .inner_margin(egui::Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                self.output.show(ui, &self.theme);
            });
        self.output_panel_height = output_response.response.rect.height();

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(self.theme.bg_color))
            .show(ctx, |ui| {
                let Self {
                    panel,
                    theme,
                    python_highlighter,
                    json_highlighter,
                    show_line_numbers,
                    ..
                } = self;
                let tab = panel.active_tab_mut();
                // JSON-labeled tabs get the JSON rule table.
                let highlighter = if is_json_label(&tab.label) {
                    &*json_highlighter
                } else {
                    &*python_highlighter
                };
                let mut editor = EditorWidget::new(tab, theme, Some(highlighter));
                editor.show_line_numbers = *show_line_numbers;
                editor.show(ui);
            });
    }

    fn ui(&mut self, _ui: &mut egui::Ui, _frame: &mut eframe::Frame) {}

    fn on_exit(&mut self) {
        // Persist the tab set wholesale.
        let records = snapshots_to_records(self.panel.snapshot());
        if let Err(e) = session::save_tabs(&self.session_path, &records) {
            tracing::warn!("Failed to save tab session: {e:#}");
        }

        let config = AppConfig {
            theme_mode: self.theme_mode.0.clone(),
            font_size: self.theme.font_size,
            show_line_numbers: self.show_line_numbers,
            restore_tabs: self.restore_tabs,
            last_used_folder: self
                .last_used_folder
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default(),
            output_panel_height: self.output_panel_height,
        };
        if let Err(e) = config.save(&self.config_path) {
            tracing::warn!("Failed to save config on exit: {e}");
        }
    }
}

/// True when a tab label names a JSON buffer.
fn is_json_label(label: &str) -> bool {
    label.to_ascii_lowercase().ends_with(".json")
}

/// Tab label for a file opened from disk: its file name.
fn tab_label_for(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_TAB_LABEL.to_string())
}

fn records_to_snapshots(records: Vec<TabRecord>) -> Vec<TabSnapshot> {
    records
        .into_iter()
        .map(|r| TabSnapshot {
            label: r.label,
            command: r.command,
            active: r.active,
        })
        .collect()
}

fn snapshots_to_records(snapshots: Vec<TabSnapshot>) -> Vec<TabRecord> {
    snapshots
        .into_iter()
        .enumerate()
        .map(|(index, s)| TabRecord {
            index,
            label: s.label,
            active: s.active,
            command: s.command,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pypad_host::{ExecutionMode, ExecutionOutput, NoHost};

    /// Host stub returning a fixed output, for exercising the bridge glue
    /// without an interpreter.
    struct FixedHost(Option<ExecutionOutput>);

    impl ScriptHost for FixedHost {
        fn name(&self) -> &str {
            "fixed"
        }

        fn execute(
            &self,
            _command: &str,
            _mode: ExecutionMode,
        ) -> anyhow::Result<Option<ExecutionOutput>> {
            Ok(self.0.clone())
        }
    }

    /// Builds an App for unit tests; no rendering, no real host.
    fn test_app() -> App {
        App {
            panel: ScriptPanel::new(),
            output: OutputPanel::new(),
            theme: EditorTheme::default(),
            theme_mode: ThemeMode::default(),
            show_line_numbers: true,
            restore_tabs: true,
            output_panel_height: 180.0,
            last_used_folder: None,
            python_highlighter: RuleHighlighter::python(),
            json_highlighter: RuleHighlighter::json(),
            host: Box::new(NoHost),
            clipboard: None,
            config_path: PathBuf::from("pypad.json"),
            session_path: PathBuf::from("pypad-tabs.json"),
            panic_reports: Arc::new(Mutex::new(Vec::new())),
        }
    }

    #[test]
    fn run_all_with_info_entry_logs_one_info_line() {
        let mut app = test_app();
        app.host = Box::new(FixedHost(Some(ExecutionOutput {
            result: "exit code 0".to_string(),
            entries: vec![LogEntry::info("1")],
        })));
        app.panel.active_tab_mut().insert_text("print(1)");

        app.run_all();

        let info_lines: Vec<&LogEntry> = app
            .output
            .lines()
            .iter()
            .filter(|l| l.severity == Severity::Info)
            .collect();
        assert_eq!(info_lines.len(), 1);
        assert_eq!(info_lines[0].text, "1");
    }

    #[test]
    fn run_all_without_host_output_logs_nothing() {
        let mut app = test_app();
        app.panel.active_tab_mut().insert_text("x = 1");
        app.run_all();
        assert!(app.output.is_empty());
    }

    #[test]
    fn run_selection_sends_only_selected_text() {
        use pypad_core::cursor::Position;

        struct Recorder(Arc<Mutex<Vec<String>>>);
        impl ScriptHost for Recorder {
            fn name(&self) -> &str {
                "recorder"
            }
            fn execute(
                &self,
                command: &str,
                _mode: ExecutionMode,
            ) -> anyhow::Result<Option<ExecutionOutput>> {
                self.0.lock().unwrap().push(command.to_string());
                Ok(None)
            }
        }

        let sent = Arc::new(Mutex::new(Vec::new()));
        let mut app = test_app();
        app.host = Box::new(Recorder(Arc::clone(&sent)));
        app.panel.active_tab_mut().insert_text("abcdef");
        {
            let tab = app.panel.active_tab_mut();
            tab.cursor.move_to(Position::new(0, 1), &tab.buffer);
            tab.cursor.start_selection();
            tab.cursor.move_to(Position::new(0, 4), &tab.buffer);
        }

        app.run_selection();

        assert_eq!(*sent.lock().unwrap(), vec!["bcd".to_string()]);
    }

    #[test]
    fn run_selection_without_selection_is_noop() {
        let mut app = test_app();
        app.panel.active_tab_mut().insert_text("print(1)");
        app.run_selection();
        assert!(app.output.is_empty());
    }

    #[test]
    fn error_entries_are_forwarded_verbatim() {
        let mut app = test_app();
        app.host = Box::new(FixedHost(Some(ExecutionOutput {
            result: "exit code 1".to_string(),
            entries: vec![
                LogEntry::error("Traceback (most recent call last):"),
                LogEntry::error("NameError: name 'y' is not defined"),
            ],
        })));
        app.panel.active_tab_mut().insert_text("y");

        app.run_all();

        let errors: Vec<&str> = app
            .output
            .lines()
            .iter()
            .filter(|l| l.severity == Severity::Error)
            .map(|l| l.text.as_str())
            .collect();
        assert_eq!(
            errors,
            vec![
                "Traceback (most recent call last):",
                "NameError: name 'y' is not defined"
            ]
        );
    }

    #[test]
    fn clear_all_empties_log_and_script() {
        let mut app = test_app();
        app.panel.active_tab_mut().insert_text("x = 1");
        app.output.log("old", Severity::Regular);

        app.clear_all();

        assert!(app.output.is_empty());
        assert!(app.panel.active_tab().buffer.is_empty());
    }

    #[test]
    fn panic_reports_drain_into_output() {
        let mut app = test_app();
        app.panic_reports
            .lock()
            .unwrap()
            .push(LogEntry::error("Panic: boom (app.rs:1)"));

        app.drain_panic_reports();

        assert_eq!(app.output.lines().len(), 1);
        assert_eq!(app.output.lines()[0].severity, Severity::Error);
        assert!(app.output.lines()[0].text.contains("boom"));
    }

    #[test]
    fn record_snapshot_conversion_round_trip() {
        let snapshots = vec![
            TabSnapshot {
                label: "Python".into(),
                command: "a".into(),
                active: false,
            },
            TabSnapshot {
                label: "Python 2".into(),
                command: "b".into(),
                active: true,
            },
        ];
        let records = snapshots_to_records(snapshots.clone());
        assert_eq!(records[0].index, 0);
        assert_eq!(records[1].index, 1);
        assert_eq!(records_to_snapshots(records), snapshots);
    }

    #[test]
    fn tab_label_for_uses_file_name() {
        assert_eq!(tab_label_for(std::path::Path::new("/tmp/demo.py")), "demo.py");
    }

    #[test]
    fn json_labels_are_detected_case_insensitively() {
        assert!(is_json_label("config.json"));
        assert!(is_json_label("Data.JSON"));
        assert!(!is_json_label("script.py"));
        assert!(!is_json_label("Python"));
    }
}
