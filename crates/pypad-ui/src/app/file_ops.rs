//! Script file open/save through native dialogs.
//!
//! A cancelled dialog is a no-op. Files are read and written whole as UTF-8.

use std::path::{Path, PathBuf};

use pypad_core::log::Severity;

use super::App;

impl App {
    /// Opens a `*.py` file into a new tab labeled with the file name.
    pub(crate) fn open_script_dialog(&mut self) {
        let mut dialog = rfd::FileDialog::new()
            .set_title("Open Script")
            .add_filter("Python", &["py"])
            .add_filter("JSON", &["json"]);
        if let Some(dir) = self.dialog_directory() {
            dialog = dialog.set_directory(dir);
        }
        let Some(path) = dialog.pick_file() else {
            return;
        };
        self.remember_folder(&path);
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                self.panel.open_tab(super::tab_label_for(&path), &content);
            }
            Err(e) => {
                tracing::error!("Failed to open '{}': {e}", path.display());
                self.output.log(
                    format!("Failed to open {}: {e}", path.display()),
                    Severity::Error,
                );
            }
        }
    }

    /// Saves the active tab's full text to a chosen path.
    pub(crate) fn save_script_dialog(&mut self) {
        let mut dialog = rfd::FileDialog::new()
            .set_title("Save Script As...")
            .add_filter("Python", &["py"])
            .set_file_name(&self.panel.active_tab().label);
        if let Some(dir) = self.dialog_directory() {
            dialog = dialog.set_directory(dir);
        }
        let Some(path) = dialog.save_file() else {
            return;
        };
        self.remember_folder(&path);
        let text = self.panel.active_tab().text();
        match std::fs::write(&path, text) {
            Ok(()) => {
                self.panel.active_tab_mut().label = super::tab_label_for(&path);
            }
            Err(e) => {
                tracing::error!("Failed to save '{}': {e}", path.display());
                self.output.log(
                    format!("Failed to save {}: {e}", path.display()),
                    Severity::Error,
                );
            }
        }
    }

    /// Starting directory for dialogs: the remembered folder while it still
    /// exists, otherwise the home directory.
    fn dialog_directory(&self) -> Option<PathBuf> {
        if let Some(ref folder) = self.last_used_folder {
            if folder.is_dir() {
                return Some(folder.clone());
            }
        }
        dirs::home_dir()
    }

    fn remember_folder(&mut self, file_path: &Path) {
        if let Some(parent) = file_path.parent() {
            self.last_used_folder = Some(parent.to_path_buf());
        }
    }
}
