//! Global keyboard shortcuts and clipboard operations.

use eframe::egui;

use super::App;

impl App {
    /// Handles application-level shortcuts. The editor widget consumes its
    /// own movement/editing keys; everything here is Ctrl-chorded.
    pub(crate) fn handle_global_shortcuts(&mut self, ctx: &egui::Context) {
        // With a focused widget egui turns Ctrl+C/V/X into semantic
        // Copy/Cut/Paste events rather than raw key events.
        let (ctrl, shift, keys, has_copy, has_cut, has_paste) = ctx.input(|i| {
            let ctrl = i.modifiers.ctrl || i.modifiers.command;
            let shift = i.modifiers.shift;
            let mut has_copy = false;
            let mut has_cut = false;
            let mut has_paste = false;
            let keys: Vec<egui::Key> = i
                .events
                .iter()
                .filter_map(|e| match e {
                    egui::Event::Key {
                        key, pressed: true, ..
                    } => Some(*key),
                    egui::Event::Copy => {
                        has_copy = true;
                        None
                    }
                    egui::Event::Cut => {
                        has_cut = true;
                        None
                    }
                    egui::Event::Paste(_) => {
                        has_paste = true;
                        None
                    }
                    _ => None,
                })
                .collect();
            (ctrl, shift, keys, has_copy, has_cut, has_paste)
        });

        if has_copy {
            self.copy();
        }
        if has_cut {
            self.cut();
        }
        if has_paste {
            self.paste();
        }

        if !ctrl {
            return;
        }
        for key in keys {
            match key {
                egui::Key::Enter if shift => self.run_selection(),
                egui::Key::Enter => self.run_all(),
                egui::Key::S => self.save_script_dialog(),
                egui::Key::O => self.open_script_dialog(),
                egui::Key::T => self.panel.add_tab(),
                egui::Key::W => {
                    self.panel.close_tab(self.panel.active);
                }
                _ => {}
            }
        }
    }

    /// Copies the selected text to the system clipboard.
    pub(crate) fn copy(&mut self) {
        if let Some(text) = self.panel.active_tab().selected_text() {
            if let Some(ref mut clipboard) = self.clipboard {
                let _ = clipboard.set_text(text);
            }
        }
    }

    /// Cuts the selected text: copy, then delete the selection.
    pub(crate) fn cut(&mut self) {
        if self.panel.active_tab().selected_text().is_none() {
            return;
        }
        self.copy();
        // With a selection present this deletes exactly the selection.
        self.panel.active_tab_mut().delete_backward();
    }

    /// Pastes clipboard text at the caret.
    pub(crate) fn paste(&mut self) {
        if let Some(ref mut clipboard) = self.clipboard {
            if let Ok(text) = clipboard.get_text() {
                let normalized = text.replace("\r\n", "\n");
                self.panel.active_tab_mut().insert_text(&normalized);
            }
        }
    }
}
