//! Keyboard input for the editor widget: text insertion, caret movement,
//! and basic editing keys. Clipboard and app-level shortcuts are handled by
//! the application, not here.

use egui::Ui;

use super::widget::EditorWidget;

/// Tab key inserts spaces, matching the script indentation convention.
const TAB_SPACES: &str = "    ";

impl<'a> EditorWidget<'a> {
    pub(crate) fn handle_keyboard_input(&mut self, ui: &mut Ui) {
        let events: Vec<egui::Event> = ui.input(|i| i.events.clone());
        for event in &events {
            match event {
                egui::Event::Text(text) => {
                    // Ctrl/Alt combos are shortcuts, not text.
                    if !ui.input(|i| i.modifiers.ctrl || i.modifiers.command || i.modifiers.alt) {
                        self.tab.insert_text(text);
                    }
                }
                egui::Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } => {
                    self.handle_key(*key, *modifiers);
                }
                _ => {}
            }
        }
    }

    fn handle_key(&mut self, key: egui::Key, modifiers: egui::Modifiers) {
        let shift = modifiers.shift;
        let ctrl = modifiers.ctrl || modifiers.command;

        let is_movement = matches!(
            key,
            egui::Key::ArrowLeft
                | egui::Key::ArrowRight
                | egui::Key::ArrowUp
                | egui::Key::ArrowDown
                | egui::Key::Home
                | egui::Key::End
        );

        if is_movement {
            if shift {
                self.tab.cursor.start_selection();
            } else {
                self.tab.cursor.clear_selection();
            }
        }

        match key {
            egui::Key::ArrowLeft => self.tab.cursor.move_left(&self.tab.buffer),
            egui::Key::ArrowRight => self.tab.cursor.move_right(&self.tab.buffer),
            egui::Key::ArrowUp => self.tab.cursor.move_up(&self.tab.buffer),
            egui::Key::ArrowDown => self.tab.cursor.move_down(&self.tab.buffer),
            egui::Key::Home => self.tab.cursor.move_to_line_start(),
            egui::Key::End => self.tab.cursor.move_to_line_end(&self.tab.buffer),
            egui::Key::Enter if !ctrl => self.tab.insert_text("\n"),
            egui::Key::Tab => self.tab.insert_text(TAB_SPACES),
            egui::Key::Backspace => self.tab.delete_backward(),
            egui::Key::Delete => self.tab.delete_forward(),
            _ => {}
        }
    }
}
