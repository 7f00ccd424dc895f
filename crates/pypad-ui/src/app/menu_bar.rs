//! Menu bar: File, Run, and View menus.

use eframe::egui;

use super::{App, ThemeMode};

impl App {
    pub(crate) fn show_menu_bar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("New Tab              Ctrl+T").clicked() {
                    self.panel.add_tab();
                    ui.close();
                }
                if ui.button("Open Script...       Ctrl+O").clicked() {
                    self.open_script_dialog();
                    ui.close();
                }
                if ui.button("Save Script As...    Ctrl+S").clicked() {
                    self.save_script_dialog();
                    ui.close();
                }
                ui.separator();
                if ui.button("Close Tab            Ctrl+W").clicked() {
                    self.panel.close_tab(self.panel.active);
                    ui.close();
                }
                ui.separator();
                if ui.button("Exit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    ui.close();
                }
            });

            ui.menu_button("Run", |ui| {
                if ui.button("Run All           Ctrl+Enter").clicked() {
                    self.run_all();
                    ui.close();
                }
                let has_selection = self.panel.active_tab().selected_text().is_some();
                if ui
                    .add_enabled(
                        has_selection,
                        egui::Button::new("Run Selection  Ctrl+Shift+Enter"),
                    )
                    .clicked()
                {
                    self.run_selection();
                    ui.close();
                }
                ui.separator();
                if ui.button("Clear Log").clicked() {
                    self.clear_log();
                    ui.close();
                }
                if ui.button("Clear Script").clicked() {
                    self.clear_script();
                    ui.close();
                }
                if ui.button("Clear Both").clicked() {
                    self.clear_all();
                    ui.close();
                }
            });

            ui.menu_button("View", |ui| {
                ui.checkbox(&mut self.show_line_numbers, "Line Numbers");
                ui.checkbox(&mut self.restore_tabs, "Restore Tabs on Start");
                ui.separator();
                for mode in ["System", "Dark", "Light"] {
                    let selected = self.theme_mode.0 == mode;
                    if ui.radio(selected, mode).clicked() {
                        self.set_theme_mode(ThemeMode(mode.to_string()), ctx);
                        ui.close();
                    }
                }
            });
        });
    }
}
