//! Tab strip: one button per script tab, a close button on the active tab,
//! and a trailing "+" that adds a tab.

use eframe::egui;
use egui::{Color32, RichText, Stroke, Visuals};

use super::App;

impl App {
    pub(crate) fn show_tab_bar(&mut self, ui: &mut egui::Ui) {
        let visuals = ui.visuals().clone();

        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;
            let mut tab_to_close: Option<usize> = None;

            for idx in 0..self.panel.tab_count() {
                self.render_tab_button(ui, idx, &visuals, &mut tab_to_close);
            }

            self.render_add_tab_button(ui, &visuals);

            if let Some(idx) = tab_to_close {
                self.panel.close_tab(idx);
            }
        });
    }

    fn render_tab_button(
        &mut self,
        ui: &mut egui::Ui,
        idx: usize,
        visuals: &Visuals,
        tab_to_close: &mut Option<usize>,
    ) {
        let is_active = idx == self.panel.active;
        let padded_title = format!("  {}  ", self.panel.tabs[idx].label);

        let text = if is_active {
            RichText::new(&padded_title).color(if visuals.dark_mode {
                Color32::from_rgb(220, 220, 220)
            } else {
                Color32::from_rgb(30, 30, 30)
            })
        } else {
            RichText::new(&padded_title).color(visuals.widgets.noninteractive.fg_stroke.color)
        };

        let fill = if is_active {
            visuals.widgets.active.bg_fill
        } else {
            visuals.faint_bg_color
        };

        let button = egui::Button::new(text)
            .fill(fill)
            .corner_radius(egui::CornerRadius {
                nw: 4,
                ne: 4,
                sw: 0,
                se: 0,
            })
            .stroke(Stroke::NONE)
            .min_size(egui::Vec2::new(0.0, 28.0));

        let response = ui.add(button);

        // Accent line marking the active tab
        if is_active {
            let tab_rect = response.rect;
            ui.painter().line_segment(
                [
                    egui::Pos2::new(tab_rect.min.x, tab_rect.min.y),
                    egui::Pos2::new(tab_rect.max.x, tab_rect.min.y),
                ],
                Stroke::new(2.0, self.theme.info_color),
            );
        }

        if response.clicked() {
            self.panel.switch_to(idx);
        }

        if is_active {
            let close_text = RichText::new("\u{00D7}")
                .color(visuals.widgets.noninteractive.fg_stroke.color)
                .size(14.0);
            let close_btn = egui::Button::new(close_text)
                .fill(Color32::TRANSPARENT)
                .stroke(Stroke::NONE);
            let close_response = ui.add(close_btn);
            if close_response.clicked() {
                *tab_to_close = Some(idx);
            }
            if close_response.hovered() {
                ui.painter()
                    .rect_filled(close_response.rect, 2.0, visuals.widgets.hovered.bg_fill);
            }
        }

        // 1px separator between tabs
        if idx < self.panel.tab_count() - 1 {
            let tab_rect = response.rect;
            ui.painter().line_segment(
                [
                    egui::Pos2::new(tab_rect.max.x, tab_rect.min.y + 4.0),
                    egui::Pos2::new(tab_rect.max.x, tab_rect.max.y - 4.0),
                ],
                Stroke::new(1.0, visuals.widgets.noninteractive.bg_stroke.color),
            );
        }
    }

    fn render_add_tab_button(&mut self, ui: &mut egui::Ui, visuals: &Visuals) {
        ui.spacing_mut().item_spacing.x = 4.0;
        let new_btn = egui::Button::new(
            RichText::new("+")
                .color(visuals.widgets.noninteractive.fg_stroke.color)
                .size(16.0),
        )
        .fill(Color32::TRANSPARENT)
        .stroke(Stroke::NONE);
        if ui.add(new_btn).clicked() {
            self.panel.add_tab();
        }
    }
}
