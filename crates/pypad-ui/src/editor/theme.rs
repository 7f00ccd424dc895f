//! Editor theme: colors for the script area, gutter, and output log.

use egui::Color32;
use pypad_core::log::Severity;

/// Visual configuration for the editor widget and the output panel.
#[derive(Debug, Clone)]
pub struct EditorTheme {
    pub font_size: f32,
    pub bg_color: Color32,
    pub text_color: Color32,
    pub caret_color: Color32,
    pub selection_color: Color32,
    pub line_number_color: Color32,
    pub line_number_bg: Color32,
    pub gutter_separator_color: Color32,
    pub current_line_highlight: Color32,
    pub output_bg: Color32,
    pub info_color: Color32,
    pub warning_color: Color32,
    pub error_color: Color32,
    pub regular_color: Color32,
}

impl Default for EditorTheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl EditorTheme {
    /// Dark theme preset.
    pub fn dark() -> Self {
        Self {
            font_size: 14.0,
            bg_color: Color32::from_rgb(30, 30, 30),
            text_color: Color32::from_rgb(212, 212, 212),
            caret_color: Color32::from_rgb(255, 255, 255),
            selection_color: Color32::from_rgba_premultiplied(50, 100, 200, 100),
            line_number_color: Color32::from_rgb(118, 150, 185),
            line_number_bg: Color32::from_rgb(37, 37, 37),
            gutter_separator_color: Color32::from_rgb(60, 60, 60),
            current_line_highlight: Color32::from_rgb(45, 45, 45),
            output_bg: Color32::from_rgb(24, 24, 24),
            info_color: Color32::from_rgb(104, 151, 187),
            warning_color: Color32::from_rgb(222, 200, 80),
            error_color: Color32::from_rgb(235, 90, 90),
            regular_color: Color32::from_rgb(200, 200, 200),
        }
    }

    /// Light theme preset.
    pub fn light() -> Self {
        Self {
            font_size: 14.0,
            bg_color: Color32::from_rgb(255, 255, 255),
            text_color: Color32::from_rgb(30, 30, 30),
            caret_color: Color32::from_rgb(0, 0, 0),
            selection_color: Color32::from_rgba_premultiplied(100, 150, 230, 100),
            line_number_color: Color32::from_rgb(90, 115, 150),
            line_number_bg: Color32::from_rgb(240, 240, 240),
            gutter_separator_color: Color32::from_rgb(200, 200, 200),
            current_line_highlight: Color32::from_rgb(232, 242, 254),
            output_bg: Color32::from_rgb(246, 246, 246),
            info_color: Color32::from_rgb(50, 100, 160),
            warning_color: Color32::from_rgb(160, 130, 20),
            error_color: Color32::from_rgb(190, 40, 40),
            regular_color: Color32::from_rgb(70, 70, 70),
        }
    }

    /// Display color for one output severity.
    pub fn severity_color(&self, severity: Severity) -> Color32 {
        match severity {
            Severity::Info => self.info_color,
            Severity::Warning => self.warning_color,
            Severity::Error => self.error_color,
            Severity::Regular => self.regular_color,
        }
    }
}
