//! Custom-painted script editor widget: gutter with line numbers,
//! current-line highlight, selection, syntax coloring, and caret.

use egui::{
    text::LayoutJob, Color32, FontId, Pos2, Rect, Response, Sense, Stroke, TextFormat, Ui, Vec2,
};
use pypad_core::cursor::Position;
use pypad_core::gutter;
use pypad_core::highlight::RuleHighlighter;
use pypad_core::panel::ScriptTab;

use super::theme::EditorTheme;

/// Left padding inside the text area so glyphs don't touch the gutter edge.
const TEXT_LEFT_PADDING: f32 = 6.0;

/// The editor widget rendering one script tab.
pub struct EditorWidget<'a> {
    pub tab: &'a mut ScriptTab,
    pub theme: &'a EditorTheme,
    pub highlighter: Option<&'a RuleHighlighter>,
    pub show_line_numbers: bool,
    /// A read-only editor takes no input and draws no current-line highlight.
    pub read_only: bool,
}

impl<'a> EditorWidget<'a> {
    pub fn new(
        tab: &'a mut ScriptTab,
        theme: &'a EditorTheme,
        highlighter: Option<&'a RuleHighlighter>,
    ) -> Self {
        Self {
            tab,
            theme,
            highlighter,
            show_line_numbers: true,
            read_only: false,
        }
    }

    /// Shows the editor and returns its response.
    pub fn show(&mut self, ui: &mut Ui) -> Response {
        let available = ui.available_size();
        let (response, painter) = ui.allocate_painter(available, Sense::click_and_drag());
        let rect = response.rect;

        let font_id = FontId::monospace(self.theme.font_size);
        let line_height = self.theme.font_size * 1.4;
        let char_width = measure_char_width(ui, &font_id);

        let total_lines = self.tab.buffer.len_lines();
        let gutter_width = if self.show_line_numbers {
            gutter::gutter_width(total_lines, char_width)
        } else {
            0.0
        };

        let text_area = Rect::from_min_max(
            Pos2::new(rect.min.x + gutter_width + TEXT_LEFT_PADDING, rect.min.y),
            rect.max,
        );
        let gutter_rect = Rect::from_min_max(
            rect.min,
            Pos2::new(rect.min.x + gutter_width, rect.max.y),
        );

        painter.rect_filled(rect, 0.0, self.theme.bg_color);
        if self.show_line_numbers {
            painter.rect_filled(gutter_rect, 0.0, self.theme.line_number_bg);
            painter.line_segment(
                [
                    Pos2::new(gutter_rect.max.x, rect.min.y),
                    Pos2::new(gutter_rect.max.x, rect.max.y),
                ],
                Stroke::new(1.0, self.theme.gutter_separator_color),
            );
        }

        let visible_lines = (text_area.height() / line_height).ceil() as usize;
        let max_scroll_y = total_lines.saturating_sub(1) as f32;

        // Mouse-wheel scrolling
        if response.hovered() {
            let scroll_delta = ui.input(|i| i.smooth_scroll_delta);
            if scroll_delta.y != 0.0 {
                self.tab.scroll_y -= scroll_delta.y / line_height;
                self.tab.scroll_y = self.tab.scroll_y.clamp(0.0, max_scroll_y);
            }
        }

        let cursor_pos_before = self.tab.cursor.position;

        // Input is processed before rendering so the caret never lags a frame.
        if !self.read_only {
            if response.clicked() || response.drag_started() {
                if let Some(pos) = response.interact_pointer_pos() {
                    if text_area.contains(pos) || gutter_rect.contains(pos) {
                        let click_pos =
                            self.screen_to_position(pos, &text_area, line_height, char_width);
                        if response.drag_started() && ui.input(|i| i.modifiers.shift) {
                            self.tab.cursor.start_selection();
                        } else {
                            self.tab.cursor.clear_selection();
                        }
                        self.tab.cursor.move_to(click_pos, &self.tab.buffer);
                    }
                }
                response.request_focus();
            }

            if response.dragged() {
                if let Some(pos) = response.interact_pointer_pos() {
                    if pos.x >= text_area.min.x && pos.x <= text_area.max.x {
                        self.tab.cursor.start_selection();
                        let drag_pos =
                            self.screen_to_position(pos, &text_area, line_height, char_width);
                        self.tab.cursor.move_to(drag_pos, &self.tab.buffer);
                    }
                }
            }

            if !response.has_focus() && !response.lost_focus() {
                response.request_focus();
            }

            // Keep Tab and arrow keys out of egui's focus navigation; the
            // editor consumes them itself.
            if response.has_focus() {
                ui.memory_mut(|mem| {
                    mem.set_focus_lock_filter(
                        response.id,
                        egui::EventFilter {
                            tab: true,
                            horizontal_arrows: true,
                            vertical_arrows: true,
                            escape: false,
                        },
                    );
                });
                self.handle_keyboard_input(ui);
            }
        }

        if self.tab.cursor.position != cursor_pos_before {
            self.ensure_cursor_visible(visible_lines);
        }

        // Re-read the line count: input may have changed the buffer.
        let total_lines = self.tab.buffer.len_lines();
        let selection = self
            .tab
            .cursor
            .selection_char_range(&self.tab.buffer)
            .unwrap_or(None)
            .filter(|(s, e)| s != e);

        let visible = gutter::visible_line_range(
            self.tab.scroll_y,
            text_area.height(),
            line_height,
            total_lines,
        );
        let text_painter = painter.with_clip_rect(text_area);

        for line_idx in visible {
            let line_y =
                text_area.min.y + (line_idx as f32 - self.tab.scroll_y) * line_height;
            if line_y + line_height < text_area.min.y || line_y > text_area.max.y {
                continue;
            }

            // Caret line only, selection ignored; suppressed when read-only.
            if !self.read_only && line_idx == self.tab.cursor.position.line {
                let highlight_rect = Rect::from_min_size(
                    Pos2::new(text_area.min.x, line_y),
                    Vec2::new(text_area.width(), line_height),
                );
                text_painter.rect_filled(highlight_rect, 0.0, self.theme.current_line_highlight);
            }

            if let Some((sel_start, sel_end)) = selection {
                self.render_selection_on_line(
                    &text_painter,
                    &text_area,
                    line_idx,
                    line_y,
                    line_height,
                    char_width,
                    sel_start,
                    sel_end,
                );
            }

            if self.show_line_numbers {
                let number_color = if line_idx == self.tab.cursor.position.line {
                    self.theme.text_color
                } else {
                    self.theme.line_number_color
                };
                painter.text(
                    Pos2::new(gutter_rect.max.x - 6.0, line_y + line_height * 0.15),
                    egui::Align2::RIGHT_TOP,
                    format!("{}", line_idx + 1),
                    font_id.clone(),
                    number_color,
                );
            }

            let content = self
                .tab
                .buffer
                .line(line_idx)
                .map(line_content_string)
                .unwrap_or_default();
            let job = self.layout_line(&content, &font_id);
            let galley = ui.fonts_mut(|f| f.layout_job(job));
            text_painter.galley(
                Pos2::new(text_area.min.x, line_y + line_height * 0.15),
                galley,
                self.theme.text_color,
            );
        }

        if !self.read_only && response.has_focus() {
            self.render_caret(ui, &text_painter, &text_area, line_height, char_width);
            ui.ctx()
                .request_repaint_after(std::time::Duration::from_millis(500));
        }

        self.tab.scroll_y = self
            .tab
            .scroll_y
            .clamp(0.0, total_lines.saturating_sub(1) as f32);

        response
    }

    /// Builds a styled layout for one line, filling unmatched stretches with
    /// the default text color.
    fn layout_line(&self, content: &str, font_id: &FontId) -> LayoutJob {
        // Tabs render as a space; same byte length, so span offsets hold.
        let render_content = content.replace('\t', " ");
        let mut job = LayoutJob::default();
        let default_format = TextFormat {
            font_id: font_id.clone(),
            color: self.theme.text_color,
            ..Default::default()
        };

        let Some(highlighter) = self.highlighter else {
            job.append(&render_content, 0.0, default_format);
            return job;
        };

        let mut at = 0usize;
        for (range, style) in highlighter.style_runs(&render_content) {
            if range.start > at {
                job.append(&render_content[at..range.start], 0.0, default_format.clone());
            }
            let (r, g, b) = style.color;
            job.append(
                &render_content[range.clone()],
                0.0,
                TextFormat {
                    font_id: font_id.clone(),
                    color: Color32::from_rgb(r, g, b),
                    ..Default::default()
                },
            );
            at = range.end;
        }
        if at < render_content.len() {
            job.append(&render_content[at..], 0.0, default_format);
        }
        job
    }

    /// Paints the part of the selection that falls on one line.
    #[allow(clippy::too_many_arguments)]
    fn render_selection_on_line(
        &self,
        painter: &egui::Painter,
        text_area: &Rect,
        line_idx: usize,
        line_y: f32,
        line_height: f32,
        char_width: f32,
        sel_start: usize,
        sel_end: usize,
    ) {
        let line_start = self.tab.buffer.line_to_char(line_idx).unwrap_or(0);
        let line_len = self.tab.buffer.line_len_chars(line_idx).unwrap_or(0);
        let line_end = line_start + line_len;
        if sel_start > line_end || sel_end < line_start {
            return;
        }

        let col_start = sel_start.saturating_sub(line_start);
        // Selections running past the line end cover the newline too.
        let col_end = if sel_end > line_end {
            line_len + 1
        } else {
            sel_end - line_start
        };

        let x_start = text_area.min.x + col_start as f32 * char_width;
        let x_end = text_area.min.x + col_end as f32 * char_width;
        let sel_rect = Rect::from_min_max(
            Pos2::new(x_start.max(text_area.min.x), line_y),
            Pos2::new(x_end.min(text_area.max.x), line_y + line_height),
        );
        painter.rect_filled(sel_rect, 0.0, self.theme.selection_color);
    }

    /// Draws the caret with a blink cycle that pauses briefly after motion.
    fn render_caret(
        &self,
        ui: &Ui,
        painter: &egui::Painter,
        text_area: &Rect,
        line_height: f32,
        char_width: f32,
    ) {
        let time = ui.input(|i| i.time);
        if (time * 2.0) as u64 % 2 != 0 {
            return;
        }
        let pos = self.tab.cursor.position;
        let x = text_area.min.x + pos.col as f32 * char_width;
        let y = text_area.min.y + (pos.line as f32 - self.tab.scroll_y) * line_height;
        painter.line_segment(
            [Pos2::new(x, y + 2.0), Pos2::new(x, y + line_height - 2.0)],
            Stroke::new(1.5, self.theme.caret_color),
        );
    }

    /// Converts a screen position inside the text area to a text position.
    fn screen_to_position(
        &self,
        pos: Pos2,
        text_area: &Rect,
        line_height: f32,
        char_width: f32,
    ) -> Position {
        let rel_y = (pos.y - text_area.min.y) / line_height + self.tab.scroll_y;
        let line = rel_y.max(0.0) as usize;
        let rel_x = (pos.x - text_area.min.x) / char_width;
        let col = rel_x.max(0.0).round() as usize;
        Position::new(line, col)
    }

    /// Scrolls just enough to bring the caret line into view.
    fn ensure_cursor_visible(&mut self, visible_lines: usize) {
        let line = self.tab.cursor.position.line as f32;
        if line < self.tab.scroll_y {
            self.tab.scroll_y = line;
        } else {
            let last = self.tab.scroll_y + visible_lines.saturating_sub(1) as f32;
            if line > last {
                self.tab.scroll_y = line - visible_lines.saturating_sub(1) as f32;
            }
        }
    }
}

/// A line's content without its trailing newline.
fn line_content_string(slice: ropey::RopeSlice<'_>) -> String {
    let n = slice.len_chars();
    if n > 0 && slice.char(n - 1) == '\n' {
        slice.slice(..n - 1).to_string()
    } else {
        slice.to_string()
    }
}

/// Measures the advance width of one monospace glyph.
fn measure_char_width(ui: &Ui, font_id: &FontId) -> f32 {
    let mut job = LayoutJob::default();
    job.append(
        "M",
        0.0,
        TextFormat {
            font_id: font_id.clone(),
            ..Default::default()
        },
    );
    let galley = ui.fonts_mut(|f| f.layout_job(job));
    galley.rect.width()
}
