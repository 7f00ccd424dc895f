/// Caret and selection model for a script tab.
use anyhow::{Context, Result};

use crate::buffer::TextBuffer;

/// A line/column position in the text, both 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    /// Char offset within the line.
    pub col: usize,
}

impl Position {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.line.cmp(&other.line).then(self.col.cmp(&other.col))
    }
}

/// The caret state of one tab: position plus an optional selection anchor.
///
/// When the anchor is set, the selection spans anchor..position in either
/// direction.
#[derive(Debug, Clone, Default)]
pub struct Cursor {
    pub position: Position,
    pub selection_anchor: Option<Position>,
    /// Preferred column when moving vertically through short lines.
    desired_col: Option<usize>,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ordered selection range as char offsets, or `None` when nothing is
    /// selected.
    pub fn selection_char_range(&self, buffer: &TextBuffer) -> Result<Option<(usize, usize)>> {
        match self.selection_anchor {
            Some(anchor) => {
                let a = pos_to_char(buffer, anchor)?;
                let b = pos_to_char(buffer, self.position)?;
                Ok(Some((a.min(b), a.max(b))))
            }
            None => Ok(None),
        }
    }

    /// Char index of the caret.
    pub fn to_char_index(&self, buffer: &TextBuffer) -> Result<usize> {
        pos_to_char(buffer, self.position)
    }

    /// Anchors a selection at the current position if none is active.
    pub fn start_selection(&mut self) {
        if self.selection_anchor.is_none() {
            self.selection_anchor = Some(self.position);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection_anchor = None;
    }

    /// Moves to an absolute position, clamped to the buffer.
    pub fn move_to(&mut self, pos: Position, buffer: &TextBuffer) {
        self.position = clamp_position(pos, buffer);
        self.desired_col = None;
    }

    pub fn move_right(&mut self, buffer: &TextBuffer) {
        let line_len = buffer.line_len_chars(self.position.line).unwrap_or(0);
        if self.position.col < line_len {
            self.position.col += 1;
        } else if self.position.line + 1 < buffer.len_lines() {
            self.position.line += 1;
            self.position.col = 0;
        }
        self.desired_col = None;
    }

    pub fn move_left(&mut self, buffer: &TextBuffer) {
        if self.position.col > 0 {
            self.position.col -= 1;
        } else if self.position.line > 0 {
            self.position.line -= 1;
            self.position.col = buffer.line_len_chars(self.position.line).unwrap_or(0);
        }
        self.desired_col = None;
    }

    pub fn move_up(&mut self, buffer: &TextBuffer) {
        if self.position.line == 0 {
            return;
        }
        let desired = self.desired_col.unwrap_or(self.position.col);
        self.position.line -= 1;
        let line_len = buffer.line_len_chars(self.position.line).unwrap_or(0);
        self.position.col = desired.min(line_len);
        self.desired_col = Some(desired);
    }

    pub fn move_down(&mut self, buffer: &TextBuffer) {
        if self.position.line + 1 >= buffer.len_lines() {
            return;
        }
        let desired = self.desired_col.unwrap_or(self.position.col);
        self.position.line += 1;
        let line_len = buffer.line_len_chars(self.position.line).unwrap_or(0);
        self.position.col = desired.min(line_len);
        self.desired_col = Some(desired);
    }

    pub fn move_to_line_start(&mut self) {
        self.position.col = 0;
        self.desired_col = None;
    }

    pub fn move_to_line_end(&mut self, buffer: &TextBuffer) {
        self.position.col = buffer.line_len_chars(self.position.line).unwrap_or(0);
        self.desired_col = None;
    }
}

/// Converts a position to a char index, clamping to buffer bounds.
pub fn pos_to_char(buffer: &TextBuffer, pos: Position) -> Result<usize> {
    let clamped = clamp_position(pos, buffer);
    let line_start = buffer
        .line_to_char(clamped.line)
        .context("converting position to char index")?;
    Ok(line_start + clamped.col)
}

/// Converts a char index to a position.
pub fn char_to_pos(buffer: &TextBuffer, char_idx: usize) -> Position {
    let clamped = char_idx.min(buffer.len_chars());
    let line = buffer.char_to_line(clamped).unwrap_or(0);
    let line_start = buffer.line_to_char(line).unwrap_or(0);
    Position::new(line, clamped - line_start)
}

fn clamp_position(pos: Position, buffer: &TextBuffer) -> Position {
    if buffer.len_lines() == 0 {
        return Position::default();
    }
    let line = pos.line.min(buffer.len_lines() - 1);
    let line_len = buffer.line_len_chars(line).unwrap_or(0);
    Position::new(line, pos.col.min(line_len))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buf() -> TextBuffer {
        TextBuffer::from("import os\nprint(os.sep)\nx")
    }

    #[test]
    fn move_right_wraps_to_next_line() {
        let b = buf();
        let mut c = Cursor::new();
        c.move_to(Position::new(0, 9), &b);
        c.move_right(&b);
        assert_eq!(c.position, Position::new(1, 0));
    }

    #[test]
    fn move_left_wraps_to_previous_line_end() {
        let b = buf();
        let mut c = Cursor::new();
        c.move_to(Position::new(1, 0), &b);
        c.move_left(&b);
        assert_eq!(c.position, Position::new(0, 9));
    }

    #[test]
    fn vertical_motion_keeps_desired_column() {
        let b = buf();
        let mut c = Cursor::new();
        c.move_to(Position::new(1, 10), &b);
        c.move_down(&b); // line "x" has 1 char
        assert_eq!(c.position, Position::new(2, 1));
        c.move_up(&b);
        assert_eq!(c.position, Position::new(1, 10));
    }

    #[test]
    fn move_to_clamps_out_of_range() {
        let b = buf();
        let mut c = Cursor::new();
        c.move_to(Position::new(99, 99), &b);
        assert_eq!(c.position, Position::new(2, 1));
    }

    #[test]
    fn selection_range_is_ordered() {
        let b = buf();
        let mut c = Cursor::new();
        c.move_to(Position::new(1, 5), &b);
        c.start_selection();
        c.move_to(Position::new(0, 2), &b);
        let (start, end) = c.selection_char_range(&b).unwrap().unwrap();
        assert_eq!((start, end), (2, 15));
    }

    #[test]
    fn clear_selection_drops_anchor() {
        let b = buf();
        let mut c = Cursor::new();
        c.start_selection();
        c.move_to(Position::new(0, 3), &b);
        c.clear_selection();
        assert!(c.selection_char_range(&b).unwrap().is_none());
    }

    #[test]
    fn line_start_and_end() {
        let b = buf();
        let mut c = Cursor::new();
        c.move_to(Position::new(1, 4), &b);
        c.move_to_line_end(&b);
        assert_eq!(c.position.col, 13);
        c.move_to_line_start();
        assert_eq!(c.position.col, 0);
    }
}
