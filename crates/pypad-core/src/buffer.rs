/// Script text storage backed by `ropey::Rope`.
use std::fmt;

use anyhow::Result;
use ropey::Rope;

/// A text buffer holding the contents of one script tab.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    rope: Rope,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rope)
    }
}

impl TextBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Total number of characters.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Number of lines. An empty buffer still has one (empty) line.
    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Returns one line including its trailing newline, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the line index is out of bounds.
    pub fn line(&self, line_idx: usize) -> Result<ropey::RopeSlice<'_>> {
        if line_idx >= self.rope.len_lines() {
            anyhow::bail!(
                "line index {} out of bounds (buffer has {} lines)",
                line_idx,
                self.rope.len_lines()
            );
        }
        Ok(self.rope.line(line_idx))
    }

    /// Char index of the start of a line.
    ///
    /// # Errors
    ///
    /// Returns an error if the line index is out of bounds.
    pub fn line_to_char(&self, line_idx: usize) -> Result<usize> {
        if line_idx >= self.rope.len_lines() {
            anyhow::bail!(
                "line index {} out of bounds (buffer has {} lines)",
                line_idx,
                self.rope.len_lines()
            );
        }
        Ok(self.rope.line_to_char(line_idx))
    }

    /// Line index containing the given char index.
    ///
    /// # Errors
    ///
    /// Returns an error if the char index is out of bounds.
    pub fn char_to_line(&self, char_idx: usize) -> Result<usize> {
        if char_idx > self.rope.len_chars() {
            anyhow::bail!(
                "char index {} out of bounds (buffer has {} chars)",
                char_idx,
                self.rope.len_chars()
            );
        }
        Ok(self.rope.char_to_line(char_idx))
    }

    /// Length of a line in chars, excluding the trailing `\n` / `\r\n`.
    ///
    /// # Errors
    ///
    /// Returns an error if the line index is out of bounds.
    pub fn line_len_chars(&self, line_idx: usize) -> Result<usize> {
        let line = self.line(line_idx)?;
        let len = line.len_chars();
        if len > 0 && line.char(len - 1) == '\n' {
            if len > 1 && line.char(len - 2) == '\r' {
                return Ok(len - 2);
            }
            return Ok(len - 1);
        }
        Ok(len)
    }

    /// Inserts text at a char index.
    ///
    /// # Errors
    ///
    /// Returns an error if the char index is out of bounds.
    pub fn insert(&mut self, char_idx: usize, text: &str) -> Result<()> {
        if char_idx > self.rope.len_chars() {
            anyhow::bail!(
                "insert position {} out of bounds (buffer has {} chars)",
                char_idx,
                self.rope.len_chars()
            );
        }
        self.rope.insert(char_idx, text);
        Ok(())
    }

    /// Removes the char range `[start..end)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is invalid or out of bounds.
    pub fn remove(&mut self, start: usize, end: usize) -> Result<()> {
        if start > end {
            anyhow::bail!("invalid range: start ({}) > end ({})", start, end);
        }
        if end > self.rope.len_chars() {
            anyhow::bail!(
                "range end {} out of bounds (buffer has {} chars)",
                end,
                self.rope.len_chars()
            );
        }
        self.rope.remove(start..end);
        Ok(())
    }

    /// Returns the text in the char range `[start..end)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is invalid or out of bounds.
    pub fn slice(&self, start: usize, end: usize) -> Result<ropey::RopeSlice<'_>> {
        if start > end {
            anyhow::bail!("invalid range: start ({}) > end ({})", start, end);
        }
        if end > self.rope.len_chars() {
            anyhow::bail!(
                "range end {} out of bounds (buffer has {} chars)",
                end,
                self.rope.len_chars()
            );
        }
        Ok(self.rope.slice(start..end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_empty() {
        let buf = TextBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.len_lines(), 1);
    }

    #[test]
    fn from_str_counts_lines() {
        let buf = TextBuffer::from("print(1)\nprint(2)");
        assert_eq!(buf.len_lines(), 2);
        assert_eq!(buf.to_string(), "print(1)\nprint(2)");
    }

    #[test]
    fn insert_and_remove() {
        let mut buf = TextBuffer::new();
        buf.insert(0, "abc").unwrap();
        buf.insert(3, "def").unwrap();
        assert_eq!(buf.to_string(), "abcdef");
        buf.remove(1, 4).unwrap();
        assert_eq!(buf.to_string(), "aef");
    }

    #[test]
    fn line_len_excludes_newline() {
        let buf = TextBuffer::from("hello\nworld\r\n!");
        assert_eq!(buf.line_len_chars(0).unwrap(), 5);
        assert_eq!(buf.line_len_chars(1).unwrap(), 5);
        assert_eq!(buf.line_len_chars(2).unwrap(), 1);
    }

    #[test]
    fn slice_selected_text() {
        let buf = TextBuffer::from("x = 1\ny = 2");
        assert_eq!(buf.slice(4, 5).unwrap().to_string(), "1");
    }

    #[test]
    fn out_of_bounds_is_error() {
        let mut buf = TextBuffer::from("ok");
        assert!(buf.line(2).is_err());
        assert!(buf.insert(10, "x").is_err());
        assert!(buf.remove(0, 10).is_err());
        assert!(buf.slice(1, 0).is_err());
    }
}
