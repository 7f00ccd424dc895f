//! Tabbed script panel: a set of independent script buffers with exactly one
//! active at a time.
use crate::buffer::TextBuffer;
use crate::cursor::{char_to_pos, Cursor};

/// Label given to freshly created tabs and to the fallback tab installed
/// when no persisted state can be loaded.
pub const DEFAULT_TAB_LABEL: &str = "Python";

/// One script buffer with its own caret and scroll state.
#[derive(Debug, Default)]
pub struct ScriptTab {
    pub label: String,
    pub buffer: TextBuffer,
    pub cursor: Cursor,
    pub scroll_y: f32,
}

impl ScriptTab {
    /// Creates an empty tab with the default label.
    pub fn new() -> Self {
        Self {
            label: DEFAULT_TAB_LABEL.to_string(),
            ..Default::default()
        }
    }

    pub fn with_content(label: impl Into<String>, content: &str) -> Self {
        Self {
            label: label.into(),
            buffer: TextBuffer::from(content),
            ..Default::default()
        }
    }

    /// The tab's full text.
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    /// The selected text, or `None` when nothing is selected.
    pub fn selected_text(&self) -> Option<String> {
        let (start, end) = self.cursor.selection_char_range(&self.buffer).ok()??;
        if start == end {
            return None;
        }
        self.buffer.slice(start, end).ok().map(|s| s.to_string())
    }

    /// Inserts text at the caret, replacing any selection.
    pub fn insert_text(&mut self, text: &str) {
        self.delete_selection();
        let char_idx = self.cursor.to_char_index(&self.buffer).unwrap_or(0);
        if self.buffer.insert(char_idx, text).is_ok() {
            self.cursor.position = char_to_pos(&self.buffer, char_idx + text.chars().count());
            self.cursor.clear_selection();
        }
    }

    /// Deletes the selection, or the character before the caret.
    pub fn delete_backward(&mut self) {
        if self.delete_selection() {
            return;
        }
        let char_idx = self.cursor.to_char_index(&self.buffer).unwrap_or(0);
        if char_idx > 0 && self.buffer.remove(char_idx - 1, char_idx).is_ok() {
            self.cursor.position = char_to_pos(&self.buffer, char_idx - 1);
        }
    }

    /// Deletes the selection, or the character after the caret.
    pub fn delete_forward(&mut self) {
        if self.delete_selection() {
            return;
        }
        let char_idx = self.cursor.to_char_index(&self.buffer).unwrap_or(0);
        if char_idx < self.buffer.len_chars() {
            let _ = self.buffer.remove(char_idx, char_idx + 1);
        }
    }

    /// Replaces the whole content, moving the caret to the start.
    pub fn set_text(&mut self, text: &str) {
        self.buffer = TextBuffer::from(text);
        self.cursor = Cursor::new();
        self.scroll_y = 0.0;
    }

    /// Removes the selected range. Returns true if a selection was deleted.
    fn delete_selection(&mut self) -> bool {
        let range = match self.cursor.selection_char_range(&self.buffer) {
            Ok(Some((start, end))) if start != end => (start, end),
            _ => {
                self.cursor.clear_selection();
                return false;
            }
        };
        if self.buffer.remove(range.0, range.1).is_ok() {
            self.cursor.position = char_to_pos(&self.buffer, range.0);
        }
        self.cursor.clear_selection();
        true
    }
}

/// Plain persistence-facing view of one tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabSnapshot {
    pub label: String,
    pub command: String,
    pub active: bool,
}

/// The panel: an ordered, contiguously indexed set of tabs, never empty,
/// with exactly one active tab.
#[derive(Debug)]
pub struct ScriptPanel {
    pub tabs: Vec<ScriptTab>,
    pub active: usize,
}

impl Default for ScriptPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptPanel {
    /// Creates a panel holding one default empty tab.
    pub fn new() -> Self {
        Self {
            tabs: vec![ScriptTab::new()],
            active: 0,
        }
    }

    /// Replaces the whole tab set from persisted snapshots. An empty list
    /// installs the single default tab. At most one snapshot is honored as
    /// active; with none marked, tab 0 becomes active.
    pub fn from_snapshots(snapshots: Vec<TabSnapshot>) -> Self {
        if snapshots.is_empty() {
            return Self::new();
        }
        let active = snapshots
            .iter()
            .position(|s| s.active)
            .unwrap_or(0);
        let tabs = snapshots
            .into_iter()
            .map(|s| ScriptTab::with_content(s.label, &s.command))
            .collect();
        Self { tabs, active }
    }

    /// Serializable view of the current tab set.
    pub fn snapshot(&self) -> Vec<TabSnapshot> {
        self.tabs
            .iter()
            .enumerate()
            .map(|(i, tab)| TabSnapshot {
                label: tab.label.clone(),
                command: tab.text(),
                active: i == self.active,
            })
            .collect()
    }

    pub fn active_tab(&self) -> &ScriptTab {
        &self.tabs[self.active]
    }

    pub fn active_tab_mut(&mut self) -> &mut ScriptTab {
        &mut self.tabs[self.active]
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    /// Appends a new empty tab with the next free numbered label and makes
    /// it active.
    pub fn add_tab(&mut self) {
        let label = self.next_label();
        let mut tab = ScriptTab::new();
        tab.label = label;
        self.tabs.push(tab);
        self.active = self.tabs.len() - 1;
    }

    /// Appends a tab with the given label and content and makes it active.
    pub fn open_tab(&mut self, label: impl Into<String>, content: &str) {
        self.tabs.push(ScriptTab::with_content(label, content));
        self.active = self.tabs.len() - 1;
    }

    /// Removes tab `idx` and activates the tab immediately preceding it
    /// (tab 0 when none precedes). Removing the only tab replaces it with a
    /// fresh default tab; the panel is never left empty. Returns false for
    /// an out-of-range index.
    pub fn close_tab(&mut self, idx: usize) -> bool {
        if idx >= self.tabs.len() {
            return false;
        }
        if self.tabs.len() == 1 {
            self.tabs[0] = ScriptTab::new();
            self.active = 0;
            return true;
        }
        self.tabs.remove(idx);
        self.active = idx.saturating_sub(1);
        true
    }

    /// Activates tab `idx`. Out-of-range indices are ignored.
    pub fn switch_to(&mut self, idx: usize) {
        if idx < self.tabs.len() {
            self.active = idx;
        }
    }

    /// Next free "Python"-numbered label, continuing from the highest in
    /// use ("Python", "Python 2", ...). Closed numbers are not reused.
    fn next_label(&self) -> String {
        let mut max_n = 0usize;
        for tab in &self.tabs {
            max_n = max_n.max(label_number(&tab.label));
        }
        let next = max_n + 1;
        if next == 1 {
            DEFAULT_TAB_LABEL.to_string()
        } else {
            format!("{DEFAULT_TAB_LABEL} {next}")
        }
    }
}

/// Number carried by a default-labeled tab: "Python" → 1, "Python 4" → 4,
/// anything else → 0.
fn label_number(label: &str) -> usize {
    if label == DEFAULT_TAB_LABEL {
        1
    } else if let Some(suffix) = label.strip_prefix("Python ") {
        suffix.parse::<usize>().unwrap_or(0)
    } else {
        0
    }
}
