//! Command Input Processing
//!
//! The editable input line: a buffer with a character-based cursor, plus the
//! submitted-command history and the history navigation cursor.

/// Result of one editing operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResult {
    /// Buffer text changed
    TextChanged,
    /// Only the cursor moved
    CursorMoved,
    /// Non-blank input was submitted (trimmed)
    Submitted(String),
    /// Blank input was submitted and discarded
    EmptySubmit,
    /// Nothing happened
    NoOp,
}

/// Input line buffer and history
#[derive(Debug, Clone, Default)]
pub struct CommandInput {
    /// Text being edited
    buffer: String,
    /// Cursor position in chars, `0..=buffer.chars().count()`
    cursor: usize,
    /// Submitted commands, oldest first
    history: Vec<String>,
    /// Index into `history` while navigating, `None` otherwise
    history_position: Option<usize>,
}

impl CommandInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a printable character at the cursor
    pub fn insert_char(&mut self, ch: char) -> InputResult {
        if ch.is_control() {
            return InputResult::NoOp;
        }
        let at = self.byte_index(self.cursor);
        self.buffer.insert(at, ch);
        self.cursor += 1;
        InputResult::TextChanged
    }

    /// Insert a string at the cursor, dropping control characters
    pub fn insert_str(&mut self, text: &str) -> InputResult {
        let mut changed = false;
        for ch in text.chars() {
            changed |= self.insert_char(ch) == InputResult::TextChanged;
        }
        if changed {
            InputResult::TextChanged
        } else {
            InputResult::NoOp
        }
    }

    /// Delete the character before the cursor
    pub fn backspace(&mut self) -> InputResult {
        if self.cursor == 0 {
            return InputResult::NoOp;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.buffer.remove(at);
        InputResult::TextChanged
    }

    /// Delete the character under the cursor
    pub fn delete(&mut self) -> InputResult {
        if self.cursor >= self.char_len() {
            return InputResult::NoOp;
        }
        let at = self.byte_index(self.cursor);
        self.buffer.remove(at);
        InputResult::TextChanged
    }

    pub fn cursor_left(&mut self) -> InputResult {
        if self.cursor > 0 {
            self.cursor -= 1;
            InputResult::CursorMoved
        } else {
            InputResult::NoOp
        }
    }

    pub fn cursor_right(&mut self) -> InputResult {
        if self.cursor < self.char_len() {
            self.cursor += 1;
            InputResult::CursorMoved
        } else {
            InputResult::NoOp
        }
    }

    pub fn cursor_home(&mut self) -> InputResult {
        if self.cursor > 0 {
            self.cursor = 0;
            InputResult::CursorMoved
        } else {
            InputResult::NoOp
        }
    }

    pub fn cursor_end(&mut self) -> InputResult {
        let len = self.char_len();
        if self.cursor < len {
            self.cursor = len;
            InputResult::CursorMoved
        } else {
            InputResult::NoOp
        }
    }

    /// Step back through history, clamped at the oldest entry
    pub fn history_previous(&mut self) -> InputResult {
        if self.history.is_empty() {
            return InputResult::NoOp;
        }

        let position = match self.history_position {
            None => self.history.len() - 1,
            Some(pos) if pos > 0 => pos - 1,
            _ => return InputResult::NoOp,
        };

        self.history_position = Some(position);
        self.replace_buffer(self.history[position].clone());
        InputResult::TextChanged
    }

    /// Step forward through history; past the newest entry the buffer clears
    pub fn history_next(&mut self) -> InputResult {
        let Some(pos) = self.history_position else {
            return InputResult::NoOp;
        };

        if pos + 1 < self.history.len() {
            self.history_position = Some(pos + 1);
            self.replace_buffer(self.history[pos + 1].clone());
        } else {
            self.history_position = None;
            self.replace_buffer(String::new());
        }
        InputResult::TextChanged
    }

    /// Take the buffer as a command
    ///
    /// Non-blank input is trimmed and appended to history (case preserved,
    /// duplicates kept). The buffer is cleared either way.
    pub fn submit(&mut self) -> InputResult {
        let command = self.buffer.trim().to_string();
        self.replace_buffer(String::new());
        self.history_position = None;

        if command.is_empty() {
            return InputResult::EmptySubmit;
        }
        self.history.push(command.clone());
        InputResult::Submitted(command)
    }

    /// Replace the buffer (e.g. after completion), cursor at the end
    pub fn set_text(&mut self, text: &str) -> InputResult {
        if self.buffer == text {
            return InputResult::NoOp;
        }
        self.replace_buffer(text.to_string());
        InputResult::TextChanged
    }

    /// Clear the buffer and leave history navigation
    pub fn clear(&mut self) {
        self.replace_buffer(String::new());
        self.history_position = None;
    }

    /// Clear the buffer and forget all history
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Cursor position in chars
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn history_position(&self) -> Option<usize> {
        self.history_position
    }

    fn replace_buffer(&mut self, text: String) {
        self.buffer = text;
        self.cursor = self.char_len();
    }

    fn char_len(&self) -> usize {
        self.buffer.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }
}
