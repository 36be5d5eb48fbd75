//! Single-line editable buffer.
//!
//! Used by the chat input and both creation form fields. The cursor is a
//! char index, never a byte index.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Cursor movement commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Forward,
    Back,
    Head,
    End,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    text: String,
    cursor: usize,
}

impl LineBuffer {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in chars.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Inserts text at the cursor. Newlines become spaces.
    pub fn insert_str(&mut self, text: &str) {
        for ch in text.chars() {
            self.insert_char(ch);
        }
    }

    pub fn insert_char(&mut self, ch: char) {
        let ch = match ch {
            '\n' | '\r' | '\t' => ' ',
            c if c.is_control() => return,
            c => c,
        };
        let at = byte_index(&self.text, self.cursor);
        self.text.insert(at, ch);
        self.cursor += 1;
    }

    /// Deletes the character before the cursor (Backspace semantics).
    pub fn delete_prev_char(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let start = byte_index(&self.text, self.cursor);
        let end = byte_index(&self.text, self.cursor + 1);
        self.text.replace_range(start..end, "");
    }

    /// Deletes the character at the cursor (Delete key semantics).
    pub fn delete_next_char(&mut self) {
        if self.cursor >= self.text.chars().count() {
            return;
        }
        let start = byte_index(&self.text, self.cursor);
        let end = byte_index(&self.text, self.cursor + 1);
        self.text.replace_range(start..end, "");
    }

    /// Deletes from the cursor back to the start of the previous word.
    pub fn delete_word_left(&mut self) {
        let chars: Vec<char> = self.text.chars().collect();
        let mut idx = self.cursor.min(chars.len());
        while idx > 0 && chars[idx - 1].is_whitespace() {
            idx -= 1;
        }
        while idx > 0 && !chars[idx - 1].is_whitespace() {
            idx -= 1;
        }
        let start = byte_index(&self.text, idx);
        let end = byte_index(&self.text, self.cursor);
        self.text.replace_range(start..end, "");
        self.cursor = idx;
    }

    pub fn move_cursor(&mut self, movement: CursorMove) {
        let len = self.text.chars().count();
        self.cursor = match movement {
            CursorMove::Forward => (self.cursor + 1).min(len),
            CursorMove::Back => self.cursor.saturating_sub(1),
            CursorMove::Head => 0,
            CursorMove::End => len,
        };
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Returns the text and leaves the buffer empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    /// Applies an editing key. Returns false for keys it does not handle.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        if matches!(key.kind, KeyEventKind::Release) {
            return false;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Char('a') if ctrl => self.move_cursor(CursorMove::Head),
            KeyCode::Char('e') if ctrl => self.move_cursor(CursorMove::End),
            KeyCode::Char('u') if ctrl => self.clear(),
            KeyCode::Char('w') if ctrl => self.delete_word_left(),
            KeyCode::Char(ch) if !ctrl && !alt => self.insert_char(ch),
            KeyCode::Backspace if alt => self.delete_word_left(),
            KeyCode::Backspace => self.delete_prev_char(),
            KeyCode::Delete => self.delete_next_char(),
            KeyCode::Left => self.move_cursor(CursorMove::Back),
            KeyCode::Right => self.move_cursor(CursorMove::Forward),
            KeyCode::Home => self.move_cursor(CursorMove::Head),
            KeyCode::End => self.move_cursor(CursorMove::End),
            _ => return false,
        }
        true
    }
}

fn byte_index(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map_or(text.len(), |(idx, _)| idx)
}
