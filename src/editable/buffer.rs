//! Line buffer for the editing engine.
//!
//! Provides the read-only `TextBuffer` trait consumed by the matcher, the
//! indentation engine and the view layer, and `LineBuffer`, the authoritative
//! `Vec<String>` store that only the edit engine mutates.

use std::borrow::Cow;

use super::cursor::TextPosition;
use crate::util::{char_len, split_at_char};

/// Read-only view into a line buffer for caret navigation and rendering.
pub trait TextBuffer {
    /// Number of lines (always >= 1)
    fn line_count(&self) -> usize;

    /// Line content (without line break), None if out of bounds
    fn line(&self, line: usize) -> Option<Cow<'_, str>>;

    /// Length of a specific line in chars, 0 if out of bounds
    fn line_length(&self, line: usize) -> usize {
        self.line(line).map(|l| char_len(&l)).unwrap_or(0)
    }

    /// Char at position, None past the end of the line
    fn char_at(&self, line: usize, offset: usize) -> Option<char> {
        self.line(line).and_then(|l| l.chars().nth(offset))
    }

    /// Position just past the last char of the document
    fn end_position(&self) -> TextPosition {
        let last = self.line_count().saturating_sub(1);
        TextPosition::new(last, self.line_length(last))
    }

    /// Clamp a position so it refers to an existing line and offset
    fn clamp_position(&self, pos: TextPosition) -> TextPosition {
        let line = pos.line.min(self.line_count().saturating_sub(1));
        TextPosition::new(line, pos.offset.min(self.line_length(line)))
    }

    /// Full content, lines joined with `\n`
    fn content(&self) -> String;
}

/// Ordered lines of source text.
///
/// Invariants: at least one line; no line contains `\n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<String>,
}

impl LineBuffer {
    /// A buffer holding one empty line
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
        }
    }

    /// Split `text` on `\n` (after normalizing `\r\n` and `\r`)
    pub fn from_text(text: &str) -> Self {
        let text = normalize_line_endings(text);
        Self {
            lines: text.split('\n').map(str::to_string).collect(),
        }
    }

    /// All lines, for rendering
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Borrow a line without copying
    pub fn get(&self, line: usize) -> Option<&str> {
        self.lines.get(line).map(String::as_str)
    }

    /// Replace the text of an existing line. Returns false if `line` is out of
    /// bounds or `text` contains a line break.
    pub fn set_line(&mut self, line: usize, text: impl Into<String>) -> bool {
        let text = text.into();
        if text.contains('\n') {
            tracing::error!(line, "refusing to store a line containing a line break");
            return false;
        }
        match self.lines.get_mut(line) {
            Some(slot) => {
                *slot = text;
                true
            }
            None => false,
        }
    }

    /// Insert a new line before index `line` (clamped to append)
    pub fn insert_line(&mut self, line: usize, text: impl Into<String>) -> bool {
        let text = text.into();
        if text.contains('\n') {
            tracing::error!(line, "refusing to insert a line containing a line break");
            return false;
        }
        let at = line.min(self.lines.len());
        self.lines.insert(at, text);
        true
    }

    /// Remove a line. The last remaining line is cleared instead of removed.
    pub fn remove_line(&mut self, line: usize) -> Option<String> {
        if line >= self.lines.len() {
            return None;
        }
        if self.lines.len() == 1 {
            return Some(std::mem::take(&mut self.lines[0]));
        }
        Some(self.lines.remove(line))
    }

    /// Text of `line` before and after `offset` (clamped)
    pub fn split_line(&self, line: usize, offset: usize) -> Option<(&str, &str)> {
        self.get(line).map(|l| split_at_char(l, offset))
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer for LineBuffer {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line(&self, line: usize) -> Option<Cow<'_, str>> {
        self.get(line).map(Cow::Borrowed)
    }

    fn content(&self) -> String {
        self.lines.join("\n")
    }
}

/// Convert `\r\n` and lone `\r` to `\n`
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}
