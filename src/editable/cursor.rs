//! Position types for the editing engine.

use std::fmt;

use super::buffer::TextBuffer;

/// A position in the buffer: 0-based line index and the number of chars to
/// the left of the position on that line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextPosition {
    pub line: usize,
    pub offset: usize,
}

impl TextPosition {
    pub const fn new(line: usize, offset: usize) -> Self {
        Self { line, offset }
    }

    pub const fn zero() -> Self {
        Self { line: 0, offset: 0 }
    }
}

impl fmt::Display for TextPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.offset)
    }
}

/// Horizontal direction of travel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Backward,
    Forward,
}

/// Move `pos` one char in `direction`, crossing line boundaries.
///
/// Returns false without wrapping when already at the start (backward) or
/// end (forward) of the document; `pos` is left clamped in that case.
pub fn advance_one<B: TextBuffer + ?Sized>(
    buffer: &B,
    pos: &mut TextPosition,
    direction: Direction,
) -> bool {
    *pos = buffer.clamp_position(*pos);
    match direction {
        Direction::Backward => {
            if pos.offset > 0 {
                pos.offset -= 1;
            } else if pos.line > 0 {
                pos.line -= 1;
                pos.offset = buffer.line_length(pos.line);
            } else {
                return false;
            }
        }
        Direction::Forward => {
            if pos.offset < buffer.line_length(pos.line) {
                pos.offset += 1;
            } else if pos.line + 1 < buffer.line_count() {
                pos.line += 1;
                pos.offset = 0;
            } else {
                return false;
            }
        }
    }
    true
}
