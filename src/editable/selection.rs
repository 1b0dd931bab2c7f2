//! Selection type for the editing engine.

use super::buffer::TextBuffer;
use super::cursor::TextPosition;

/// Which end of a selection, in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEnd {
    First,
    Last,
}

/// A selection with anchor (fixed point) and endpoint (the end being moved).
/// The two are not ordered; use [`Selection::first`] / [`Selection::last`]
/// for document order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    /// Where the selection started (fixed during a drag or shift-extend)
    pub anchor: TextPosition,
    /// Where the caret is (moving point)
    pub endpoint: TextPosition,
}

impl Selection {
    pub fn new(anchor: TextPosition, endpoint: TextPosition) -> Self {
        Self { anchor, endpoint }
    }

    /// Create a collapsed selection (caret with no selection)
    pub fn collapsed(pos: TextPosition) -> Self {
        Self {
            anchor: pos,
            endpoint: pos,
        }
    }

    /// True when anchor and endpoint differ
    pub fn is_extended(&self) -> bool {
        self.anchor != self.endpoint
    }

    /// The end that comes first in the document
    pub fn first(&self) -> TextPosition {
        self.anchor.min(self.endpoint)
    }

    /// The end that comes last in the document
    pub fn last(&self) -> TextPosition {
        self.anchor.max(self.endpoint)
    }

    /// Both ends in document order
    pub fn normalized(&self) -> (TextPosition, TextPosition) {
        (self.first(), self.last())
    }

    /// True when the endpoint lies before the anchor
    pub fn is_reversed(&self) -> bool {
        self.endpoint < self.anchor
    }

    /// Move the endpoint, keeping the anchor
    pub fn extend_to(&mut self, pos: TextPosition) {
        self.endpoint = pos;
    }

    /// Collapse both ends onto one end of the current selection
    pub fn collapse_to(&mut self, which: SelectionEnd) {
        let pos = match which {
            SelectionEnd::First => self.first(),
            SelectionEnd::Last => self.last(),
        };
        *self = Self::collapsed(pos);
    }

    /// Check if a position is within this selection (end exclusive)
    pub fn contains(&self, pos: TextPosition) -> bool {
        pos >= self.first() && pos < self.last()
    }

    /// Clamp both ends into the buffer
    pub fn clamp<B: TextBuffer + ?Sized>(&mut self, buffer: &B) {
        self.anchor = buffer.clamp_position(self.anchor);
        self.endpoint = buffer.clamp_position(self.endpoint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editable::buffer::LineBuffer;

    #[test]
    fn test_selection_collapsed() {
        let sel = Selection::collapsed(TextPosition::new(1, 5));
        assert!(!sel.is_extended());
        assert_eq!(sel.anchor, sel.endpoint);
    }

    #[test]
    fn test_selection_first_last() {
        let forward = Selection::new(TextPosition::new(0, 0), TextPosition::new(0, 5));
        assert_eq!(
            forward.normalized(),
            (TextPosition::new(0, 0), TextPosition::new(0, 5))
        );
        assert!(!forward.is_reversed());

        let backward = Selection::new(TextPosition::new(2, 1), TextPosition::new(0, 5));
        assert_eq!(backward.first(), TextPosition::new(0, 5));
        assert_eq!(backward.last(), TextPosition::new(2, 1));
        assert!(backward.is_reversed());
    }

    #[test]
    fn test_collapse_to() {
        let mut sel = Selection::new(TextPosition::new(1, 4), TextPosition::new(0, 2));
        sel.collapse_to(SelectionEnd::Last);
        assert_eq!(sel, Selection::collapsed(TextPosition::new(1, 4)));

        let mut sel = Selection::new(TextPosition::new(1, 4), TextPosition::new(0, 2));
        sel.collapse_to(SelectionEnd::First);
        assert_eq!(sel, Selection::collapsed(TextPosition::new(0, 2)));
    }

    #[test]
    fn test_selection_contains() {
        let sel = Selection::new(TextPosition::new(0, 2), TextPosition::new(0, 8));
        assert!(!sel.contains(TextPosition::new(0, 1)));
        assert!(sel.contains(TextPosition::new(0, 2)));
        assert!(sel.contains(TextPosition::new(0, 7)));
        assert!(!sel.contains(TextPosition::new(0, 8)));
    }

    #[test]
    fn test_clamp() {
        let buf = LineBuffer::from_text("abc\nde");
        let mut sel = Selection::new(TextPosition::new(0, 10), TextPosition::new(5, 5));
        sel.clamp(&buf);
        assert_eq!(sel.anchor, TextPosition::new(0, 3));
        assert_eq!(sel.endpoint, TextPosition::new(1, 2));
    }
}
