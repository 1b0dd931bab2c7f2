//! Discrete intents delivered by the input layer.

use super::cursor::TextPosition;

/// Target for caret movement operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveTarget {
    /// Move one character left
    Left,
    /// Move one character right
    Right,
    /// Move one word left
    WordLeft,
    /// Move one word right
    WordRight,
    /// Move to start of line
    LineStart,
    /// Move to end of line
    LineEnd,
    /// Move one line up
    Up,
    /// Move one line down
    Down,
    /// Move to start of document
    DocumentStart,
    /// Move to end of document
    DocumentEnd,
}

impl MoveTarget {
    /// Horizontal targets only collapse an extended selection instead of moving
    pub fn is_horizontal(self) -> bool {
        matches!(
            self,
            MoveTarget::Left
                | MoveTarget::Right
                | MoveTarget::WordLeft
                | MoveTarget::WordRight
                | MoveTarget::LineStart
                | MoveTarget::LineEnd
        )
    }

    /// Whether this target moves toward the end of the document
    pub fn is_forward(self) -> bool {
        matches!(
            self,
            MoveTarget::Right
                | MoveTarget::WordRight
                | MoveTarget::LineEnd
                | MoveTarget::Down
                | MoveTarget::DocumentEnd
        )
    }
}

/// Everything the input layer can ask a session to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditIntent {
    // === Movement ===
    /// Move the caret, optionally extending the selection
    Move { target: MoveTarget, extend: bool },
    /// Set anchor and endpoint directly (e.g. from a mouse click mapped by the view)
    SetSelection {
        anchor: TextPosition,
        endpoint: TextPosition,
    },
    /// Grow the selection for a multi-click: 2 = word or bracketed group, 3+ = lines
    ExtendSelection { click_count: u32, forward: bool },
    /// Select all text
    SelectAll,

    // === Editing ===
    /// Replace the selection with text (typing, completion)
    InsertText(String),
    /// Insert a line break, then the closer for the enclosing open block
    SmartNewline,
    /// Backspace
    DeleteBackward,
    /// Delete
    DeleteForward,
    /// Add (positive) or remove (negative) leading tabs on selected lines
    Indent(i32),

    // === Clipboard ===
    Cut,
    Copy,
    Paste,

    // === Undo/Redo ===
    Undo,
    Redo,
}

impl EditIntent {
    /// Check if this intent can modify the buffer
    pub fn is_editing(&self) -> bool {
        matches!(
            self,
            EditIntent::InsertText(_)
                | EditIntent::SmartNewline
                | EditIntent::DeleteBackward
                | EditIntent::DeleteForward
                | EditIntent::Indent(_)
                | EditIntent::Cut
                | EditIntent::Paste
                | EditIntent::Undo
                | EditIntent::Redo
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_target_classes() {
        assert!(MoveTarget::WordLeft.is_horizontal());
        assert!(!MoveTarget::Up.is_horizontal());
        assert!(MoveTarget::DocumentEnd.is_forward());
        assert!(!MoveTarget::LineStart.is_forward());
    }

    #[test]
    fn test_is_editing() {
        assert!(EditIntent::InsertText("x".into()).is_editing());
        assert!(EditIntent::Paste.is_editing());
        assert!(!EditIntent::Copy.is_editing());
        assert!(!EditIntent::SelectAll.is_editing());
        assert!(!EditIntent::Move {
            target: MoveTarget::Left,
            extend: false
        }
        .is_editing());
    }
}
