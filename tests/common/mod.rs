//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use codepad::editable::{EditSettings, EditorSession, TextPosition};

/// Create a session with given text and caret position.
/// Every edit is its own undo entry.
pub fn test_session(text: &str, line: usize, offset: usize) -> EditorSession {
    let mut session = EditorSession::with_source(text, EditSettings::without_coalescing());
    session.set_caret(TextPosition::new(line, offset));
    session
}

/// Create a session with a selection from anchor to endpoint
pub fn test_session_with_selection(
    text: &str,
    anchor_line: usize,
    anchor_offset: usize,
    end_line: usize,
    end_offset: usize,
) -> EditorSession {
    let mut session = EditorSession::with_source(text, EditSettings::without_coalescing());
    session.set_selection(
        TextPosition::new(anchor_line, anchor_offset),
        TextPosition::new(end_line, end_offset),
    );
    session
}

/// Caret as a (line, offset) pair
pub fn caret(session: &EditorSession) -> (usize, usize) {
    let pos = session.caret();
    (pos.line, pos.offset)
}

/// Assert the buffer invariants: at least one line, no line breaks inside lines,
/// and a selection that fits the buffer
pub fn assert_invariants(session: &EditorSession) {
    assert!(session.line_count() >= 1, "buffer must never be empty");
    for (i, line) in session.lines().iter().enumerate() {
        assert!(
            !line.contains('\n') && !line.contains('\r'),
            "line {} contains a line break: {:?}",
            i,
            line
        );
    }
    for pos in [session.selection().anchor, session.selection().endpoint] {
        assert!(pos.line < session.line_count(), "position {} past last line", pos);
        let len = session.lines()[pos.line].chars().count();
        assert!(pos.offset <= len, "position {} past line end {}", pos, len);
    }
}
