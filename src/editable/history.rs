//! Snapshot-based undo/redo for the editing engine.
//!
//! Every undo entry is the whole document plus the selection at that moment.
//! The stack keeps a cursor into its entries rather than separate undo and
//! redo stacks: entries at or below the cursor can be undone, and the entries
//! above it are the redo branch until the next store truncates them.

use super::cursor::TextPosition;

/// Default number of undo entries kept
pub const DEFAULT_UNDO_LIMIT: usize = 20;

/// Immutable snapshot of document text and selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoState {
    pub source: String,
    pub anchor: TextPosition,
    pub endpoint: TextPosition,
}

/// Bounded undo stack with a movable cursor.
#[derive(Debug, Clone)]
pub struct UndoStack {
    entries: Vec<UndoState>,
    /// Number of entries that can currently be undone (undo position + 1)
    cursor: usize,
    limit: usize,
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoStack {
    /// Create a stack with the default limit
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_UNDO_LIMIT)
    }

    /// Create a stack keeping at most `limit` entries (at least one)
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            limit: limit.max(1),
        }
    }

    /// Index of the next entry to undo, or -1 when there is nothing to undo
    pub fn undo_position(&self) -> isize {
        self.cursor as isize - 1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Record the state before a new edit. Discards any redo branch and
    /// evicts the oldest entry when over the limit.
    pub fn store(&mut self, state: UndoState) {
        if self.cursor >= self.entries.len() {
            self.entries.push(state);
        } else {
            self.entries[self.cursor] = state;
            self.entries.truncate(self.cursor + 1);
        }
        self.cursor += 1;

        while self.entries.len() > self.limit {
            self.entries.remove(0);
            self.cursor = self.cursor.saturating_sub(1);
        }
    }

    /// Step back one entry.
    ///
    /// `current` is called only when undoing from the top of the stack, to
    /// capture the live state so it can be redone. Returns the state to
    /// restore, or None when there is nothing to undo.
    pub fn undo(&mut self, current: impl FnOnce() -> UndoState) -> Option<UndoState> {
        if self.cursor == 0 {
            return None;
        }
        if self.cursor == self.entries.len() {
            self.entries.push(current());
        }
        self.cursor -= 1;
        self.entries.get(self.cursor).cloned()
    }

    /// Step forward one entry. Returns the state to restore, or None when
    /// there is nothing to redo.
    pub fn redo(&mut self) -> Option<UndoState> {
        if !self.can_redo() {
            return None;
        }
        let state = self.entries.get(self.cursor + 1).cloned();
        self.cursor += 1;
        state
    }

    /// Drop all entries
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(source: &str) -> UndoState {
        UndoState {
            source: source.to_string(),
            anchor: TextPosition::zero(),
            endpoint: TextPosition::zero(),
        }
    }

    #[test]
    fn test_empty_stack() {
        let mut stack = UndoStack::new();
        assert_eq!(stack.undo_position(), -1);
        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
        assert!(stack.undo(|| state("now")).is_none());
        assert!(stack.redo().is_none());
        assert!(stack.is_empty());
    }

    #[test]
    fn test_undo_pushes_current_at_top() {
        let mut stack = UndoStack::new();
        stack.store(state("a"));
        assert_eq!(stack.undo_position(), 0);

        let restored = stack.undo(|| state("b")).unwrap();
        assert_eq!(restored.source, "a");
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.undo_position(), -1);
        assert!(stack.can_redo());

        let redone = stack.redo().unwrap();
        assert_eq!(redone.source, "b");
        assert!(!stack.can_redo());
        assert!(stack.can_undo());
    }

    #[test]
    fn test_undo_below_top_does_not_push() {
        let mut stack = UndoStack::new();
        stack.store(state("a"));
        stack.store(state("b"));
        assert_eq!(stack.undo(|| state("c")).unwrap().source, "b");
        assert_eq!(stack.undo(|| panic!("not at top")).unwrap().source, "a");
        assert_eq!(stack.len(), 3);
        assert_eq!(stack.redo().unwrap().source, "b");
        assert_eq!(stack.redo().unwrap().source, "c");
        assert!(stack.redo().is_none());
    }

    #[test]
    fn test_store_after_undo_truncates_redo() {
        let mut stack = UndoStack::new();
        stack.store(state("a"));
        stack.store(state("b"));
        stack.undo(|| state("c"));
        stack.undo(|| state("unused"));
        assert!(stack.can_redo());

        stack.store(state("x"));
        assert!(!stack.can_redo());
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.undo(|| state("y")).unwrap().source, "x");
    }

    #[test]
    fn test_limit_evicts_oldest() {
        let mut stack = UndoStack::with_limit(3);
        for s in ["a", "b", "c", "d", "e"] {
            stack.store(state(s));
        }
        assert_eq!(stack.len(), 3);
        assert_eq!(stack.undo_position(), 2);
        assert_eq!(stack.undo(|| state("f")).unwrap().source, "e");
        assert_eq!(stack.undo(|| state("f")).unwrap().source, "d");
        assert_eq!(stack.undo(|| state("f")).unwrap().source, "c");
        assert!(stack.undo(|| state("f")).is_none());
    }
}
