//! EditorSession - the line buffer, its selection and undo history, and the
//! single edit entry point that keeps them consistent.

use std::time::Instant;

use crate::lexer::is_whitespace;
use crate::util::{char_len, is_token_char, split_at_char};

use super::buffer::{normalize_line_endings, LineBuffer, TextBuffer};
use super::clipboard::Clipboard;
use super::cursor::{advance_one, Direction, TextPosition};
use super::history::{UndoStack, UndoState};
use super::indent::{indentation, reindent_lines};
use super::matcher::{
    find_default_ender, find_matching_token, find_word_end, find_word_start, MATCHABLE,
};
use super::messages::{EditIntent, MoveTarget};
use super::selection::{Selection, SelectionEnd};
use super::settings::EditSettings;

/// Part of one line covered by the extended selection, for the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan {
    pub line: usize,
    pub start: usize,
    /// None: through the end of the line, including its line break
    pub end: Option<usize>,
}

/// One editor instance: buffer, selection, undo history and settings.
///
/// All mutation goes through methods on this type so the selection is valid
/// for the buffer after every call.
#[derive(Debug, Clone)]
pub struct EditorSession {
    buffer: LineBuffer,
    selection: Selection,
    history: UndoStack,
    settings: EditSettings,
    /// When the last edit happened, for undo coalescing
    last_edit: Option<Instant>,
    /// Offset vertical movement tries to keep
    preferred_offset: Option<usize>,
    /// Bumped on every buffer change so the view knows to re-layout
    revision: u64,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditSettings::default())
    }
}

fn snapshot(buffer: &LineBuffer, selection: &Selection) -> UndoState {
    UndoState {
        source: buffer.content(),
        anchor: selection.anchor,
        endpoint: selection.endpoint,
    }
}

impl EditorSession {
    /// Create an empty session (one empty line, caret at the start)
    pub fn new(settings: EditSettings) -> Self {
        Self {
            buffer: LineBuffer::new(),
            selection: Selection::default(),
            history: UndoStack::with_limit(settings.undo_limit),
            settings,
            last_edit: None,
            preferred_offset: None,
            revision: 0,
        }
    }

    /// Create a session with initial source text
    pub fn with_source(source: &str, settings: EditSettings) -> Self {
        let mut session = Self::new(settings);
        session.load_source(source);
        session
    }

    /// Replace the whole document. The selection is clamped to the new text;
    /// undo history is kept.
    pub fn load_source(&mut self, source: &str) {
        self.buffer = LineBuffer::from_text(source);
        self.selection.clamp(&self.buffer);
        self.preferred_offset = None;
        self.last_edit = None;
        self.revision += 1;
        tracing::debug!(lines = self.buffer.line_count(), "loaded source");
    }

    /// The document as `\n`-joined text
    pub fn source(&self) -> String {
        self.buffer.content()
    }

    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    pub fn lines(&self) -> &[String] {
        self.buffer.lines()
    }

    pub fn line(&self, line: usize) -> Option<&str> {
        self.buffer.get(line)
    }

    pub fn line_count(&self) -> usize {
        self.buffer.line_count()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// The caret (the moving end of the selection)
    pub fn caret(&self) -> TextPosition {
        self.selection.endpoint
    }

    pub fn settings(&self) -> &EditSettings {
        &self.settings
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn has_selection(&self) -> bool {
        self.selection.is_extended()
    }

    /// Text covered by the selection, lines joined with `\n`
    pub fn selected_text(&self) -> String {
        let (first, last) = self.selection.normalized();
        let first = self.buffer.clamp_position(first);
        let last = self.buffer.clamp_position(last);
        if first == last {
            return String::new();
        }

        let slice = |line: usize, from: usize, to: Option<usize>| -> String {
            let text = self.buffer.get(line).unwrap_or_default();
            let chars = text.chars().skip(from);
            match to {
                Some(to) => chars.take(to.saturating_sub(from)).collect(),
                None => chars.collect(),
            }
        };

        if first.line == last.line {
            return slice(first.line, first.offset, Some(last.offset));
        }
        let mut out = slice(first.line, first.offset, None);
        for line in first.line + 1..last.line {
            out.push('\n');
            out.push_str(self.buffer.get(line).unwrap_or_default());
        }
        out.push('\n');
        out.push_str(&slice(last.line, 0, Some(last.offset)));
        out
    }

    /// Per-line spans covered by the extended selection (empty when collapsed)
    pub fn highlight_spans(&self) -> Vec<HighlightSpan> {
        if !self.selection.is_extended() {
            return Vec::new();
        }
        let (first, last) = self.selection.normalized();
        if first.line == last.line {
            return vec![HighlightSpan {
                line: first.line,
                start: first.offset,
                end: Some(last.offset),
            }];
        }
        let mut spans = vec![HighlightSpan {
            line: first.line,
            start: first.offset,
            end: None,
        }];
        spans.extend((first.line + 1..last.line).map(|line| HighlightSpan {
            line,
            start: 0,
            end: None,
        }));
        spans.push(HighlightSpan {
            line: last.line,
            start: 0,
            end: Some(last.offset),
        });
        spans
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Forget every undo and redo state, e.g. after opening a different file
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.last_edit = None;
        tracing::debug!("cleared undo history");
    }
}

// =============================================================================
// Selection and Movement
// =============================================================================

impl EditorSession {
    /// Set anchor and endpoint, clamped into the buffer
    pub fn set_selection(&mut self, anchor: TextPosition, endpoint: TextPosition) {
        self.selection = Selection::new(anchor, endpoint);
        self.selection.clamp(&self.buffer);
        self.preferred_offset = None;
    }

    /// Put a collapsed caret at `pos` (clamped)
    pub fn set_caret(&mut self, pos: TextPosition) {
        self.set_selection(pos, pos);
    }

    /// Select from the start of the document to the end of the last line
    pub fn select_all(&mut self) {
        self.selection = Selection::new(TextPosition::zero(), self.buffer.end_position());
        self.preferred_offset = None;
    }

    /// Move the caret. Without `extend`, an extended selection first collapses
    /// toward the direction of travel; horizontal moves stop there.
    pub fn move_caret(&mut self, target: MoveTarget, extend: bool) {
        self.selection.clamp(&self.buffer);

        if self.selection.is_extended() && !extend {
            let end = if target.is_forward() {
                SelectionEnd::Last
            } else {
                SelectionEnd::First
            };
            self.selection.collapse_to(end);
            if target.is_horizontal() {
                self.preferred_offset = None;
                return;
            }
        }

        let mut pos = self.selection.endpoint;
        match target {
            MoveTarget::Left => {
                advance_one(&self.buffer, &mut pos, Direction::Backward);
            }
            MoveTarget::Right => {
                advance_one(&self.buffer, &mut pos, Direction::Forward);
            }
            MoveTarget::WordLeft => pos = self.word_boundary(pos, Direction::Backward),
            MoveTarget::WordRight => pos = self.word_boundary(pos, Direction::Forward),
            MoveTarget::LineStart => pos.offset = 0,
            MoveTarget::LineEnd => pos.offset = self.buffer.line_length(pos.line),
            MoveTarget::Up => {
                let preferred = *self.preferred_offset.get_or_insert(pos.offset);
                if pos.line == 0 {
                    pos.offset = 0;
                } else {
                    pos.line -= 1;
                    pos.offset = preferred.min(self.buffer.line_length(pos.line));
                }
            }
            MoveTarget::Down => {
                let preferred = *self.preferred_offset.get_or_insert(pos.offset);
                if pos.line + 1 >= self.buffer.line_count() {
                    pos.offset = self.buffer.line_length(pos.line);
                } else {
                    pos.line += 1;
                    pos.offset = preferred.min(self.buffer.line_length(pos.line));
                }
            }
            MoveTarget::DocumentStart => pos = TextPosition::zero(),
            MoveTarget::DocumentEnd => pos = self.buffer.end_position(),
        }

        if !matches!(target, MoveTarget::Up | MoveTarget::Down) {
            self.preferred_offset = None;
        }

        if extend {
            self.selection.extend_to(pos);
        } else {
            self.selection = Selection::collapsed(pos);
        }
        tracing::trace!(?target, extend, caret = %pos, "moved caret");
    }

    /// Char at `pos`, with the line break reported as `\n`
    fn char_or_newline(&self, pos: TextPosition) -> char {
        self.buffer.char_at(pos.line, pos.offset).unwrap_or('\n')
    }

    /// Char just before `pos`, None at the start of the document
    fn char_before(&self, pos: TextPosition) -> Option<char> {
        if pos.offset > 0 {
            self.buffer.char_at(pos.line, pos.offset - 1)
        } else if pos.line > 0 {
            Some('\n')
        } else {
            None
        }
    }

    /// Skip non-word chars, then word chars, in `direction`
    fn word_boundary(&self, mut pos: TextPosition, direction: Direction) -> TextPosition {
        let mut numeric = false;
        match direction {
            Direction::Forward => {
                while !is_token_char(self.char_or_newline(pos), &mut numeric) {
                    if !advance_one(&self.buffer, &mut pos, direction) {
                        return pos;
                    }
                }
                while is_token_char(self.char_or_newline(pos), &mut numeric) {
                    if !advance_one(&self.buffer, &mut pos, direction) {
                        return pos;
                    }
                }
            }
            Direction::Backward => {
                while let Some(c) = self.char_before(pos) {
                    if is_token_char(c, &mut numeric) {
                        break;
                    }
                    advance_one(&self.buffer, &mut pos, direction);
                }
                while let Some(c) = self.char_before(pos) {
                    if !is_token_char(c, &mut numeric) {
                        break;
                    }
                    advance_one(&self.buffer, &mut pos, direction);
                }
            }
        }
        pos
    }

    /// Grow the selection for a multi-click.
    ///
    /// A double click on a collapsed selection selects the bracketed or quoted
    /// group next to the caret, or else the word around it; on an extended
    /// selection it grows both ends by word. Three or more clicks select
    /// whole lines. `forward` says which way the drag is going.
    pub fn extend_selection(&mut self, click_count: u32, forward: bool) {
        self.selection.clamp(&self.buffer);
        let Selection {
            mut anchor,
            mut endpoint,
        } = self.selection;

        match click_count {
            0 | 1 => return,
            2 if !self.selection.is_extended() => {
                let line = self.buffer.get(anchor.line).unwrap_or_default();
                let chars: Vec<char> = line.chars().collect();
                let is_delim = |i: usize| chars.get(i).is_some_and(|c| MATCHABLE.contains(c));
                let offset = anchor.offset;

                let delim = if offset > 0 && is_delim(offset - 1) {
                    Some(offset - 1)
                } else if is_delim(offset) {
                    Some(offset)
                } else {
                    None
                };

                match delim.and_then(|d| find_matching_token(line, d).map(|m| (d, m))) {
                    Some((d, m)) => {
                        // Include both delimiters; the anchor goes on the matched side
                        let (lo, hi) = (d.min(m), d.max(m) + 1);
                        if m > d {
                            anchor.offset = hi;
                            endpoint.offset = lo;
                        } else {
                            anchor.offset = lo;
                            endpoint.offset = hi;
                        }
                    }
                    None => {
                        anchor.offset = find_word_start(line, offset);
                        endpoint.offset = find_word_end(line, offset);
                    }
                }
            }
            2 => {
                let anchor_line = self.buffer.get(anchor.line).unwrap_or_default();
                let endpoint_line = self.buffer.get(endpoint.line).unwrap_or_default();
                if forward {
                    anchor.offset = find_word_start(anchor_line, anchor.offset);
                    endpoint.offset = find_word_end(endpoint_line, endpoint.offset);
                } else {
                    anchor.offset = find_word_end(anchor_line, anchor.offset);
                    endpoint.offset = find_word_start(endpoint_line, endpoint.offset);
                }
            }
            _ => {
                if forward {
                    anchor.offset = 0;
                    endpoint.offset = self.buffer.line_length(endpoint.line);
                } else {
                    anchor.offset = self.buffer.line_length(anchor.line);
                    endpoint.offset = 0;
                }
            }
        }

        self.selection = Selection::new(anchor, endpoint);
        self.preferred_offset = None;
    }
}

// =============================================================================
// Editing Operations
// =============================================================================

impl EditorSession {
    /// Replace the selection with `text`, re-split into lines, and re-indent
    /// from the edit point to the end of the document.
    pub fn replace_selection(&mut self, text: &str) {
        self.replace_selection_at(text, Instant::now());
    }

    /// [`replace_selection`](Self::replace_selection) with an explicit clock,
    /// for hosts that drive their own time
    pub fn replace_selection_at(&mut self, text: &str, now: Instant) {
        self.begin_edit(now);
        self.splice_selection(text);
    }

    /// Replace the selection without touching undo history
    fn splice_selection(&mut self, text: &str) {
        let text = normalize_line_endings(text);
        self.selection.clamp(&self.buffer);

        if self.selection.is_extended() {
            self.delete_selection();
        }

        let edit_line = self.selection.anchor.line;
        if !text.is_empty() {
            self.insert_at_caret(&text);
        }

        let last_line = self.buffer.line_count() - 1;
        reindent_lines(
            &mut self.buffer,
            &mut self.selection,
            edit_line,
            last_line,
            self.settings.max_indent,
        );
        self.selection.clamp(&self.buffer);

        self.preferred_offset = None;
        self.revision += 1;
        tracing::debug!(
            inserted = text.len(),
            caret = %self.selection.endpoint,
            lines = self.buffer.line_count(),
            "replaced selection"
        );
    }

    /// Store an undo entry unless this edit coalesces with the previous one
    fn begin_edit(&mut self, now: Instant) {
        let new_unit = match self.last_edit {
            Some(prev) => self
                .settings
                .starts_new_undo_unit(now.saturating_duration_since(prev)),
            None => true,
        };
        if new_unit {
            self.history.store(snapshot(&self.buffer, &self.selection));
            tracing::trace!(position = self.history.undo_position(), "stored undo state");
        }
        self.last_edit = Some(now);
    }

    /// Remove the extended selection and collapse to its first end.
    ///
    /// Offsets that do not fit the buffer abort the splice with an error log
    /// and leave the buffer untouched.
    fn delete_selection(&mut self) {
        let (first, last) = self.selection.normalized();
        let (Some(first_text), Some(last_text)) =
            (self.buffer.get(first.line), self.buffer.get(last.line))
        else {
            tracing::error!(%first, %last, "selection lines out of range; splice skipped");
            return;
        };
        if first.offset > char_len(first_text) || last.offset > char_len(last_text) {
            tracing::error!(
                %first,
                %last,
                first_len = char_len(first_text),
                last_len = char_len(last_text),
                "selection offsets out of range; splice skipped"
            );
            return;
        }

        let (prefix, _) = split_at_char(first_text, first.offset);
        let (_, suffix) = split_at_char(last_text, last.offset);
        let merged = format!("{prefix}{suffix}");
        self.buffer.set_line(first.line, merged);

        for line in (first.line + 1..=last.line).rev() {
            self.buffer.remove_line(line);
        }
        self.selection = Selection::collapsed(first);
    }

    /// Insert already-normalized text at the collapsed caret
    fn insert_at_caret(&mut self, text: &str) {
        let mut caret = self.selection.anchor;
        let fragments: Vec<&str> = text.split('\n').collect();
        let count = fragments.len();

        for (i, fragment) in fragments.into_iter().enumerate() {
            // Carried-over indentation is discarded; re-indent restores it
            let fragment = if i > 0 { fragment.trim_start() } else { fragment };
            let Some((before, after)) = self.buffer.split_line(caret.line, caret.offset) else {
                tracing::error!(caret = %caret, "caret line out of range; insert stopped");
                break;
            };

            if i + 1 < count {
                let head = format!("{before}{fragment}");
                let tail = after.to_string();
                self.buffer.set_line(caret.line, head);
                self.buffer.insert_line(caret.line + 1, tail);
                caret = TextPosition::new(caret.line + 1, 0);
            } else {
                let offset = char_len(before) + char_len(fragment);
                let merged = format!("{before}{fragment}{after}");
                self.buffer.set_line(caret.line, merged);
                caret.offset = offset;
            }
        }
        self.selection = Selection::collapsed(caret);
    }

    /// Backspace. With a collapsed caret at or inside the leading indentation,
    /// removes the indentation and the preceding line break in one step.
    pub fn delete_backward(&mut self) {
        self.selection.clamp(&self.buffer);
        if self.selection.is_extended() {
            self.replace_selection("");
            return;
        }

        let caret = self.selection.anchor;
        if caret == TextPosition::zero() {
            return;
        }

        let line = self.buffer.get(caret.line).unwrap_or_default();
        let target = if self.settings.backspace_joins_indentation
            && caret.offset <= indentation(line)
        {
            if caret.line > 0 {
                TextPosition::new(caret.line - 1, self.buffer.line_length(caret.line - 1))
            } else {
                TextPosition::zero()
            }
        } else {
            let mut pos = caret;
            advance_one(&self.buffer, &mut pos, Direction::Backward);
            pos
        };

        self.selection = Selection::new(caret, target);
        self.replace_selection("");
    }

    /// Forward delete: the selection, or the char (or line break) after the caret
    pub fn delete_forward(&mut self) {
        self.selection.clamp(&self.buffer);
        if self.selection.is_extended() {
            self.replace_selection("");
            return;
        }

        let caret = self.selection.anchor;
        let mut target = caret;
        if advance_one(&self.buffer, &mut target, Direction::Forward) {
            self.selection = Selection::new(caret, target);
            self.replace_selection("");
        }
    }

    /// Insert a line break; if a block above is still open, also insert its
    /// closer on the following line and leave the caret on the new line.
    /// Undoes as one step.
    pub fn insert_smart_newline(&mut self) {
        self.begin_edit(Instant::now());
        self.splice_selection("\n");

        let caret = self.selection.anchor;
        if let Some(kind) = find_default_ender(&self.buffer, caret.line) {
            self.splice_selection(&format!("\n{}", kind.closer()));
            self.set_caret(caret);
            tracing::debug!(closer = kind.closer(), "inserted block closer");
        }
    }

    /// Add `levels` leading tabs to every selected line, or strip up to
    /// `-levels` leading tabs/spaces. The selection then covers those lines.
    pub fn indent(&mut self, levels: i32) {
        if levels == 0 {
            return;
        }
        self.begin_edit(Instant::now());
        self.selection.clamp(&self.buffer);
        let (first, last) = self.selection.normalized();

        for line_num in first.line..=last.line {
            let Some(line) = self.buffer.get(line_num) else {
                break;
            };
            let updated = if levels > 0 {
                let tabs = (levels as usize).min(self.settings.max_indent);
                let mut out = "\t".repeat(tabs);
                out.push_str(line);
                out
            } else {
                let mut rest = line;
                for _ in 0..levels.unsigned_abs() {
                    match rest.strip_prefix(is_whitespace) {
                        Some(stripped) => rest = stripped,
                        None => break,
                    }
                }
                rest.to_string()
            };
            self.buffer.set_line(line_num, updated);
        }

        self.selection = Selection::new(
            TextPosition::new(first.line, 0),
            TextPosition::new(last.line, self.buffer.line_length(last.line)),
        );
        self.preferred_offset = None;
        self.revision += 1;
    }

    /// Restore the previous undo state. Returns false when there is nothing
    /// to undo.
    pub fn undo(&mut self) -> bool {
        let buffer = &self.buffer;
        let selection = &self.selection;
        match self.history.undo(|| snapshot(buffer, selection)) {
            Some(state) => {
                self.restore(state);
                true
            }
            None => false,
        }
    }

    /// Re-apply an undone state. Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(state) => {
                self.restore(state);
                true
            }
            None => false,
        }
    }

    fn restore(&mut self, state: UndoState) {
        self.buffer = LineBuffer::from_text(&state.source);
        self.selection = Selection::new(state.anchor, state.endpoint);
        self.selection.clamp(&self.buffer);
        self.preferred_offset = None;
        // The next edit must start its own undo entry
        self.last_edit = None;
        self.revision += 1;
        tracing::debug!(position = self.history.undo_position(), "restored undo state");
    }

    /// Copy the selected text to the clipboard. Returns false when nothing is selected.
    pub fn copy(&self, clipboard: &mut dyn Clipboard) -> bool {
        if !self.selection.is_extended() {
            return false;
        }
        clipboard.set_text(self.selected_text());
        true
    }

    /// Copy the selection to the clipboard and delete it
    pub fn cut(&mut self, clipboard: &mut dyn Clipboard) -> bool {
        if !self.copy(clipboard) {
            return false;
        }
        self.replace_selection("");
        true
    }

    /// Replace the selection with the clipboard text
    pub fn paste(&mut self, clipboard: &mut dyn Clipboard) -> bool {
        match clipboard.get_text() {
            Some(text) => {
                self.replace_selection(&text);
                true
            }
            None => false,
        }
    }

    /// Apply one input intent. Returns true if the buffer or selection changed.
    pub fn apply(&mut self, intent: EditIntent, clipboard: &mut dyn Clipboard) -> bool {
        let before = crate::tracing::SelectionSnapshot::from_session(self);
        let revision = self.revision;

        let handled = match intent {
            EditIntent::Move { target, extend } => {
                self.move_caret(target, extend);
                true
            }
            EditIntent::SetSelection { anchor, endpoint } => {
                self.set_selection(anchor, endpoint);
                true
            }
            EditIntent::ExtendSelection {
                click_count,
                forward,
            } => {
                self.extend_selection(click_count, forward);
                true
            }
            EditIntent::SelectAll => {
                self.select_all();
                true
            }
            EditIntent::InsertText(text) => {
                self.replace_selection(&text);
                true
            }
            EditIntent::SmartNewline => {
                self.insert_smart_newline();
                true
            }
            EditIntent::DeleteBackward => {
                self.delete_backward();
                true
            }
            EditIntent::DeleteForward => {
                self.delete_forward();
                true
            }
            EditIntent::Indent(levels) => {
                self.indent(levels);
                true
            }
            EditIntent::Cut => self.cut(clipboard),
            EditIntent::Copy => self.copy(clipboard),
            EditIntent::Paste => self.paste(clipboard),
            EditIntent::Undo => self.undo(),
            EditIntent::Redo => self.redo(),
        };

        let after = crate::tracing::SelectionSnapshot::from_session(self);
        if let Some(diff) = before.diff(&after) {
            tracing::trace!(target: "selection", "{}", diff);
        }
        handled && (self.revision != revision || before != after)
    }
}
