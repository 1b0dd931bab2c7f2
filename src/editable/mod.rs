//! Line-oriented editing engine.
//!
//! The document is a list of lines without line terminators. A session owns
//! the buffer together with a single selection and a snapshot undo stack, and
//! re-indents the affected region after every structural edit.
//!
//! # Architecture
//!
//! - [`TextBuffer`] / [`LineBuffer`]: line storage; offsets count chars
//! - [`TextPosition`] / [`Selection`]: caret and anchor
//! - [`indent_effect`] / [`reindent_lines`]: keyword-driven automatic indentation
//! - [`find_matching_token`] / [`find_default_ender`]: bracket matching and block closers
//! - [`UndoStack`]: whole-document snapshots with coalescing by time
//! - [`EditorSession`]: the only type that mutates a document
//! - [`EditIntent`]: input events the host maps keys and mouse onto
//!
//! # Example
//!
//! ```
//! use codepad::editable::{EditSettings, EditorSession, TextPosition};
//!
//! let mut session = EditorSession::with_source("if x then", EditSettings::default());
//! session.set_caret(TextPosition::new(0, 9));
//! session.insert_smart_newline();
//!
//! assert_eq!(session.source(), "if x then\n\t\nend if");
//! ```

mod buffer;
mod clipboard;
mod cursor;
mod history;
mod indent;
mod matcher;
mod messages;
mod selection;
mod settings;
mod state;

// Re-export main types
pub use buffer::{normalize_line_endings, LineBuffer, TextBuffer};
pub use clipboard::{Clipboard, MemoryClipboard};
pub use cursor::{advance_one, Direction, TextPosition};
pub use history::{UndoStack, UndoState, DEFAULT_UNDO_LIMIT};
pub use indent::{
    indent_effect, indentation, reindent, reindent_lines, IndentEffect, DEFAULT_MAX_INDENT,
};
pub use matcher::{
    find_default_ender, find_matching_token, find_word_end, find_word_start, BlockKind, MATCHABLE,
};
pub use messages::{EditIntent, MoveTarget};
pub use selection::{Selection, SelectionEnd};
pub use settings::{EditSettings, DEFAULT_COALESCE_WINDOW};
pub use state::{EditorSession, HighlightSpan};
