//! codepad - line-oriented code editing engine
//!
//! This crate provides a tolerant single-line lexer, keyword-driven automatic
//! indentation, bracket and block matching, and an editing session with
//! selection handling and snapshot undo/redo. Rendering, input mapping and
//! the system clipboard belong to the host.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod editable;
pub mod lexer;
pub mod tracing;
pub mod util;

// Re-export commonly used types
pub use config::EditorConfig;
pub use editable::{EditIntent, EditSettings, EditorSession, Selection, TextPosition};
pub use lexer::{Token, TokenKind};
