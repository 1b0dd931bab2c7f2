//! Logging setup and selection-change diagnostics
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=selection=trace` - caret and selection changes per intent
//! - `RUST_LOG=codepad::editable=trace` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/codepad/logs/codepad.log` with daily rotation.

use std::fmt::Write as _;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::editable::{EditorSession, TextPosition};

/// Initialize tracing subscriber with console and file logging
///
/// The console respects RUST_LOG and defaults to `warn`. The file layer
/// always logs at debug level.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "codepad.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    // A second init (tests, embedding hosts) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

/// Lightweight snapshot of selection state for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSnapshot {
    pub anchor: TextPosition,
    pub endpoint: TextPosition,
    pub line_count: usize,
    pub revision: u64,
}

impl SelectionSnapshot {
    pub fn from_session(session: &EditorSession) -> Self {
        let selection = session.selection();
        Self {
            anchor: selection.anchor,
            endpoint: selection.endpoint,
            line_count: session.line_count(),
            revision: session.revision(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &SelectionSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.endpoint != other.endpoint {
            changes.push(format!("caret: ({}) → ({})", self.endpoint, other.endpoint));
        }
        if self.anchor != other.anchor {
            changes.push(format!("anchor: ({}) → ({})", self.anchor, other.anchor));
        }
        let was_extended = self.anchor != self.endpoint;
        let is_extended = other.anchor != other.endpoint;
        if was_extended != is_extended {
            let status = if is_extended { "active" } else { "cleared" };
            changes.push(format!("selection {}", status));
        }
        if self.line_count != other.line_count {
            changes.push(format!("lines: {} → {}", self.line_count, other.line_count));
        }

        if changes.is_empty() {
            return None;
        }
        let mut out = changes.join("; ");
        if self.revision != other.revision {
            let _ = write!(out, " [rev {}]", other.revision);
        }
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editable::EditSettings;

    #[test]
    fn test_diff_reports_caret_move() {
        let mut session = EditorSession::with_source("abc\ndef", EditSettings::default());
        let before = SelectionSnapshot::from_session(&session);
        session.set_caret(TextPosition::new(1, 2));
        let after = SelectionSnapshot::from_session(&session);

        let diff = before.diff(&after).unwrap();
        assert!(diff.contains("caret: (0:0) → (1:2)"));
        assert!(!diff.contains("selection"));
        assert!(before.diff(&before).is_none());
    }

    #[test]
    fn test_diff_reports_selection_status() {
        let mut session = EditorSession::with_source("abc", EditSettings::default());
        let before = SelectionSnapshot::from_session(&session);
        session.select_all();
        let after = SelectionSnapshot::from_session(&session);
        assert!(before.diff(&after).unwrap().contains("selection active"));
        assert!(after.diff(&before).unwrap().contains("selection cleared"));
    }
}
