//! Tunable behavior of an editing session.

use std::time::Duration;

use super::history::DEFAULT_UNDO_LIMIT;
use super::indent::DEFAULT_MAX_INDENT;

/// Edits closer together than this share one undo entry
pub const DEFAULT_COALESCE_WINDOW: Duration = Duration::from_secs(1);

/// Settings that shape how a session edits and records history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSettings {
    /// Maximum undo entries kept
    pub undo_limit: usize,

    /// Edits within this window of the previous one merge into its undo entry
    pub coalesce_window: Duration,

    /// Deepest indentation (in tabs) the re-indenter writes
    pub max_indent: usize,

    /// Backspace at or inside the leading indentation removes the whole
    /// indentation and the preceding line break
    pub backspace_joins_indentation: bool,
}

impl Default for EditSettings {
    fn default() -> Self {
        Self {
            undo_limit: DEFAULT_UNDO_LIMIT,
            coalesce_window: DEFAULT_COALESCE_WINDOW,
            max_indent: DEFAULT_MAX_INDENT,
            backspace_joins_indentation: true,
        }
    }
}

impl EditSettings {
    /// Settings where every edit is its own undo entry
    pub fn without_coalescing() -> Self {
        Self {
            coalesce_window: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Whether an edit at `elapsed` after the previous one starts a new undo entry
    pub fn starts_new_undo_unit(&self, elapsed: Duration) -> bool {
        self.coalesce_window.is_zero() || elapsed > self.coalesce_window
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = EditSettings::default();
        assert_eq!(settings.undo_limit, 20);
        assert_eq!(settings.max_indent, 16);
        assert_eq!(settings.coalesce_window, Duration::from_secs(1));
        assert!(settings.backspace_joins_indentation);
    }

    #[test]
    fn test_coalescing_window() {
        let settings = EditSettings::default();
        assert!(!settings.starts_new_undo_unit(Duration::from_millis(300)));
        assert!(!settings.starts_new_undo_unit(Duration::from_secs(1)));
        assert!(settings.starts_new_undo_unit(Duration::from_millis(1001)));

        let eager = EditSettings::without_coalescing();
        assert!(eager.starts_new_undo_unit(Duration::ZERO));
    }
}
