//! Clipboard seam. The host supplies the real clipboard.

/// Opaque string clipboard
pub trait Clipboard {
    /// Current clipboard text, None if empty or unavailable
    fn get_text(&mut self) -> Option<String>;

    fn set_text(&mut self, text: String);
}

/// In-process clipboard, for tests and headless hosts
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    text: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn get_text(&mut self) -> Option<String> {
        self.text.clone()
    }

    fn set_text(&mut self, text: String) {
        self.text = Some(text);
    }
}
