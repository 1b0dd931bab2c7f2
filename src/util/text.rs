//! Char-offset helpers for line text
//!
//! Offsets throughout the engine count `char`s, not bytes.

/// The indent unit
pub const TAB: char = '\t';

/// Number of chars in a line
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Convert a char offset to a byte offset, clamped to the end of the string
pub fn byte_offset(s: &str, char_offset: usize) -> usize {
    s.char_indices()
        .nth(char_offset)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Split a line at a char offset (clamped)
pub fn split_at_char(s: &str, char_offset: usize) -> (&str, &str) {
    s.split_at(byte_offset(s, char_offset))
}

/// Whether `c` belongs to a "word" for word-wise caret movement.
///
/// A `.` only counts once a digit has been seen, so `3.14` moves as one word
/// while `a.b` stops at the dot. `numeric` carries that state across calls.
pub fn is_token_char(c: char, numeric: &mut bool) -> bool {
    if c == '.' {
        return *numeric;
    }
    if c.is_ascii_digit() {
        *numeric = true;
        return true;
    }
    if c <= '/' || (':'..='@').contains(&c) || ('{'..='~').contains(&c) {
        return false;
    }
    // '[', '\\', ']', '^', '`' are symbols too
    !matches!(c, '[' | '\\' | ']' | '^' | '`')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_offset_utf8() {
        let s = "héllo";
        assert_eq!(byte_offset(s, 0), 0);
        assert_eq!(byte_offset(s, 2), 3);
        assert_eq!(byte_offset(s, 99), s.len());
    }

    #[test]
    fn test_split_at_char() {
        assert_eq!(split_at_char("héllo", 2), ("hé", "llo"));
        assert_eq!(split_at_char("abc", 10), ("abc", ""));
    }

    #[test]
    fn test_token_chars() {
        let mut numeric = false;
        assert!(is_token_char('a', &mut numeric));
        assert!(!is_token_char('.', &mut numeric));
        assert!(is_token_char('3', &mut numeric));
        assert!(is_token_char('.', &mut numeric));
        assert!(!is_token_char(' ', &mut numeric));
        assert!(!is_token_char('(', &mut numeric));
        assert!(!is_token_char('[', &mut numeric));
        assert!(is_token_char('_', &mut numeric));
    }
}
