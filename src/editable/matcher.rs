//! Read-only queries over lines: word bounds, bracket/quote matching and
//! block-closer lookup.
//!
//! Matching is deliberately single-line; nothing here looks across line
//! breaks except [`find_default_ender`], which walks whole lines upward.

use std::collections::VecDeque;
use std::fmt;

use super::buffer::TextBuffer;
use crate::lexer::{is_identifier_char, Lexer, TokenKind};

/// Chars that [`find_matching_token`] knows how to pair
pub const MATCHABLE: &[char] = &['(', ')', '[', ']', '"'];

/// A block that must be closed with an `end …` keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    If,
    While,
    For,
    Function,
}

impl BlockKind {
    /// The keyword that closes this block
    pub fn closer(self) -> &'static str {
        match self {
            BlockKind::If => "end if",
            BlockKind::While => "end while",
            BlockKind::For => "end for",
            BlockKind::Function => "end function",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.closer())
    }
}

/// Start of the word containing or ending at `pos`
pub fn find_word_start(line: &str, pos: usize) -> usize {
    let chars: Vec<char> = line.chars().collect();
    let mut pos = pos.min(chars.len());
    while pos > 0 && is_identifier_char(chars[pos - 1]) {
        pos -= 1;
    }
    pos
}

/// End of the word containing or starting at `pos`
pub fn find_word_end(line: &str, pos: usize) -> usize {
    let chars: Vec<char> = line.chars().collect();
    let mut pos = pos.min(chars.len());
    while pos < chars.len() && is_identifier_char(chars[pos]) {
        pos += 1;
    }
    pos
}

/// Offset of the paren, bracket or quote that pairs with the one at `pos`.
///
/// Returns None when `pos` is not on a matchable char or the pair is not
/// closed on this line.
pub fn find_matching_token(line: &str, pos: usize) -> Option<usize> {
    let chars: Vec<char> = line.chars().collect();
    let tok = *chars.get(pos)?;

    match tok {
        '(' | '[' => {
            let close = if tok == '(' { ')' } else { ']' };
            let mut depth = 1;
            for (i, &c) in chars.iter().enumerate().skip(pos + 1) {
                if c == tok {
                    depth += 1;
                } else if c == close {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i);
                    }
                }
            }
            None
        }
        ')' | ']' => {
            let open = if tok == ')' { '(' } else { '[' };
            let mut depth = 1;
            for i in (0..pos).rev() {
                let c = chars[i];
                if c == tok {
                    depth += 1;
                } else if c == open {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i);
                    }
                }
            }
            None
        }
        '"' => {
            // Openers and closers look the same, so walk the whole line
            // tracking whether a string is open. `""` is an escaped quote.
            let mut open = false;
            let mut last_quote = None;
            let mut i = 0;
            while i < chars.len() {
                if chars[i] == '"' {
                    if chars.get(i + 1) == Some(&'"') {
                        i += 2;
                        continue;
                    }
                    if open && i == pos {
                        return last_quote;
                    }
                    if open && i > pos {
                        return Some(i);
                    }
                    open = !open;
                    last_quote = Some(i);
                }
                i += 1;
            }
            None
        }
        _ => None,
    }
}

/// Find the closer for the nearest block still open above `line`.
///
/// Walks upward from `line - 1`, queueing `end …` keywords seen on the way.
/// An opener whose closer is at the front of the queue is already closed and
/// consumes it; the first opener that cannot consume one is the answer.
/// `else` implies an open `if` but does not consume a queued `end if`.
pub fn find_default_ender<B: TextBuffer + ?Sized>(buffer: &B, line: usize) -> Option<BlockKind> {
    let mut closers: VecDeque<String> = VecDeque::new();

    for line_num in (0..line.min(buffer.line_count())).rev() {
        let Some(text) = buffer.line(line_num) else {
            continue;
        };
        let mut lexer = Lexer::new(&text);
        let mut on_if_statement = false;

        while !lexer.at_end() {
            let tok = lexer.next_token();
            if tok.kind == TokenKind::Error {
                break;
            }
            if tok.kind != TokenKind::Keyword {
                continue;
            }

            let opened = match tok.text.as_str() {
                t if t.starts_with("end ") => {
                    closers.push_back(tok.text.clone());
                    None
                }
                "while" => Some(BlockKind::While),
                "for" => Some(BlockKind::For),
                "function" => Some(BlockKind::Function),
                "if" => {
                    on_if_statement = true;
                    None
                }
                "then" if on_if_statement => {
                    // Anything after `then` makes it a single-line if
                    if lexer.peek().kind == TokenKind::Eol {
                        Some(BlockKind::If)
                    } else {
                        None
                    }
                }
                "else" | "else if" => {
                    on_if_statement = false;
                    if closers.front().map(String::as_str) != Some(BlockKind::If.closer()) {
                        return Some(BlockKind::If);
                    }
                    None
                }
                _ => None,
            };

            if let Some(kind) = opened {
                if kind != BlockKind::If {
                    on_if_statement = false;
                }
                if closers.front().map(String::as_str) == Some(kind.closer()) {
                    closers.pop_front();
                } else {
                    return Some(kind);
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editable::buffer::LineBuffer;

    #[test]
    fn test_word_bounds() {
        let line = "x = foo_bar + 1";
        assert_eq!(find_word_start(line, 7), 4);
        assert_eq!(find_word_end(line, 7), 11);
        assert_eq!(find_word_start(line, 4), 4);
        assert_eq!(find_word_end(line, 11), 11);
        assert_eq!(find_word_end(line, 99), 15);
    }

    #[test]
    fn test_matching_parens() {
        let line = "foo(bar(1))";
        assert_eq!(find_matching_token(line, 3), Some(10));
        assert_eq!(find_matching_token(line, 10), Some(3));
        assert_eq!(find_matching_token(line, 7), Some(9));
        assert_eq!(find_matching_token(line, 9), Some(7));
    }

    #[test]
    fn test_matching_brackets_ignore_parens() {
        let line = "a[(b[0])]";
        assert_eq!(find_matching_token(line, 1), Some(8));
        assert_eq!(find_matching_token(line, 8), Some(1));
    }

    #[test]
    fn test_unmatched_returns_none() {
        assert_eq!(find_matching_token("foo(bar", 3), None);
        assert_eq!(find_matching_token("bar)", 3), None);
        assert_eq!(find_matching_token("abc", 1), None);
        assert_eq!(find_matching_token("abc", 10), None);
    }

    #[test]
    fn test_matching_quotes() {
        let line = "x = \"hi\" + \"yo\"";
        assert_eq!(find_matching_token(line, 4), Some(7));
        assert_eq!(find_matching_token(line, 7), Some(4));
        assert_eq!(find_matching_token(line, 11), Some(14));
        assert_eq!(find_matching_token(line, 14), Some(11));
    }

    #[test]
    fn test_matching_quotes_skip_doubled() {
        let line = "s = \"a\"\"b\"";
        assert_eq!(find_matching_token(line, 4), Some(9));
        assert_eq!(find_matching_token(line, 9), Some(4));
    }

    #[test]
    fn test_unclosed_quote() {
        assert_eq!(find_matching_token("print \"abc", 6), None);
    }

    fn ender(text: &str, line: usize) -> Option<&'static str> {
        let buf = LineBuffer::from_text(text);
        find_default_ender(&buf, line).map(BlockKind::closer)
    }

    #[test]
    fn test_ender_for_open_blocks() {
        assert_eq!(ender("while x", 1), Some("end while"));
        assert_eq!(ender("for i in l", 1), Some("end for"));
        assert_eq!(ender("f = function()", 1), Some("end function"));
        assert_eq!(ender("if x then", 1), Some("end if"));
    }

    #[test]
    fn test_ender_skips_single_line_if() {
        assert_eq!(ender("while x\n\tif y then z = 1", 2), Some("end while"));
    }

    #[test]
    fn test_ender_skips_closed_blocks() {
        let text = "for i in l\n\twhile x\n\tend while\n\tx";
        assert_eq!(ender(text, 4), Some("end for"));
    }

    #[test]
    fn test_ender_after_else() {
        let text = "if x then\n\ty\nelse";
        assert_eq!(ender(text, 3), Some("end if"));
    }

    #[test]
    fn test_else_does_not_consume_end_if() {
        let text = "while w\n\tif x then\n\t\ty\n\telse\n\t\tz\n\tend if\n\tq";
        assert_eq!(ender(text, 7), Some("end while"));
    }

    #[test]
    fn test_no_open_block() {
        assert_eq!(ender("end while", 1), None);
        assert_eq!(ender("end while", 0), None);
        assert_eq!(ender("x = 1\ny = 2", 2), None);
    }
}
