//! Automatic re-indentation driven by block keywords.
//!
//! Indentation is measured in levels; one level is one leading tab. Each line
//! is classified by [`indent_effect`] and [`reindent_lines`] walks a range
//! carrying a running level from the line above.

use super::buffer::{LineBuffer, TextBuffer};
use super::selection::Selection;
use crate::lexer::{self, Lexer, TokenKind};
use crate::util::TAB;

/// Deepest indentation the engine will write
pub const DEFAULT_MAX_INDENT: usize = 16;

/// How a line affects indentation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndentEffect {
    /// Levels this line sits to the left of the running level
    pub outdent_this: usize,
    /// Levels the following line should move right
    pub indent_next: usize,
}

/// Classify a line by its block keywords.
///
/// A lexical error ends the scan; the rest of the line has no effect.
pub fn indent_effect(line: &str) -> IndentEffect {
    let mut effect = IndentEffect::default();
    let mut lexer = Lexer::new(line);

    while !lexer.at_end() {
        let tok = lexer.next_token();
        match tok.kind {
            TokenKind::Error => break,
            TokenKind::Keyword => {}
            _ => continue,
        }

        match tok.text.as_str() {
            "if" => {
                // Only a `then` followed directly by end of line opens a block;
                // `if x then y` is a single-line conditional.
                while !lexer.at_end() && lexer.peek().kind != TokenKind::Eol {
                    let tok = lexer.next_token();
                    if tok.kind == TokenKind::Error {
                        return effect;
                    }
                    if tok.is_keyword("then") {
                        if lexer.peek().kind == TokenKind::Eol {
                            effect.indent_next += 1;
                        }
                        break;
                    }
                }
            }
            "else" | "else if" => {
                effect.outdent_this += 1;
                effect.indent_next += 1;
            }
            "while" | "for" | "function" => effect.indent_next += 1,
            text if text.starts_with("end") => {
                if effect.indent_next > 0 {
                    effect.indent_next -= 1;
                } else {
                    effect.outdent_this += 1;
                }
            }
            _ => {}
        }
    }
    effect
}

/// Number of leading tabs. A line of nothing but tabs counts all of them.
pub fn indentation(line: &str) -> usize {
    line.chars().take_while(|&c| c == TAB).count()
}

/// Number of leading whitespace chars (tabs and spaces)
pub fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|&c| lexer::is_whitespace(c)).count()
}

/// Replace the leading whitespace of `line` with `level` tabs, clamped to
/// `0..=max_indent`.
pub fn reindent(line: &str, level: isize, max_indent: usize) -> String {
    let level = written_level(level, max_indent);
    let rest = line.trim_start_matches(lexer::is_whitespace);
    let mut out = String::with_capacity(level + rest.len());
    out.extend(std::iter::repeat(TAB).take(level));
    out.push_str(rest);
    out
}

/// Number of tabs written for a running `level`
fn written_level(level: isize, max_indent: usize) -> usize {
    level.max(0).unsigned_abs().min(max_indent)
}

/// Reindent lines `from..=to` (clamped to the buffer).
///
/// The running level is seeded from the line above `from`. Selection offsets
/// on rewritten lines move with their text. Returns the number of lines
/// whose text changed.
pub fn reindent_lines(
    buffer: &mut LineBuffer,
    selection: &mut Selection,
    from: usize,
    to: usize,
    max_indent: usize,
) -> usize {
    let last = buffer.line_count().saturating_sub(1);
    let to = to.min(last);
    if from > to {
        return 0;
    }

    let mut level: isize = 0;
    if from > 0 {
        if let Some(prev) = buffer.get(from - 1) {
            level = (indentation(prev) + indent_effect(prev).indent_next) as isize;
        }
    }

    let mut changed = 0;
    for line_num in from..=to {
        let Some(line) = buffer.get(line_num) else {
            break;
        };
        let effect = indent_effect(line);
        level -= effect.outdent_this as isize;

        let rewritten = reindent(line, level, max_indent);
        if rewritten != line {
            let delta = written_level(level, max_indent) as isize
                - leading_whitespace(line) as isize;
            let new_len = crate::util::char_len(&rewritten);
            buffer.set_line(line_num, rewritten);
            changed += 1;
            for pos in [&mut selection.anchor, &mut selection.endpoint] {
                if pos.line == line_num {
                    pos.offset = pos.offset.saturating_add_signed(delta).min(new_len);
                }
            }
        }
        level += effect.indent_next as isize;
    }

    tracing::trace!(from, to, changed, "reindented lines");
    changed
}
