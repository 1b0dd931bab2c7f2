//! Bracket, quote and block-closer matching tests

use codepad::editable::{
    find_default_ender, find_matching_token, find_word_end, find_word_start, BlockKind,
    LineBuffer,
};

// ========================================================================
// find_matching_token
// ========================================================================

#[test]
fn test_nested_parens_match_both_ways() {
    let line = "foo(bar(1))";
    assert_eq!(find_matching_token(line, 3), Some(10));
    assert_eq!(find_matching_token(line, 10), Some(3));
    assert_eq!(find_matching_token(line, 7), Some(9));
}

#[test]
fn test_square_brackets() {
    let line = "a[b[0]] = 1";
    assert_eq!(find_matching_token(line, 1), Some(6));
    assert_eq!(find_matching_token(line, 5), Some(3));
}

#[test]
fn test_parens_ignore_square_brackets() {
    assert_eq!(find_matching_token("f([)]", 1), Some(3));
}

#[test]
fn test_unbalanced_returns_none() {
    assert_eq!(find_matching_token("foo(bar", 3), None);
    assert_eq!(find_matching_token("bar)", 3), None);
}

#[test]
fn test_non_matchable_returns_none() {
    assert_eq!(find_matching_token("abc", 1), None);
    assert_eq!(find_matching_token("abc", 10), None);
}

#[test]
fn test_quotes_pair_in_order() {
    let line = "x = \"a\" + \"b\"";
    assert_eq!(find_matching_token(line, 4), Some(6));
    assert_eq!(find_matching_token(line, 6), Some(4));
    assert_eq!(find_matching_token(line, 10), Some(12));
    assert_eq!(find_matching_token(line, 12), Some(10));
}

#[test]
fn test_unclosed_quote_returns_none() {
    assert_eq!(find_matching_token("say \"hi", 4), None);
}

#[test]
fn test_matching_counts_chars_not_bytes() {
    let line = "é(ü)";
    assert_eq!(find_matching_token(line, 1), Some(3));
}

// ========================================================================
// Word boundaries
// ========================================================================

#[test]
fn test_word_bounds() {
    let line = "call my_func(x)";
    assert_eq!(find_word_start(line, 8), 5);
    assert_eq!(find_word_end(line, 8), 12);
    assert_eq!(find_word_start(line, 4), 0);
    assert_eq!(find_word_end(line, 4), 4);
}

// ========================================================================
// find_default_ender
// ========================================================================

fn ender(text: &str, line: usize) -> Option<BlockKind> {
    find_default_ender(&LineBuffer::from_text(text), line)
}

#[test]
fn test_ender_after_lone_closer_is_none() {
    assert_eq!(ender("end while", 1), None);
}

#[test]
fn test_ender_for_each_opener() {
    assert_eq!(ender("while x", 1), Some(BlockKind::While));
    assert_eq!(ender("for i in a", 1), Some(BlockKind::For));
    assert_eq!(ender("f = function(a)", 1), Some(BlockKind::Function));
    assert_eq!(ender("if a then", 1), Some(BlockKind::If));
}

#[test]
fn test_ender_ignores_single_line_if() {
    assert_eq!(ender("if a then b = 1", 1), None);
}

#[test]
fn test_ender_skips_closed_inner_block() {
    let text = "function f()\n\twhile x\n\tend while\n";
    assert_eq!(ender(text, 3), Some(BlockKind::Function));
}

#[test]
fn test_ender_inside_else_branch() {
    let text = "if a then\n\tx\nelse\n";
    assert_eq!(ender(text, 3), Some(BlockKind::If));
}

#[test]
fn test_ender_closed_if_with_else() {
    let text = "while w\n\tif a then\n\t\tx\n\telse\n\t\ty\n\tend if\n";
    assert_eq!(ender(text, 6), Some(BlockKind::While));
}

#[test]
fn test_ender_at_line_zero_is_none() {
    assert_eq!(ender("while x", 0), None);
}

#[test]
fn test_block_kind_closers() {
    assert_eq!(BlockKind::If.closer(), "end if");
    assert_eq!(BlockKind::While.to_string(), "end while");
    assert_eq!(BlockKind::Function.closer(), "end function");
}
