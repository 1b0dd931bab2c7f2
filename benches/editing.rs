//! Benchmarks for the editing engine's hot paths
//!
//! Run with: cargo bench editing

use codepad::editable::{
    find_default_ender, find_matching_token, reindent_lines, EditSettings, EditorSession,
    LineBuffer, MoveTarget, Selection, TextPosition, DEFAULT_MAX_INDENT,
};
use codepad::lexer::tokenize;

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

fn nested_source(blocks: usize) -> String {
    let mut out = String::new();
    for i in 0..blocks {
        out.push_str(&format!(
            "function f{i}(a, b)\nif a > b then\nwhile a > 0\na = a - 1\nend while\nelse\nreturn \"b\"\nend if\nend function\n"
        ));
    }
    out
}

// ============================================================================
// Lexing
// ============================================================================

#[divan::bench]
fn tokenize_long_line(bencher: divan::Bencher) {
    let line = "x = foo(bar, \"baz\", 3.14e2) + qux[1] // trailing".repeat(4);
    bencher.bench(|| tokenize(divan::black_box(&line)));
}

// ============================================================================
// Indentation
// ============================================================================

#[divan::bench(args = [10, 100, 1000])]
fn reindent_whole_document(bencher: divan::Bencher, blocks: usize) {
    let source = nested_source(blocks);
    bencher
        .with_inputs(|| LineBuffer::from_text(&source))
        .bench_local_values(|mut buffer| {
            let mut selection = Selection::default();
            let last = buffer.lines().len() - 1;
            reindent_lines(&mut buffer, &mut selection, 0, last, DEFAULT_MAX_INDENT)
        });
}

// ============================================================================
// Editing
// ============================================================================

#[divan::bench(args = [100, 1000])]
fn insert_char_at_top(bencher: divan::Bencher, blocks: usize) {
    let source = nested_source(blocks);
    bencher
        .with_inputs(|| {
            let mut session = EditorSession::with_source(&source, EditSettings::default());
            session.set_caret(TextPosition::new(0, 0));
            session
        })
        .bench_local_values(|mut session| {
            session.replace_selection(divan::black_box("x"));
            session
        });
}

#[divan::bench]
fn smart_newline_in_deep_block(bencher: divan::Bencher) {
    let source = nested_source(200);
    bencher
        .with_inputs(|| {
            let mut session = EditorSession::with_source(&source, EditSettings::default());
            session.set_caret(TextPosition::new(900, 0));
            session.move_caret(MoveTarget::LineEnd, false);
            session
        })
        .bench_local_values(|mut session| {
            session.insert_smart_newline();
            session
        });
}

// ============================================================================
// Matching
// ============================================================================

#[divan::bench]
fn find_ender_far_below_opener(bencher: divan::Bencher) {
    let buffer = LineBuffer::from_text(&format!("while x\n{}", "y = 1\n".repeat(5_000)));
    bencher.bench(|| find_default_ender(&buffer, divan::black_box(5_000)));
}

#[divan::bench]
fn match_paren_long_line(bencher: divan::Bencher) {
    let line = format!("f({})", "g(1, 2), ".repeat(500));
    bencher.bench(|| find_matching_token(divan::black_box(&line), 1));
}
