//! Utility modules

pub mod text;

pub use text::{byte_offset, char_len, is_token_char, split_at_char, TAB};
