//! Command-line argument parsing for the codepad tool
//!
//! Supports:
//! - Re-indenting a file with the editor's indentation rules
//! - Asking which block closer a smart newline would insert
//! - Finding the partner of a bracket or quote

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::EditorConfig;
use crate::editable::{
    find_default_ender, find_matching_token, reindent_lines, LineBuffer, Selection, TextBuffer,
};

/// Headless front end for the codepad editing engine
#[derive(Parser, Debug)]
#[command(name = "codepad", version, about = "Headless front end for the codepad editing engine")]
pub struct CliArgs {
    /// Config file to use instead of ~/.config/codepad/config.yaml
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Print the file re-indented
    Reindent {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Print the closer a smart newline at the given line would insert
    Ender {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// 1-indexed line the new line is inserted at
        #[arg(long, value_name = "N")]
        line: usize,
    },
    /// Print the offset of the bracket or quote matching the one at a position
    Match {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// 1-indexed line
        #[arg(long, value_name = "N")]
        line: usize,
        /// 0-indexed char offset within the line
        #[arg(long, value_name = "N")]
        offset: usize,
    },
}

impl CliCommand {
    pub fn file(&self) -> &PathBuf {
        match self {
            CliCommand::Reindent { file }
            | CliCommand::Ender { file, .. }
            | CliCommand::Match { file, .. } => file,
        }
    }

    /// Run against already-loaded source text, returning what to print
    pub fn run(&self, source: &str, config: &EditorConfig) -> Result<String, String> {
        match self {
            CliCommand::Reindent { .. } => Ok(reindent_source(source, config.max_indent)),
            CliCommand::Ender { line, .. } => {
                let buffer = LineBuffer::from_text(source);
                let line_0 = line.saturating_sub(1);
                Ok(find_default_ender(&buffer, line_0)
                    .map(|kind| kind.closer().to_string())
                    .unwrap_or_default())
            }
            CliCommand::Match { line, offset, .. } => {
                let buffer = LineBuffer::from_text(source);
                let line_0 = line.saturating_sub(1);
                let text = buffer
                    .get(line_0)
                    .ok_or_else(|| format!("Line {} is past the end of the file", line))?;
                find_matching_token(text, *offset)
                    .map(|m| m.to_string())
                    .ok_or_else(|| format!("No match for position {}:{}", line, offset))
            }
        }
    }
}

/// Re-indent every line of `source`
pub fn reindent_source(source: &str, max_indent: usize) -> String {
    let mut buffer = LineBuffer::from_text(source);
    let mut selection = Selection::default();
    let last = buffer.line_count() - 1;
    let changed = reindent_lines(&mut buffer, &mut selection, 0, last, max_indent);
    tracing::debug!(changed, "re-indented source");
    buffer.content()
}
