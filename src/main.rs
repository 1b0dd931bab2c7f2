//! codepad - headless driver for the editing engine

use anyhow::{Context, Result};
use clap::Parser;

use codepad::cli::CliArgs;
use codepad::config::EditorConfig;

fn main() -> Result<()> {
    codepad::tracing::init();

    let args = CliArgs::parse();

    let config = match &args.config {
        Some(path) => EditorConfig::load_from(path).map_err(anyhow::Error::msg)?,
        None => EditorConfig::load(),
    };

    let file = args.command.file();
    let source = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let output = args
        .command
        .run(&source, &config)
        .map_err(anyhow::Error::msg)?;

    tracing::debug!(file = %file.display(), "command finished");
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}
