//! CLI application logic
//!
//! Owns everything the conversion engine deliberately does not:
//! argument parsing, file existence checks, reading the source,
//! invoking the Markdown parser, and writing the packaged DOCX.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use md2docx_engine::{Converter, HttpImageSource};
use md2docx_ooxml::DocxWriter;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "md2docx")]
#[command(author, version, about = "Convert Markdown documents to styled DOCX files", long_about = None)]
struct Cli {
    /// Input Markdown file
    #[arg(short, long, default_value = "input.md")]
    file: PathBuf,

    /// Output DOCX file (defaults to the input name with .docx)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Layout configuration file (defaults to md2docx.toml next to the input)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
pub fn run_cli() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    render_command(&cli.file, cli.output.as_deref(), cli.config.as_deref())
}

/// Execute the render pipeline: read, parse, convert, package, write
pub fn render_command(input: &Path, output: Option<&Path>, config: Option<&Path>) -> Result<()> {
    println!("md2docx v{}", md2docx_engine::VERSION);

    if !input.exists() {
        anyhow::bail!(
            "Input file not found: {}\n\
             \n\
             Usage: md2docx --file <input.md>\n\
             Example: md2docx --file notes.md --output notes.docx",
            input.display()
        );
    }

    let is_markdown = input
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("md"))
        .unwrap_or(false);
    if !is_markdown {
        anyhow::bail!(
            "Unsupported file type: {} (only .md files are supported)",
            input.display()
        );
    }

    let config = Config::load(config, input)?;

    let output_path = match output {
        Some(p) => p.to_path_buf(),
        None => input.with_extension("docx"),
    };

    println!("  Reading: {}", input.display());
    let source = fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;

    println!("  Parsing Markdown...");
    let tree = markdown::to_mdast(&source, &markdown::ParseOptions::gfm())
        .map_err(|message| anyhow::anyhow!("Failed to parse Markdown: {}", message))?;

    println!("  Converting...");
    let images = HttpImageSource::with_timeout(Duration::from_secs(config.fetch_timeout_secs));
    let converter = Converter::with_options(&images, config.convert_options());
    let document = converter.convert(&tree);
    println!("    {} blocks converted", document.len());

    println!("  Packaging DOCX...");
    let bytes = DocxWriter::generate(&document).context("Failed to package DOCX")?;
    fs::write(&output_path, &bytes)
        .with_context(|| format!("Failed to write output file: {}", output_path.display()))?;

    println!("  Created: {} ({} bytes)", output_path.display(), bytes.len());
    Ok(())
}
