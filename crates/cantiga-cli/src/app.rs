//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use cantiga_core::Book;
use clap::Parser;
use glob::{glob, Pattern};
use tracing::{info, warn};

use crate::converter::{Converter, DocumentReader};
use crate::settings::Settings;

/// Format that skips the renderer and prints the merged tree
pub const JSON_FORMAT: &str = "json";

#[derive(Parser, Debug)]
#[command(name = "cantiga")]
#[command(author, version, about = "Build a songbook from tagged lyric sheets", long_about = None)]
pub struct Cli {
    /// Directory of lyric sheets (*.md, searched recursively)
    pub path: PathBuf,

    /// Output format; `json` prints the merged document to stdout
    #[arg(short, long, default_value = "pdf")]
    pub to: String,

    /// Output file handed to the renderer
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Settings file (defaults to cantiga.toml in the input directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Run the CLI application
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(&cli)
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Build the book described by `cli` and emit it
pub fn run(cli: &Cli) -> Result<()> {
    if !cli.path.exists() {
        bail!("Input path not found: {}", cli.path.display());
    }
    let settings = Settings::discover(&cli.path, cli.config.as_deref())?;
    let converter = Converter::new(settings.converter.clone());
    let book = build_book(&cli.path, &cli.to, &converter)?;

    if cli.to == JSON_FORMAT {
        let stdout = io::stdout().lock();
        book.write(BufWriter::new(stdout))
            .context("Failed to write book to stdout")?;
    } else {
        converter.render(&book, &settings.render, cli.out.as_deref())?;
    }
    Ok(())
}

/// Read and filter every lyric sheet under `root`
pub fn build_book(root: &Path, format: &str, reader: &impl DocumentReader) -> Result<Book> {
    let files = markdown_files(root)?;
    if files.is_empty() {
        warn!(path = %root.display(), "no lyric sheets found");
    }
    let mut book = Book::new(format);
    for path in &files {
        let doc = reader.read(path)?;
        book.add(&path.display().to_string(), doc)?;
    }
    info!(
        songs = book.songs(),
        hidden = book.hidden(),
        tags = book.tags().len(),
        "book assembled"
    );
    Ok(book)
}

/// Markdown files under `root`, recursively, in path order.
///
/// A single file is returned as is.
pub fn markdown_files(root: &Path) -> Result<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }
    let base = root
        .to_str()
        .with_context(|| format!("Path is not valid UTF-8: {}", root.display()))?;
    let pattern = format!("{}/**/*.md", Pattern::escape(base.trim_end_matches('/')));

    let mut files = Vec::new();
    for entry in glob(&pattern).with_context(|| format!("Invalid search pattern: {}", pattern))? {
        let path = entry.context("Failed to read directory entry")?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
