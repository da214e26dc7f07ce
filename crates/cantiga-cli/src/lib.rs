//! cantiga-cli - Command-line interface for the cantiga songbook builder
//!
//! Reads every lyric sheet under a directory through the external
//! converter, assembles the book and renders it.

pub mod app;
pub mod converter;
pub mod settings;

pub use app::{build_book, markdown_files, run, run_cli, Cli};
pub use converter::{Converter, DocumentReader};
pub use settings::Settings;
