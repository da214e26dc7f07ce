//! External document converter
//!
//! Lyric sheets are read into legacy JSON trees by the converter, and the
//! finished book is piped back through it to produce LaTeX or PDF.

use std::ffi::OsString;
use std::io::BufWriter;
use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::{bail, Context, Result};
use cantiga_ast::Document;
use cantiga_core::Book;
use tracing::{debug, info};

use crate::settings::{ConverterSettings, RenderSettings};

/// Source of parsed lyric sheets
pub trait DocumentReader {
    /// Read one lyric sheet into a document
    fn read(&self, path: &Path) -> Result<Document>;
}

/// Converter process driven by the settings file
#[derive(Debug, Clone)]
pub struct Converter {
    settings: ConverterSettings,
}

impl Converter {
    pub fn new(settings: ConverterSettings) -> Self {
        Self { settings }
    }

    pub fn program(&self) -> &str {
        &self.settings.program
    }

    /// Arguments converting one lyric sheet to JSON
    pub fn read_args(&self, path: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["-f", self.settings.reader.as_str(), "-t", "json"]
            .into_iter()
            .map(OsString::from)
            .collect();
        args.push(path.as_os_str().to_owned());
        args
    }

    /// Arguments rendering a JSON book read from standard input
    pub fn render_args(&self, render: &RenderSettings, out: Option<&Path>) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-s".into(),
            "--template".into(),
            render.template.as_str().into(),
            "-f".into(),
            "json".into(),
            "-t".into(),
            render.writer.as_str().into(),
        ];
        for var in render.variables() {
            args.push("-V".into());
            args.push(var.into());
        }
        if let Some(out) = out {
            args.push("-o".into());
            args.push(out.as_os_str().to_owned());
        }
        args
    }

    /// Pipe the book through the converter
    pub fn render(&self, book: &Book, render: &RenderSettings, out: Option<&Path>) -> Result<()> {
        let args = self.render_args(render, out);
        debug!(program = self.program(), ?args, "spawning renderer");
        let mut child = Command::new(self.program())
            .args(&args)
            .stdin(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to run {}", self.program()))?;

        let stdin = child
            .stdin
            .take()
            .context("Renderer standard input unavailable")?;
        // The writer is dropped either way, closing the pipe before the wait.
        let sent = book.write(BufWriter::new(stdin)).map(drop);

        let status = child
            .wait()
            .with_context(|| format!("Failed to wait for {}", self.program()))?;
        if !status.success() {
            bail!("{} exited with {}", self.program(), status);
        }
        sent.with_context(|| format!("Failed to send the book to {}", self.program()))?;
        if let Some(out) = out {
            info!(output = %out.display(), "book rendered");
        }
        Ok(())
    }
}

impl DocumentReader for Converter {
    fn read(&self, path: &Path) -> Result<Document> {
        let output = Command::new(self.program())
            .args(self.read_args(path))
            .stderr(Stdio::inherit())
            .output()
            .with_context(|| format!("Failed to run {}", self.program()))?;
        if !output.status.success() {
            bail!(
                "{} failed on {} ({})",
                self.program(),
                path.display(),
                output.status
            );
        }
        Document::from_slice(&output.stdout)
            .with_context(|| format!("Failed to parse converter output for {}", path.display()))
    }
}
