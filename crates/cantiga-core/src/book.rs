//! Book assembly
//!
//! A [`Book`] accumulates filtered song bodies and their category tags,
//! then writes a single document: every table of contents section first,
//! followed by the songs in the order they were added.

use std::io::Write;

use cantiga_ast::{BodyWriter, Document, Pipeline, Tree};
use tracing::{debug, info};

use crate::error::{BookError, Result};
use crate::filters::lyric_pipeline;
use crate::tags::{extract_tags, TagIndex};
use crate::toc::table_of_contents;

/// Songs and tags collected so far
pub struct Book {
    pipeline: Pipeline,
    format: String,
    tags: TagIndex,
    bodies: Vec<Vec<Tree>>,
    hidden: usize,
}

impl std::fmt::Debug for Book {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Book")
            .field("format", &self.format)
            .field("tags", &self.tags)
            .field("bodies", &self.bodies)
            .field("hidden", &self.hidden)
            .finish_non_exhaustive()
    }
}

impl Book {
    /// Create an empty book whose filters see `format` as output format
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            pipeline: lyric_pipeline(),
            format: format.into(),
            tags: TagIndex::default(),
            bodies: Vec::new(),
            hidden: 0,
        }
    }

    /// Filter a song and add it to the book.
    ///
    /// Returns `false` when the song is hidden; a hidden song contributes
    /// neither content nor tags.
    pub fn add(&mut self, name: &str, doc: Document) -> Result<bool> {
        let tags = extract_tags(&doc.body).map_err(|source| BookError::Document {
            name: name.to_string(),
            source,
        })?;
        let filtered = self
            .pipeline
            .run(doc, &self.format)
            .map_err(|source| BookError::Document {
                name: name.to_string(),
                source,
            })?;
        match filtered {
            Some(doc) => {
                debug!(
                    document = name,
                    tags = tags.len(),
                    blocks = doc.body.len(),
                    "song added"
                );
                self.tags.extend(tags);
                self.bodies.push(doc.body);
                Ok(true)
            }
            None => {
                info!(document = name, "hidden song skipped");
                self.hidden += 1;
                Ok(false)
            }
        }
    }

    pub fn tags(&self) -> &TagIndex {
        &self.tags
    }

    /// Number of songs added
    pub fn songs(&self) -> usize {
        self.bodies.len()
    }

    /// Number of hidden songs skipped
    pub fn hidden(&self) -> usize {
        self.hidden
    }

    /// Table of contents followed by every song body
    pub fn blocks(&self) -> impl Iterator<Item = Tree> + '_ {
        table_of_contents(&self.tags)
            .into_iter()
            .chain(self.bodies.iter().flatten().cloned())
    }

    /// Serialize the whole book into `out` and return the writer
    pub fn write<W: Write>(&self, out: W) -> Result<W> {
        let mut writer = BodyWriter::begin(out)?;
        writer.extend(table_of_contents(&self.tags).iter())?;
        for body in &self.bodies {
            writer.extend(body)?;
        }
        info!(
            songs = self.songs(),
            hidden = self.hidden,
            blocks = writer.written(),
            "book written"
        );
        Ok(writer.finish()?)
    }
}
