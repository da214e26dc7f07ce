//! Document envelope and its JSON codec
//!
//! The converter speaks the legacy envelope
//! `[{"unMeta": {...}}, [block, ...]]`. Documents are decoded from it in
//! one piece, but written back incrementally through [`BodyWriter`] so
//! that many documents can be streamed into a single envelope.

use std::collections::BTreeMap;
use std::io::Write;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use crate::error::{AstError, Result};
use crate::tree::Tree;
use crate::walk::Env;

const OPEN: &[u8] = b"[{\"unMeta\": {}},[\n";
const SEPARATOR: &[u8] = b",\n";
const CLOSE: &[u8] = b"\n]]";

/// A decoded document: opaque metadata plus top-level blocks
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Contents of the `unMeta` mapping, passed through untouched
    pub meta: Tree,
    /// Top-level blocks
    pub body: Vec<Tree>,
}

impl Document {
    /// Create a document with empty metadata
    pub fn new(body: Vec<Tree>) -> Self {
        Self {
            meta: Tree::Map(BTreeMap::new()),
            body,
        }
    }

    /// Decode a document from the converter's JSON output
    pub fn from_slice(bytes: &[u8]) -> Result<Document> {
        let value: Value = serde_json::from_slice(bytes)?;
        Document::from_value(value)
    }

    /// Decode a document from an already parsed JSON value
    pub fn from_value(value: Value) -> Result<Document> {
        let Value::Array(parts) = value else {
            return Err(AstError::Parse("document is not a sequence".to_string()));
        };
        let [head, body]: [Value; 2] = parts.try_into().map_err(|parts: Vec<Value>| {
            AstError::Parse(format!(
                "document has {} top-level entries, expected 2",
                parts.len()
            ))
        })?;
        let meta = match head {
            Value::Object(mut head) => head
                .remove("unMeta")
                .ok_or_else(|| AstError::Parse("missing unMeta".to_string()))?,
            _ => return Err(AstError::Parse("metadata is not a mapping".to_string())),
        };
        let Tree::List(body) = Tree::from_json(body) else {
            return Err(AstError::Parse("body is not a sequence".to_string()));
        };
        Ok(Document {
            meta: Tree::from_json(meta),
            body,
        })
    }

    /// Visitor context for this document
    pub fn env<'a>(&'a self, format: &'a str) -> Env<'a> {
        Env::new(format, &self.meta)
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Streams blocks into a single document envelope
///
/// The envelope always carries empty metadata. Each block is written as
/// one-space-indented JSON, separated by `,\n`.
pub struct BodyWriter<W: Write> {
    out: W,
    written: usize,
}

impl<W: Write> BodyWriter<W> {
    /// Write the envelope opening
    pub fn begin(mut out: W) -> Result<Self> {
        out.write_all(OPEN)?;
        Ok(Self { out, written: 0 })
    }

    /// Append one block
    pub fn push(&mut self, tree: &Tree) -> Result<()> {
        if self.written > 0 {
            self.out.write_all(SEPARATOR)?;
        }
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut self.out, PrettyFormatter::with_indent(b" "));
        tree.serialize(&mut serializer)?;
        self.written += 1;
        Ok(())
    }

    /// Append every block of a sequence
    pub fn extend<'t>(&mut self, trees: impl IntoIterator<Item = &'t Tree>) -> Result<()> {
        for tree in trees {
            self.push(tree)?;
        }
        Ok(())
    }

    /// Number of blocks written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Close the envelope and hand back the writer
    pub fn finish(mut self) -> Result<W> {
        self.out.write_all(CLOSE)?;
        self.out.flush()?;
        Ok(self.out)
    }
}
