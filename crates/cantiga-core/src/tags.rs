//! Category tags found on song headers

use std::collections::HashMap;

use cantiga_ast::{Env, Header, Result, Tree};

use crate::category::Category;
use crate::filters::headers;
use crate::toc::TocEntry;

/// A header tagged with a known category
#[derive(Debug, Clone, PartialEq)]
pub struct TagRecord {
    pub category: Category,
    /// Header identifier, the link target in the table of contents
    pub anchor: String,
    /// Header inline content
    pub title: Vec<Tree>,
}

/// Tag records for every category class on every header of a body.
///
/// A header classed with several categories yields one record per
/// category, in class order.
pub fn extract_tags(body: &[Tree]) -> Result<Vec<TagRecord>> {
    let mut tags = Vec::new();
    for node in headers(body, Env::default()) {
        let header = Header::decode(node)?;
        for class in &header.attr.classes {
            if let Some(category) = Category::from_key(class) {
                tags.push(TagRecord {
                    category,
                    anchor: header.attr.id.clone(),
                    title: header.inlines.clone(),
                });
            }
        }
    }
    Ok(tags)
}

/// Table of contents entries grouped by category, in discovery order
#[derive(Debug, Default)]
pub struct TagIndex {
    entries: HashMap<Category, Vec<TocEntry>>,
}

impl TagIndex {
    pub fn record(&mut self, tag: TagRecord) {
        self.entries
            .entry(tag.category)
            .or_default()
            .push(TocEntry::new(tag.anchor, tag.title));
    }

    pub fn extend(&mut self, tags: impl IntoIterator<Item = TagRecord>) {
        for tag in tags {
            self.record(tag);
        }
    }

    /// Entries for a category; empty if none were recorded
    pub fn entries(&self, category: Category) -> &[TocEntry] {
        self.entries
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of entries
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
