//! Table of contents fragments
//!
//! Each category gets its own section: a two-column switch, a level-1
//! header with the category title, one linked paragraph per song and a
//! page break.

use cantiga_ast::{Attr, Header, Link, Node, Target, Tree};
use tracing::debug;

use crate::category::Category;
use crate::latex::{latex_block, NEW_PAGE, TWO_COLUMN};
use crate::tags::TagIndex;

/// One song listed in a table of contents section
#[derive(Debug, Clone, PartialEq)]
pub struct TocEntry {
    /// Identifier of the song's header
    pub anchor: String,
    /// Inline content of the song's header
    pub title: Vec<Tree>,
}

impl TocEntry {
    pub fn new(anchor: impl Into<String>, title: Vec<Tree>) -> Self {
        Self {
            anchor: anchor.into(),
            title,
        }
    }
}

/// Section for one category, entries in the order given
pub fn toc_fragment(category: Category, entries: &[TocEntry]) -> Vec<Tree> {
    let title = category.title();
    let mut out = Vec::with_capacity(entries.len() + 3);
    out.push(Tree::from(latex_block(TWO_COLUMN)));
    out.push(Tree::from(
        Header::new(1, Attr::with_id(title), vec![Tree::from(Node::str(title))]).into_node(),
    ));
    for entry in entries {
        let link = Link::new(entry.title.clone(), Target::new(format!("#{}", entry.anchor)));
        out.push(Tree::from(Node::para(vec![Tree::from(link.into_node())])));
    }
    out.push(Tree::from(latex_block(NEW_PAGE)));
    out
}

/// Sections for every category with at least one song, by title
pub fn table_of_contents(index: &TagIndex) -> Vec<Tree> {
    let mut out = Vec::new();
    for category in Category::by_title() {
        let entries = index.entries(category);
        if entries.is_empty() {
            debug!(category = category.key(), "no songs, section skipped");
            continue;
        }
        out.extend(toc_fragment(category, entries));
    }
    out
}
