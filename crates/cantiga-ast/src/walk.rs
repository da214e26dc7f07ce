//! Rewriting tree walker
//!
//! [`walk`] rebuilds a tree depth-first. Every [`Node`] found as an element
//! of a sequence is offered to the visitor, which answers with a
//! [`Rewrite`]:
//!
//! - [`Rewrite::Keep`] keeps the node and keeps walking into its content
//! - [`Rewrite::Replace`] splices zero or more trees in place of the node;
//!   each replacement has its content walked, but is not itself revisited
//! - [`Rewrite::Remove`] drops the node
//!
//! Mappings are walked through their values, nodes outside sequences
//! and unregistered tagged objects through their content, and scalars
//! are returned unchanged.

use crate::error::Result;
use crate::tree::{Node, Tree};

static NO_META: Tree = Tree::Null;

/// Context handed to every visitor: output format and document metadata
#[derive(Debug, Clone, Copy)]
pub struct Env<'a> {
    pub format: &'a str,
    pub meta: &'a Tree,
}

impl<'a> Env<'a> {
    pub fn new(format: &'a str, meta: &'a Tree) -> Self {
        Self { format, meta }
    }
}

impl Default for Env<'_> {
    fn default() -> Self {
        Env {
            format: "",
            meta: &NO_META,
        }
    }
}

/// What to do with a visited node
#[derive(Debug, Clone, PartialEq)]
pub enum Rewrite {
    /// Leave the node in place
    Keep,
    /// Splice these trees in place of the node
    Replace(Vec<Tree>),
    /// Drop the node
    Remove,
}

impl Rewrite {
    /// Replace the node with exactly one tree
    pub fn with(tree: impl Into<Tree>) -> Self {
        Rewrite::Replace(vec![tree.into()])
    }
}

/// Rewrite a tree
pub fn walk<F>(tree: Tree, env: &Env<'_>, visit: &mut F) -> Result<Tree>
where
    F: FnMut(&Node, &Env<'_>) -> Result<Rewrite>,
{
    match tree {
        Tree::List(items) => walk_seq(items, env, visit).map(Tree::List),
        Tree::Map(map) => {
            let mut out = std::collections::BTreeMap::new();
            for (key, value) in map {
                out.insert(key, walk(value, env, visit)?);
            }
            Ok(Tree::Map(out))
        }
        Tree::Node(node) => walk_content(node, env, visit).map(Tree::Node),
        Tree::Tagged(tagged) => tagged
            .map_content(|content| walk(content, env, visit))
            .map(Tree::Tagged),
        scalar => Ok(scalar),
    }
}

/// Rewrite a sequence, offering each node element to the visitor
pub fn walk_seq<F>(items: Vec<Tree>, env: &Env<'_>, visit: &mut F) -> Result<Vec<Tree>>
where
    F: FnMut(&Node, &Env<'_>) -> Result<Rewrite>,
{
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        let Tree::Node(node) = item else {
            out.push(walk(item, env, visit)?);
            continue;
        };
        match visit(&node, env)? {
            Rewrite::Keep => out.push(Tree::Node(walk_content(node, env, visit)?)),
            Rewrite::Remove => {}
            Rewrite::Replace(replacements) => {
                for replacement in replacements {
                    out.push(walk(replacement, env, visit)?);
                }
            }
        }
    }
    Ok(out)
}

fn walk_content<F>(node: Node, env: &Env<'_>, visit: &mut F) -> Result<Node>
where
    F: FnMut(&Node, &Env<'_>) -> Result<Rewrite>,
{
    node.map_content(|content| walk(content, env, visit))
}
