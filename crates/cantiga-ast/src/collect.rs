//! Lazy read-only traversal
//!
//! [`collect`] visits the same places as the rewriting walker but only
//! gathers visitor results. Nodes found in sequences are offered to the
//! visitor and not descended into, unregistered tagged objects found in
//! sequences are skipped whole, and everything else is descended into.
//! The traversal is an explicit depth-first cursor, so consumers that
//! stop early never touch the rest of the tree.

use std::collections::btree_map;
use std::slice;

use crate::tree::{Node, Tree};
use crate::walk::Env;

enum Frame<'a> {
    Seq(slice::Iter<'a, Tree>),
    Map(btree_map::Values<'a, String, Tree>),
}

/// Iterator returned by [`collect`] and [`collect_seq`]
pub struct Collect<'a, 'e, F> {
    stack: Vec<Frame<'a>>,
    env: Env<'e>,
    visit: F,
}

/// Collect visitor results over a tree, in document order
pub fn collect<'a, 'e, T, F>(root: &'a Tree, env: Env<'e>, visit: F) -> Collect<'a, 'e, F>
where
    F: FnMut(&'a Node, &Env<'e>) -> Option<T>,
{
    let mut cursor = Collect {
        stack: Vec::new(),
        env,
        visit,
    };
    cursor.descend(root);
    cursor
}

/// Collect visitor results over a sequence of trees
pub fn collect_seq<'a, 'e, T, F>(items: &'a [Tree], env: Env<'e>, visit: F) -> Collect<'a, 'e, F>
where
    F: FnMut(&'a Node, &Env<'e>) -> Option<T>,
{
    Collect {
        stack: vec![Frame::Seq(items.iter())],
        env,
        visit,
    }
}

impl<'a, F> Collect<'a, '_, F> {
    fn descend(&mut self, tree: &'a Tree) {
        match tree {
            Tree::List(items) => self.stack.push(Frame::Seq(items.iter())),
            Tree::Map(map) => self.stack.push(Frame::Map(map.values())),
            Tree::Node(node) => self.descend(node.content()),
            Tree::Tagged(tagged) => {
                if let Some(content) = tagged.content() {
                    self.descend(content);
                }
            }
            _ => {}
        }
    }
}

impl<'a, 'e, T, F> Iterator for Collect<'a, 'e, F>
where
    F: FnMut(&'a Node, &Env<'e>) -> Option<T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            let (item, in_seq) = match self.stack.last_mut()? {
                Frame::Seq(items) => (items.next(), true),
                Frame::Map(values) => (values.next(), false),
            };
            let Some(item) = item else {
                self.stack.pop();
                continue;
            };
            match item {
                Tree::Node(node) if in_seq => {
                    if let Some(result) = (self.visit)(node, &self.env) {
                        return Some(result);
                    }
                }
                Tree::Tagged(_) if in_seq => {}
                other => self.descend(other),
            }
        }
    }
}
