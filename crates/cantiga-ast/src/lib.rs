//! cantiga-ast - Pandoc JSON trees and rewrite filters
//!
//! This crate provides the generic half of cantiga:
//!
//! - [`Tree`] / [`Node`]: the converter's loosely typed JSON tree, with
//!   tagged objects decoded into a closed set of node [`Kind`]s
//! - [`walk`]: depth-first rewriting with keep / replace / remove results
//! - [`collect`]: lazy read-only extraction over the same traversal
//! - [`filter`]: combinators and the [`Pipeline`] that chains them
//! - [`Document`] / [`BodyWriter`]: the `unMeta` envelope codec
//!
//! # Example
//!
//! ```
//! use cantiga_ast::filter::{all_of, is_empty, is_type, remove_if, Filter};
//! use cantiga_ast::{Document, Env, Kind, Node, Tree};
//!
//! let doc = Document::new(vec![
//!     Tree::from(Node::para(vec![])),
//!     Tree::from(Node::para(vec![Tree::from(Node::str("x"))])),
//! ]);
//! let drop_empty = remove_if(all_of(vec![is_type(Kind::Para), Box::new(is_empty)]));
//! let doc = drop_empty.apply(doc, &Env::default()).unwrap().unwrap();
//! assert_eq!(doc.body.len(), 1);
//! ```

pub mod collect;
pub mod document;
pub mod error;
pub mod filter;
pub mod kind;
pub mod payload;
pub mod tree;
pub mod walk;

pub use collect::{collect, collect_seq, Collect};
pub use document::{BodyWriter, Document};
pub use error::{AstError, Result};
pub use filter::{Filter, Pipeline, Rule};
pub use kind::{Arity, Kind};
pub use payload::{Attr, Header, Link, Target};
pub use tree::{Node, Tagged, Tree};
pub use walk::{walk, walk_seq, Env, Rewrite};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
