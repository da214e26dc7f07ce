//! cantiga-core - Songbook assembly from tagged lyric sheets
//!
//! Lyric sheets are markdown files whose headers carry category classes
//! (`{.angola}`, `{.ladainha}`, ...). This crate filters each converted
//! sheet for print, indexes its categories and builds a table of contents
//! grouped by category.
//!
//! # Example
//!
//! ```
//! use cantiga_ast::Document;
//! use cantiga_core::Book;
//!
//! let json = br#"[{"unMeta": {}}, [
//!     {"t": "Header", "c": [1, ["intro", ["angola"], []], [{"t": "Str", "c": "Intro"}]]}
//! ]]"#;
//! let mut book = Book::new("latex");
//! book.add("intro.md", Document::from_slice(json).unwrap()).unwrap();
//! assert_eq!(book.tags().len(), 1);
//! ```

pub mod book;
pub mod category;
pub mod error;
pub mod filters;
pub mod latex;
pub mod tags;
pub mod toc;

// Re-export main types and functions
pub use book::Book;
pub use category::Category;
pub use error::{BookError, Result};
pub use filters::lyric_pipeline;
pub use tags::{extract_tags, TagIndex, TagRecord};
pub use toc::{table_of_contents, toc_fragment, TocEntry};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
