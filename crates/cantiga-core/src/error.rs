//! Error types for book assembly

use cantiga_ast::AstError;
use thiserror::Error;

/// Result type for book operations
pub type Result<T> = std::result::Result<T, BookError>;

/// Errors that can occur while assembling a book
#[derive(Error, Debug)]
pub enum BookError {
    /// A source document could not be filtered or indexed
    #[error("Failed to process {name}: {source}")]
    Document {
        name: String,
        #[source]
        source: AstError,
    },

    /// Tree or serialization error
    #[error(transparent)]
    Ast(#[from] AstError),
}
