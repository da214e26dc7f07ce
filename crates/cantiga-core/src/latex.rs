//! LaTeX payloads injected into the tree
//!
//! The renderer's template interprets these raw snippets; the pipeline
//! treats them as opaque strings.

use cantiga_ast::{AstError, Node};

pub const TWO_COLUMN: &str = "\\twocolumn";
pub const ONE_COLUMN: &str = "\\onecolumn";
pub const NEW_PAGE: &str = "\\newpage";
pub const SAME_PAGE_ENV: &str = "samepage";
pub const FOOTER_OPEN: &str = "\\rfoot{{\\footnotesize ";
pub const FOOTER_CLOSE: &str = "}}";
pub const BADGE_PREFIX: &str = "\\newline\\tiny\\color{black!55}";

/// Raw LaTeX block
pub fn latex_block(text: impl Into<String>) -> Node {
    Node::raw_block("latex", text)
}

/// Raw TeX inline
pub fn tex_inline(text: impl Into<String>) -> Node {
    Node::raw_inline("tex", text)
}

/// Page layout selected by a header's `columns` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Columns {
    One,
    #[default]
    Two,
}

impl Columns {
    pub const ATTRIBUTE: &'static str = "columns";

    /// Parse an attribute value; only `"1"` and `"2"` are accepted
    pub fn parse(value: &str) -> Result<Columns, AstError> {
        match value {
            "1" => Ok(Columns::One),
            "2" => Ok(Columns::Two),
            other => Err(AstError::Config {
                attribute: Columns::ATTRIBUTE.to_string(),
                value: other.to_string(),
            }),
        }
    }

    /// Raw block switching the page to this layout
    pub fn marker(self) -> Node {
        latex_block(match self {
            Columns::One => ONE_COLUMN,
            Columns::Two => TWO_COLUMN,
        })
    }
}
