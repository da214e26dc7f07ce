//! Node kind registry
//!
//! Every node kind the pipeline understands is listed here together with
//! the arity of its content payload. The table is static: it is the single
//! source of truth for what a valid node of a given kind looks like.

use std::fmt;

use crate::error::{AstError, Result};
use crate::tree::{Node, Tree};

/// Tagged node kinds understood by the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    /// Section heading: `[level, attr, inlines]`
    Header,
    /// Raw block in a target format: `[format, text]`
    RawBlock,
    /// Raw inline in a target format: `[format, text]`
    RawInline,
    /// Text run: `text`
    Str,
    /// Hyperlink: `[inlines, [url, title]]`
    Link,
    /// Paragraph: `[inline, ...]`
    Para,
    /// Plain block (paragraph without spacing): `[inline, ...]`
    Plain,
    /// Inter-word space
    Space,
    /// Soft line break
    SoftBreak,
    /// Hard line break
    LineBreak,
    /// Emphasized inlines
    Emph,
    /// Strongly emphasized inlines
    Strong,
}

/// Number of content values a kind expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Any number of values, stored as a sequence
    Variadic,
    /// Exactly this many values. `Exact(1)` stores the value as-is,
    /// every other count stores a sequence.
    Exact(usize),
}

/// Registry entry for one kind
#[derive(Debug, Clone, Copy)]
pub struct KindSpec {
    pub kind: Kind,
    pub name: &'static str,
    pub arity: Arity,
}

/// The kind registry
pub static REGISTRY: &[KindSpec] = &[
    KindSpec { kind: Kind::Header, name: "Header", arity: Arity::Exact(3) },
    KindSpec { kind: Kind::RawBlock, name: "RawBlock", arity: Arity::Exact(2) },
    KindSpec { kind: Kind::RawInline, name: "RawInline", arity: Arity::Exact(2) },
    KindSpec { kind: Kind::Str, name: "Str", arity: Arity::Exact(1) },
    KindSpec { kind: Kind::Link, name: "Link", arity: Arity::Exact(2) },
    KindSpec { kind: Kind::Para, name: "Para", arity: Arity::Variadic },
    KindSpec { kind: Kind::Plain, name: "Plain", arity: Arity::Variadic },
    KindSpec { kind: Kind::Space, name: "Space", arity: Arity::Exact(0) },
    KindSpec { kind: Kind::SoftBreak, name: "SoftBreak", arity: Arity::Exact(0) },
    KindSpec { kind: Kind::LineBreak, name: "LineBreak", arity: Arity::Exact(0) },
    KindSpec { kind: Kind::Emph, name: "Emph", arity: Arity::Variadic },
    KindSpec { kind: Kind::Strong, name: "Strong", arity: Arity::Variadic },
];

impl Kind {
    /// Look up a kind by its serialized name
    pub fn from_name(name: &str) -> Option<Kind> {
        REGISTRY.iter().find(|spec| spec.name == name).map(|spec| spec.kind)
    }

    // The registry lists kinds in declaration order.
    fn spec(self) -> &'static KindSpec {
        &REGISTRY[self as usize]
    }

    /// Serialized name (`"t"` field)
    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Declared content arity
    pub fn arity(self) -> Arity {
        self.spec().arity
    }

    /// Build a node of this kind from positional content values.
    ///
    /// Fails with [`AstError::Arity`] if the number of values does not
    /// match the kind's declared arity.
    pub fn build(self, args: Vec<Tree>) -> Result<Node> {
        let content = match self.arity() {
            Arity::Variadic => Tree::List(args),
            Arity::Exact(expected) if args.len() != expected => {
                return Err(AstError::Arity {
                    kind: self,
                    expected,
                    given: args.len(),
                });
            }
            Arity::Exact(1) => args.into_iter().next().unwrap_or(Tree::Null),
            Arity::Exact(_) => Tree::List(args),
        };
        Ok(Node::from_parts(self, content))
    }

    /// Check that an already-assembled payload fits this kind's arity
    pub fn check(self, content: &Tree) -> Result<()> {
        match (self.arity(), content) {
            (Arity::Exact(1), _) => Ok(()),
            (Arity::Variadic, Tree::List(_)) => Ok(()),
            (Arity::Exact(expected), Tree::List(items)) if items.len() == expected => Ok(()),
            (Arity::Exact(expected), Tree::List(items)) => Err(AstError::Arity {
                kind: self,
                expected,
                given: items.len(),
            }),
            (_, _) => Err(AstError::shape(self, "content is not a sequence")),
        }
    }

    /// Type test usable by filters
    pub fn matches(self, node: &Node) -> bool {
        node.kind() == self
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_names_roundtrip() {
        for (index, spec) in REGISTRY.iter().enumerate() {
            assert_eq!(spec.kind as usize, index);
            assert_eq!(Kind::from_name(spec.name), Some(spec.kind));
            assert_eq!(spec.kind.name(), spec.name);
        }
        assert_eq!(Kind::from_name("BlockQuote"), None);
    }

    #[test]
    fn test_fixed_arity_rejects_wrong_count() {
        for spec in REGISTRY {
            let Arity::Exact(n) = spec.arity else {
                continue;
            };
            let too_many = vec![Tree::Null; n + 1];
            match spec.kind.build(too_many) {
                Err(AstError::Arity {
                    kind,
                    expected,
                    given,
                }) => {
                    assert_eq!(kind, spec.kind);
                    assert_eq!(expected, n);
                    assert_eq!(given, n + 1);
                }
                other => panic!("{}: expected arity error, got {:?}", spec.name, other),
            }
            if n > 0 {
                assert!(spec.kind.build(vec![Tree::Null; n - 1]).is_err());
            }
        }
    }

    #[test]
    fn test_fixed_arity_accepts_exact_count() {
        let header = Kind::Header
            .build(vec![
                Tree::from(1_i64),
                Tree::List(vec![]),
                Tree::List(vec![]),
            ])
            .unwrap();
        assert_eq!(header.kind(), Kind::Header);
        assert!(matches!(header.content(), Tree::List(items) if items.len() == 3));

        let text = Kind::Str.build(vec![Tree::from("hi")]).unwrap();
        assert_eq!(text.content(), &Tree::from("hi"));

        let space = Kind::Space.build(vec![]).unwrap();
        assert_eq!(space.content(), &Tree::List(vec![]));
    }

    #[test]
    fn test_variadic_accepts_any_count() {
        let para = Kind::Para.build(vec![]).unwrap();
        assert_eq!(para.content(), &Tree::List(vec![]));
        let para = Kind::Para
            .build(vec![Tree::from(Node::str("a")), Tree::from(Node::str("b"))])
            .unwrap();
        assert!(matches!(para.content(), Tree::List(items) if items.len() == 2));
    }

    #[test]
    fn test_arity_error_message() {
        let err = Kind::RawBlock.build(vec![Tree::from("latex")]).unwrap_err();
        assert_eq!(err.to_string(), "RawBlock expects 2 arguments, but 1 given");
    }

    #[test]
    fn test_type_predicate() {
        let node = Node::str("x");
        assert!(Kind::Str.matches(&node));
        assert!(!Kind::Para.matches(&node));
    }
}
