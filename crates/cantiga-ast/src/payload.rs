//! Typed views over node payloads
//!
//! Header and Link payloads are positional sequences in the tree. These
//! views decode them into named fields and encode them back.

use crate::error::{AstError, Result};
use crate::kind::Kind;
use crate::tree::{Node, Tree};

/// Element attributes: `[identifier, [class, ...], [[key, value], ...]]`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Attr {
    pub id: String,
    pub classes: Vec<String>,
    pub keyvals: Vec<(String, String)>,
}

impl Attr {
    /// Attributes with only an identifier
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Value of a key-value attribute. Later pairs win over earlier ones.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.keyvals
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn decode(kind: Kind, tree: &Tree) -> Result<Attr> {
        let [id, classes, keyvals] = positional::<3>(kind, tree, "attributes")?;
        let id = string(kind, id, "identifier")?;
        let classes = strings(kind, classes, "class list")?;
        let keyvals = keyvals
            .as_list()
            .ok_or_else(|| AstError::shape(kind, "key-value list is not a sequence"))?
            .iter()
            .map(|pair| {
                let [k, v] = positional::<2>(kind, pair, "key-value pair")?;
                Ok((string(kind, k, "key")?, string(kind, v, "value")?))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Attr {
            id,
            classes,
            keyvals,
        })
    }

    fn encode(&self) -> Tree {
        Tree::List(vec![
            Tree::from(self.id.as_str()),
            Tree::List(self.classes.iter().map(|c| Tree::from(c.as_str())).collect()),
            Tree::List(
                self.keyvals
                    .iter()
                    .map(|(k, v)| Tree::List(vec![Tree::from(k.as_str()), Tree::from(v.as_str())]))
                    .collect(),
            ),
        ])
    }
}

/// Decoded `Header` payload
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub level: i64,
    pub attr: Attr,
    pub inlines: Vec<Tree>,
}

impl Header {
    pub fn new(level: i64, attr: Attr, inlines: Vec<Tree>) -> Self {
        Self {
            level,
            attr,
            inlines,
        }
    }

    /// Decode a `Header` node
    pub fn decode(node: &Node) -> Result<Header> {
        expect_kind(node, Kind::Header)?;
        let [level, attr, inlines] = positional::<3>(Kind::Header, node.content(), "payload")?;
        let level = match level {
            Tree::Number(n) => n
                .as_i64()
                .ok_or_else(|| AstError::shape(Kind::Header, "level is not an integer"))?,
            _ => return Err(AstError::shape(Kind::Header, "level is not a number")),
        };
        Ok(Header {
            level,
            attr: Attr::decode(Kind::Header, attr)?,
            inlines: inlines
                .as_list()
                .ok_or_else(|| AstError::shape(Kind::Header, "inline content is not a sequence"))?
                .to_vec(),
        })
    }

    /// Decode only the attributes of a `Header` node
    pub fn attr_of(node: &Node) -> Result<Attr> {
        expect_kind(node, Kind::Header)?;
        let [_, attr, _] = positional::<3>(Kind::Header, node.content(), "payload")?;
        Attr::decode(Kind::Header, attr)
    }

    pub fn into_node(self) -> Node {
        Node::from_parts(
            Kind::Header,
            Tree::List(vec![
                Tree::from(self.level),
                self.attr.encode(),
                Tree::List(self.inlines),
            ]),
        )
    }
}

/// Link target: `[url, title]`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Target {
    pub url: String,
    pub title: String,
}

impl Target {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: String::new(),
        }
    }
}

/// Decoded `Link` payload
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub inlines: Vec<Tree>,
    pub target: Target,
}

impl Link {
    pub fn new(inlines: Vec<Tree>, target: Target) -> Self {
        Self { inlines, target }
    }

    /// Decode a `Link` node
    pub fn decode(node: &Node) -> Result<Link> {
        expect_kind(node, Kind::Link)?;
        let [inlines, target] = positional::<2>(Kind::Link, node.content(), "payload")?;
        let [url, title] = positional::<2>(Kind::Link, target, "target")?;
        Ok(Link {
            inlines: inlines
                .as_list()
                .ok_or_else(|| AstError::shape(Kind::Link, "inline content is not a sequence"))?
                .to_vec(),
            target: Target {
                url: string(Kind::Link, url, "url")?,
                title: string(Kind::Link, title, "title")?,
            },
        })
    }

    pub fn into_node(self) -> Node {
        Node::from_parts(
            Kind::Link,
            Tree::List(vec![
                Tree::List(self.inlines),
                Tree::List(vec![
                    Tree::from(self.target.url),
                    Tree::from(self.target.title),
                ]),
            ]),
        )
    }
}

fn expect_kind(node: &Node, kind: Kind) -> Result<()> {
    if node.kind() == kind {
        Ok(())
    } else {
        Err(AstError::shape(kind, format!("found a {} node", node.kind())))
    }
}

fn positional<'a, const N: usize>(kind: Kind, tree: &'a Tree, what: &str) -> Result<[&'a Tree; N]> {
    let items = tree
        .as_list()
        .ok_or_else(|| AstError::shape(kind, format!("{} is not a sequence", what)))?;
    let refs: Vec<&Tree> = items.iter().collect();
    refs.try_into().map_err(|refs: Vec<&Tree>| {
        AstError::shape(
            kind,
            format!("{} has {} entries, expected {}", what, refs.len(), N),
        )
    })
}

fn string(kind: Kind, tree: &Tree, what: &str) -> Result<String> {
    tree.as_str()
        .map(str::to_string)
        .ok_or_else(|| AstError::shape(kind, format!("{} is not a string", what)))
}

fn strings(kind: Kind, tree: &Tree, what: &str) -> Result<Vec<String>> {
    tree.as_list()
        .ok_or_else(|| AstError::shape(kind, format!("{} is not a sequence", what)))?
        .iter()
        .map(|item| string(kind, item, what))
        .collect()
}
