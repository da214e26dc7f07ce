//! Generic document tree
//!
//! Pandoc's JSON is loosely typed: nested arrays and objects, some of which
//! are tagged nodes (`{"t": kind, "c": content}`). [`Tree`] keeps that
//! shape but decodes tagged objects into [`Node`] values up front, so
//! walkers never have to guess whether a mapping is a node.

use std::collections::BTreeMap;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};

use crate::error::Result;
use crate::kind::Kind;

/// A generic tree value
#[derive(Debug, Clone, PartialEq)]
pub enum Tree {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<Tree>),
    /// A mapping that is not a tagged object
    Map(BTreeMap<String, Tree>),
    Node(Node),
    /// A tagged object outside the registry, kept verbatim
    Tagged(Tagged),
}

/// A tagged node: a kind plus its content payload
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    kind: Kind,
    content: Box<Tree>,
}

impl Node {
    // Callers are responsible for the payload matching the kind's arity.
    pub(crate) fn from_parts(kind: Kind, content: Tree) -> Self {
        Self {
            kind,
            content: Box::new(content),
        }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn content(&self) -> &Tree {
        &self.content
    }

    pub fn into_content(self) -> Tree {
        *self.content
    }

    /// Rebuild the node with a content payload of the same shape
    pub(crate) fn map_content(self, f: impl FnOnce(Tree) -> Result<Tree>) -> Result<Node> {
        Ok(Node::from_parts(self.kind, f(*self.content)?))
    }

    /// `Str` node
    pub fn str(text: impl Into<String>) -> Node {
        Node::from_parts(Kind::Str, Tree::String(text.into()))
    }

    /// `RawBlock` node
    pub fn raw_block(format: impl Into<String>, text: impl Into<String>) -> Node {
        Node::from_parts(
            Kind::RawBlock,
            Tree::List(vec![Tree::String(format.into()), Tree::String(text.into())]),
        )
    }

    /// `RawInline` node
    pub fn raw_inline(format: impl Into<String>, text: impl Into<String>) -> Node {
        Node::from_parts(
            Kind::RawInline,
            Tree::List(vec![Tree::String(format.into()), Tree::String(text.into())]),
        )
    }

    /// `Para` node
    pub fn para(inlines: Vec<Tree>) -> Node {
        Node::from_parts(Kind::Para, Tree::List(inlines))
    }

    /// Inline content of a variadic node (`Para`, `Plain`, `Emph`, ...)
    pub fn children(&self) -> &[Tree] {
        match self.content.as_ref() {
            Tree::List(items) => items,
            _ => &[],
        }
    }
}

/// A `{"t", "c"}` object the registry does not describe: an unknown tag
/// (`BlockQuote`, `Div`, ...) or a known tag whose payload does not fit
/// the kind's arity. Filters never see it; walkers rebuild its content.
#[derive(Debug, Clone, PartialEq)]
pub struct Tagged {
    tag: String,
    content: Option<Box<Tree>>,
}

impl Tagged {
    pub fn new(tag: impl Into<String>, content: Option<Tree>) -> Self {
        Self {
            tag: tag.into(),
            content: content.map(Box::new),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Payload, if the object carried a `"c"` key
    pub fn content(&self) -> Option<&Tree> {
        self.content.as_deref()
    }

    pub(crate) fn map_content(self, f: impl FnOnce(Tree) -> Result<Tree>) -> Result<Tagged> {
        let content = match self.content {
            Some(content) => Some(Box::new(f(*content)?)),
            None => None,
        };
        Ok(Tagged {
            tag: self.tag,
            content,
        })
    }
}

impl Tree {
    /// Decode a JSON value, turning tagged objects into nodes.
    ///
    /// An object whose keys are a string `"t"` and optionally `"c"` is a
    /// tagged object. It becomes a [`Node`] when `"t"` names a registered
    /// kind and the payload fits that kind's arity, and a [`Tagged`] value
    /// otherwise. Every other object is an opaque [`Tree::Map`].
    pub fn from_json(value: Value) -> Tree {
        match value {
            Value::Null => Tree::Null,
            Value::Bool(b) => Tree::Bool(b),
            Value::Number(n) => Tree::Number(n),
            Value::String(s) => Tree::String(s),
            Value::Array(items) => Tree::List(items.into_iter().map(Tree::from_json).collect()),
            Value::Object(mut map) => match tag_of(&map) {
                Some(tag) => {
                    let content = map.remove("c").map(Tree::from_json);
                    tagged(tag, content)
                }
                None => Tree::Map(
                    map.into_iter()
                        .map(|(k, v)| (k, Tree::from_json(v)))
                        .collect(),
                ),
            },
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Tree::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Tree]> {
        match self {
            Tree::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Tree::Node(node) => Some(node),
            _ => None,
        }
    }

    /// True for empty sequences, mappings and strings
    pub fn is_empty(&self) -> bool {
        match self {
            Tree::List(items) => items.is_empty(),
            Tree::Map(map) => map.is_empty(),
            Tree::String(s) => s.is_empty(),
            Tree::Null => true,
            _ => false,
        }
    }
}

fn tag_of(map: &serde_json::Map<String, Value>) -> Option<String> {
    if map.keys().any(|key| key != "t" && key != "c") {
        return None;
    }
    match map.get("t") {
        Some(Value::String(tag)) => Some(tag.clone()),
        _ => None,
    }
}

fn tagged(tag: String, content: Option<Tree>) -> Tree {
    let Some(kind) = Kind::from_name(&tag) else {
        return Tree::Tagged(Tagged::new(tag, content));
    };
    let fits = match &content {
        Some(payload) => kind.check(payload).is_ok(),
        None => kind.check(&Tree::List(Vec::new())).is_ok(),
    };
    if fits {
        Tree::Node(Node::from_parts(
            kind,
            content.unwrap_or_else(|| Tree::List(Vec::new())),
        ))
    } else {
        Tree::Tagged(Tagged::new(tag, content))
    }
}

impl From<Node> for Tree {
    fn from(node: Node) -> Self {
        Tree::Node(node)
    }
}

impl From<&str> for Tree {
    fn from(s: &str) -> Self {
        Tree::String(s.to_string())
    }
}

impl From<String> for Tree {
    fn from(s: String) -> Self {
        Tree::String(s)
    }
}

impl From<i64> for Tree {
    fn from(n: i64) -> Self {
        Tree::Number(Number::from(n))
    }
}

impl From<Vec<Tree>> for Tree {
    fn from(items: Vec<Tree>) -> Self {
        Tree::List(items)
    }
}

impl Serialize for Tree {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Tree::Null => serializer.serialize_unit(),
            Tree::Bool(b) => serializer.serialize_bool(*b),
            Tree::Number(n) => n.serialize(serializer),
            Tree::String(s) => serializer.serialize_str(s),
            Tree::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Tree::Map(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
            Tree::Node(node) => node.serialize(serializer),
            Tree::Tagged(tagged) => tagged.serialize(serializer),
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_map(Some(2))?;
        out.serialize_entry("t", self.kind.name())?;
        out.serialize_entry("c", &self.content)?;
        out.end()
    }
}

impl Serialize for Tagged {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let len = if self.content.is_some() { 2 } else { 1 };
        let mut out = serializer.serialize_map(Some(len))?;
        out.serialize_entry("t", &self.tag)?;
        if let Some(content) = &self.content {
            out.serialize_entry("c", content)?;
        }
        out.end()
    }
}
