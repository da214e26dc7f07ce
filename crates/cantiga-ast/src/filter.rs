//! Filter combinators
//!
//! Node-level behaviour is expressed as a [`Rule`] (a node visitor that
//! answers with a [`Rewrite`]). [`ElementFilter`] lifts a rule into a
//! document-level [`Filter`], and a [`Pipeline`] runs filters left to
//! right, stopping at the first one that drops the document.

use tracing::debug;

use crate::document::Document;
use crate::error::Result;
use crate::kind::Kind;
use crate::tree::{Node, Tree};
use crate::walk::{walk_seq, Env, Rewrite};

/// Node predicate
pub type Predicate = Box<dyn Fn(&Node, &Env<'_>) -> bool>;

/// A node-level rewrite rule
pub trait Rule {
    fn visit(&self, node: &Node, env: &Env<'_>) -> Result<Rewrite>;
}

impl<F> Rule for F
where
    F: Fn(&Node, &Env<'_>) -> Result<Rewrite>,
{
    fn visit(&self, node: &Node, env: &Env<'_>) -> Result<Rewrite> {
        self(node, env)
    }
}

/// A document-level filter.
///
/// Returning `Ok(None)` drops the document and stops the pipeline.
pub trait Filter {
    fn apply(&self, doc: Document, env: &Env<'_>) -> Result<Option<Document>>;
}

/// Applies a [`Rule`] to every node of the document body
pub struct ElementFilter<R> {
    rule: R,
}

impl<R: Rule> ElementFilter<R> {
    pub fn new(rule: R) -> Self {
        Self { rule }
    }
}

impl<R: Rule> Filter for ElementFilter<R> {
    fn apply(&self, doc: Document, env: &Env<'_>) -> Result<Option<Document>> {
        let Document { meta, body } = doc;
        let body = walk_seq(body, env, &mut |node, env| self.rule.visit(node, env))?;
        Ok(Some(Document { meta, body }))
    }
}

/// A document-level filter backed by a function
pub struct FnFilter<F> {
    f: F,
}

impl<F> Filter for FnFilter<F>
where
    F: Fn(Document, &Env<'_>) -> Result<Option<Document>>,
{
    fn apply(&self, doc: Document, env: &Env<'_>) -> Result<Option<Document>> {
        (self.f)(doc, env)
    }
}

/// Wrap a whole-document function as a filter
pub fn document_filter<F>(f: F) -> FnFilter<F>
where
    F: Fn(Document, &Env<'_>) -> Result<Option<Document>>,
{
    FnFilter { f }
}

/// Lift a rule into a document filter
pub fn element_filter<R: Rule>(rule: R) -> ElementFilter<R> {
    ElementFilter::new(rule)
}

/// Rule removing every node the predicate holds for
pub struct RemoveIf<P> {
    pred: P,
}

impl<P> Rule for RemoveIf<P>
where
    P: Fn(&Node, &Env<'_>) -> bool,
{
    fn visit(&self, node: &Node, env: &Env<'_>) -> Result<Rewrite> {
        Ok(if (self.pred)(node, env) {
            Rewrite::Remove
        } else {
            Rewrite::Keep
        })
    }
}

/// Remove nodes matching `pred`; others are kept and still walked
pub fn remove_if<P>(pred: P) -> ElementFilter<RemoveIf<P>>
where
    P: Fn(&Node, &Env<'_>) -> bool,
{
    ElementFilter::new(RemoveIf { pred })
}

/// Rule applied only to nodes of one kind
pub struct OnKind<R> {
    kind: Kind,
    rule: R,
}

impl<R: Rule> Rule for OnKind<R> {
    fn visit(&self, node: &Node, env: &Env<'_>) -> Result<Rewrite> {
        if node.kind() == self.kind {
            self.rule.visit(node, env)
        } else {
            Ok(Rewrite::Keep)
        }
    }
}

/// Apply `rule` to nodes of `kind`; every other node passes through
pub fn element<R: Rule>(kind: Kind, rule: R) -> ElementFilter<OnKind<R>> {
    ElementFilter::new(OnKind { kind, rule })
}

/// Rule inserting nodes in front of a match
pub struct SpliceBefore<T> {
    transform: T,
}

impl<T> Rule for SpliceBefore<T>
where
    T: Fn(&Node, &Env<'_>) -> Result<Option<Vec<Tree>>>,
{
    fn visit(&self, node: &Node, env: &Env<'_>) -> Result<Rewrite> {
        Ok(match (self.transform)(node, env)? {
            Some(mut before) => {
                before.push(Tree::Node(node.clone()));
                Rewrite::Replace(before)
            }
            None => Rewrite::Keep,
        })
    }
}

/// Emit whatever `transform` yields, followed by the original node
pub fn splice_before<T>(transform: T) -> ElementFilter<SpliceBefore<T>>
where
    T: Fn(&Node, &Env<'_>) -> Result<Option<Vec<Tree>>>,
{
    ElementFilter::new(SpliceBefore { transform })
}

/// Rule wrapping a node in a LaTeX environment
#[derive(Debug, Clone)]
pub struct LatexEnv {
    name: String,
}

impl Rule for LatexEnv {
    fn visit(&self, node: &Node, _env: &Env<'_>) -> Result<Rewrite> {
        Ok(Rewrite::Replace(vec![
            Tree::Node(Node::raw_block("latex", format!("\\begin{{{}}}", self.name))),
            Tree::Node(node.clone()),
            Tree::Node(Node::raw_block("latex", format!("\\end{{{}}}", self.name))),
        ]))
    }
}

/// Surround a node with `\begin{name}` / `\end{name}` raw blocks
pub fn with_latex_env(name: impl Into<String>) -> LatexEnv {
    LatexEnv { name: name.into() }
}

/// Predicate matching nodes of one kind
pub fn is_type(kind: Kind) -> Predicate {
    Box::new(move |node: &Node, _: &Env<'_>| node.kind() == kind)
}

/// Predicate matching nodes whose content is empty
pub fn is_empty(node: &Node, _env: &Env<'_>) -> bool {
    node.content().is_empty()
}

/// Predicate holding when every predicate holds
pub fn all_of(preds: Vec<Predicate>) -> Predicate {
    Box::new(move |node: &Node, env: &Env<'_>| preds.iter().all(|p| p(node, env)))
}

/// Predicate holding when any predicate holds
pub fn any_of(preds: Vec<Predicate>) -> Predicate {
    Box::new(move |node: &Node, env: &Env<'_>| preds.iter().any(|p| p(node, env)))
}

struct Step {
    name: &'static str,
    filter: Box<dyn Filter>,
}

/// Ordered chain of document filters
#[derive(Default)]
pub struct Pipeline {
    steps: Vec<Step>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a named step
    pub fn then(mut self, name: &'static str, filter: impl Filter + 'static) -> Self {
        self.steps.push(Step {
            name,
            filter: Box::new(filter),
        });
        self
    }

    /// Names of the steps, in order
    pub fn step_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.steps.iter().map(|step| step.name)
    }

    /// Run every step in order.
    ///
    /// Each step sees the metadata of the document as it stands before
    /// that step. The first step returning `None` drops the document.
    pub fn run(&self, mut doc: Document, format: &str) -> Result<Option<Document>> {
        for step in &self.steps {
            let meta = doc.meta.clone();
            let env = Env::new(format, &meta);
            match step.filter.apply(doc, &env)? {
                Some(next) => doc = next,
                None => {
                    debug!(step = step.name, "document dropped by filter");
                    return Ok(None);
                }
            }
            debug!(step = step.name, blocks = doc.body.len(), "filter applied");
        }
        Ok(Some(doc))
    }
}
