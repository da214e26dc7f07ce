//! Per-song filter pipeline
//!
//! Every source document runs through [`lyric_pipeline`]:
//!
//! 1. `hide-hidden`: drop the whole song if any header is classed `hidden`
//! 2. `drop-empty-paragraphs`
//! 3. `same-page`: keep each paragraph on one page
//! 4. `title-footer`: repeat the song title in the page footer
//! 5. `category-badge`: append the category names under the title
//! 6. `page-columns`: switch to the header's one/two column layout

use cantiga_ast::filter::{
    all_of, document_filter, element, is_empty, is_type, remove_if, splice_before, with_latex_env,
};
use cantiga_ast::{collect_seq, Document, Env, Header, Kind, Node, Pipeline, Result, Rewrite, Tree};

use crate::category;
use crate::latex::{tex_inline, Columns, BADGE_PREFIX, FOOTER_CLOSE, FOOTER_OPEN, SAME_PAGE_ENV};

/// Header class that excludes a song from the book
pub const HIDDEN_CLASS: &str = "hidden";

/// Build the filter chain applied to every song
pub fn lyric_pipeline() -> Pipeline {
    Pipeline::new()
        .then("hide-hidden", document_filter(hide_hidden))
        .then(
            "drop-empty-paragraphs",
            remove_if(all_of(vec![is_type(Kind::Para), Box::new(is_empty)])),
        )
        .then("same-page", element(Kind::Para, with_latex_env(SAME_PAGE_ENV)))
        .then("title-footer", element(Kind::Header, title_footer))
        .then("category-badge", element(Kind::Header, category_badge))
        .then("page-columns", splice_before(page_columns))
}

/// Header nodes of a body, lazily
pub fn headers<'a>(body: &'a [Tree], env: Env<'a>) -> impl Iterator<Item = &'a Node> + 'a {
    collect_seq(body, env, |node, _| Kind::Header.matches(node).then_some(node))
}

/// Drop the document if any header carries the `hidden` class
pub fn hide_hidden(doc: Document, env: &Env<'_>) -> Result<Option<Document>> {
    for header in headers(&doc.body, *env) {
        if Header::attr_of(header)?.has_class(HIDDEN_CLASS) {
            return Ok(None);
        }
    }
    Ok(Some(doc))
}

/// Follow a header with a paragraph setting the page footer to its title
pub fn title_footer(node: &Node, _env: &Env<'_>) -> Result<Rewrite> {
    let header = Header::decode(node)?;
    let mut footer = Vec::with_capacity(header.inlines.len() + 2);
    footer.push(Tree::from(tex_inline(FOOTER_OPEN)));
    footer.extend(header.inlines);
    footer.push(Tree::from(tex_inline(FOOTER_CLOSE)));
    Ok(Rewrite::Replace(vec![
        Tree::from(node.clone()),
        Tree::from(Node::para(footer)),
    ]))
}

/// Append a small badge listing the header's categories
pub fn category_badge(node: &Node, _env: &Env<'_>) -> Result<Rewrite> {
    let mut header = Header::decode(node)?;
    let Some(names) = category::badge(&header.attr.classes) else {
        return Ok(Rewrite::Keep);
    };
    header
        .inlines
        .push(Tree::from(tex_inline(format!("{}{}", BADGE_PREFIX, names))));
    Ok(Rewrite::with(header.into_node()))
}

/// Column layout marker to place before a header
pub fn page_columns(node: &Node, _env: &Env<'_>) -> Result<Option<Vec<Tree>>> {
    if !Kind::Header.matches(node) {
        return Ok(None);
    }
    let attr = Header::attr_of(node)?;
    let columns = match attr.get(Columns::ATTRIBUTE) {
        Some(value) => Columns::parse(value)?,
        None => Columns::default(),
    };
    Ok(Some(vec![Tree::from(columns.marker())]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cantiga_ast::filter::Filter;
    use cantiga_ast::AstError;
    use serde_json::json;

    fn doc(body: serde_json::Value) -> Document {
        Document::from_value(json!([{"unMeta": {}}, body])).unwrap()
    }

    fn body(value: serde_json::Value) -> Vec<Tree> {
        doc(value).body
    }

    fn header(classes: &[&str], keyvals: serde_json::Value) -> serde_json::Value {
        json!({"t": "Header", "c": [1, ["song", classes, keyvals], [{"t": "Str", "c": "Song"}]]})
    }

    #[test]
    fn test_hidden_document_is_dropped() {
        let hidden = doc(json!([
            {"t": "Para", "c": [{"t": "Str", "c": "x"}]},
            header(&["angola", "hidden"], json!([]))
        ]));
        assert!(hide_hidden(hidden, &Env::default()).unwrap().is_none());

        let visible = doc(json!([header(&["angola"], json!([]))]));
        assert!(hide_hidden(visible, &Env::default()).unwrap().is_some());
    }

    #[test]
    fn test_title_footer_follows_header() {
        let out = element(Kind::Header, title_footer)
            .apply(doc(json!([header(&[], json!([]))])), &Env::default())
            .unwrap()
            .unwrap();
        assert_eq!(
            out.body,
            body(json!([
                header(&[], json!([])),
                {"t": "Para", "c": [
                    {"t": "RawInline", "c": ["tex", "\\rfoot{{\\footnotesize "]},
                    {"t": "Str", "c": "Song"},
                    {"t": "RawInline", "c": ["tex", "}}"]}
                ]}
            ]))
        );
    }

    #[test]
    fn test_category_badges() {
        let out = element(Kind::Header, category_badge)
            .apply(
                doc(json!([
                    header(&["ladainha", "foo"], json!([])),
                    header(&["angola", "benguela"], json!([])),
                    header(&["foo"], json!([]))
                ])),
                &Env::default(),
            )
            .unwrap()
            .unwrap();
        let badges: Vec<Vec<Tree>> = out
            .body
            .iter()
            .map(|tree| Header::decode(tree.as_node().unwrap()).unwrap().inlines)
            .collect();
        assert_eq!(badges[0][1], Tree::from(tex_inline(format!("{}Ladainha", BADGE_PREFIX))));
        assert_eq!(
            badges[1][1],
            Tree::from(tex_inline(format!("{}Angola, Benguela", BADGE_PREFIX)))
        );
        assert_eq!(badges[2].len(), 1);
    }

    #[test]
    fn test_page_columns_marker() {
        let out = splice_before(page_columns)
            .apply(
                doc(json!([
                    header(&[], json!([["columns", "1"]])),
                    header(&[], json!([]))
                ])),
                &Env::default(),
            )
            .unwrap()
            .unwrap();
        assert_eq!(
            out.body,
            body(json!([
                {"t": "RawBlock", "c": ["latex", "\\onecolumn"]},
                header(&[], json!([["columns", "1"]])),
                {"t": "RawBlock", "c": ["latex", "\\twocolumn"]},
                header(&[], json!([]))
            ]))
        );
    }

    #[test]
    fn test_page_columns_rejects_unknown_value() {
        let err = splice_before(page_columns)
            .apply(doc(json!([header(&[], json!([["columns", "3"]]))])), &Env::default())
            .unwrap_err();
        assert!(matches!(err, AstError::Config { ref value, .. } if value == "3"));
    }

    #[test]
    fn test_full_pipeline() {
        let source = doc(json!([
            header(&["angola"], json!([])),
            {"t": "Para", "c": []},
            {"t": "Para", "c": [{"t": "Str", "c": "verse"}]}
        ]));
        let out = lyric_pipeline().run(source, "").unwrap().unwrap();
        let expected = body(json!([
            {"t": "RawBlock", "c": ["latex", "\\twocolumn"]},
            {"t": "Header", "c": [1, ["song", ["angola"], []], [
                {"t": "Str", "c": "Song"},
                {"t": "RawInline", "c": ["tex", "\\newline\\tiny\\color{black!55}Angola"]}
            ]]},
            {"t": "Para", "c": [
                {"t": "RawInline", "c": ["tex", "\\rfoot{{\\footnotesize "]},
                {"t": "Str", "c": "Song"},
                {"t": "RawInline", "c": ["tex", "}}"]}
            ]},
            {"t": "RawBlock", "c": ["latex", "\\begin{samepage}"]},
            {"t": "Para", "c": [{"t": "Str", "c": "verse"}]},
            {"t": "RawBlock", "c": ["latex", "\\end{samepage}"]}
        ]));
        assert_eq!(out.body, expected);
    }

    #[test]
    fn test_pipeline_step_order() {
        let names: Vec<&str> = lyric_pipeline().step_names().collect();
        assert_eq!(
            names,
            vec![
                "hide-hidden",
                "drop-empty-paragraphs",
                "same-page",
                "title-footer",
                "category-badge",
                "page-columns"
            ]
        );
    }
}
