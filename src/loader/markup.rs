//! Span-based editing of XML source text.
//!
//! Documents are parsed read-only with `roxmltree`; changes are expressed as byte-range
//! replacements on the original text so everything not rewritten stays byte-identical.

use std::ops::Range;

use crate::foundation::error::{EmbedError, EmbedResult};

/// A replacement of `range` in the source text by `text`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Edit {
    pub(crate) range: Range<usize>,
    pub(crate) text: String,
}

impl Edit {
    pub(crate) fn replace(range: Range<usize>, text: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
        }
    }

    pub(crate) fn insert(at: usize, text: impl Into<String>) -> Self {
        Self::replace(at..at, text)
    }
}

/// Apply non-overlapping edits. Insertions at the same offset keep their relative order.
pub(crate) fn apply_edits(src: &str, mut edits: Vec<Edit>) -> String {
    edits.sort_by_key(|e| (e.range.start, e.range.end));
    let mut out = String::with_capacity(src.len() + edits.iter().map(|e| e.text.len()).sum::<usize>());
    let mut cursor = 0;
    for e in edits {
        if e.range.start < cursor {
            // Overlap; the earlier edit wins.
            continue;
        }
        out.push_str(&src[cursor..e.range.start]);
        out.push_str(&e.text);
        cursor = e.range.end;
    }
    out.push_str(&src[cursor..]);
    out
}

/// Apply `edits` to the `range` slice of `src` only. Edits outside it are dropped.
pub(crate) fn apply_edits_in(src: &str, range: Range<usize>, edits: Vec<Edit>) -> String {
    let start = range.start;
    let local = edits
        .into_iter()
        .filter(|e| e.range.start >= start && e.range.end <= range.end)
        .map(|e| Edit::replace(e.range.start - start..e.range.end - start, e.text))
        .collect();
    apply_edits(&src[range], local)
}

/// Escape a value for use inside a quoted attribute (either quote style).
pub(crate) fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape element content, leaving quotes alone.
pub(crate) fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Byte range between the end of the start tag and the start of the end tag.
///
/// `None` for self-closing elements.
pub(crate) fn element_content_range(src: &str, node: roxmltree::Node<'_, '_>) -> Option<Range<usize>> {
    let range = node.range();
    let after_attrs = node
        .attributes()
        .map(|a| a.range().end)
        .max()
        .unwrap_or(range.start + 1);
    let open_end = after_attrs + src[after_attrs..range.end].find('>')?;
    if src[..open_end].ends_with('/') {
        return None;
    }
    let start = open_end + 1;
    let end = start + src[start..range.end].rfind("</")?;
    Some(start..end)
}

/// Escape text for HTML/XML element content.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub(crate) fn parse_document(src: &str) -> EmbedResult<roxmltree::Document<'_>> {
    let opts = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    roxmltree::Document::parse_with_options(src, opts)
        .map_err(|e| EmbedError::parse(format!("malformed SVG document: {e}")))
}

/// The root element, which must be an SVG element.
pub(crate) fn svg_root<'a, 'input>(
    doc: &'a roxmltree::Document<'input>,
) -> EmbedResult<roxmltree::Node<'a, 'input>> {
    let root = doc.root_element();
    if root.tag_name().name() != "svg" {
        return Err(EmbedError::parse(format!(
            "document root is <{}>, not <svg>",
            root.tag_name().name()
        )));
    }
    Ok(root)
}

/// Look up an attribute without namespace by local name, including its source range.
pub(crate) fn plain_attribute<'a, 'input>(
    node: roxmltree::Node<'a, 'input>,
    name: &str,
) -> Option<roxmltree::Attribute<'a, 'input>> {
    node.attributes()
        .find(|a| a.namespace().is_none() && a.name() == name)
}

/// Set (`Some`) or remove (`None`) plain attributes on the root element.
pub(crate) fn set_root_attributes(src: &str, attrs: &[(&str, Option<&str>)]) -> EmbedResult<String> {
    let doc = parse_document(src)?;
    let root = svg_root(&doc)?;

    let start = root.range().start;
    let name_len = src[start + 1..]
        .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
        .unwrap_or(0);
    let insert_at = start + 1 + name_len;

    let mut edits = Vec::new();
    for (name, value) in attrs {
        match (plain_attribute(root, name), value) {
            (Some(existing), Some(v)) => {
                edits.push(Edit::replace(existing.range_value(), escape_attr(v)));
            }
            (Some(existing), None) => {
                edits.push(Edit::replace(existing.range(), ""));
            }
            (None, Some(v)) => {
                edits.push(Edit::insert(insert_at, format!(" {name}=\"{}\"", escape_attr(v))));
            }
            (None, None) => {}
        }
    }
    Ok(apply_edits(src, edits))
}

#[cfg(test)]
#[path = "../../tests/unit/loader/markup.rs"]
mod tests;
