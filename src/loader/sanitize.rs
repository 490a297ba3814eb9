//! SVG content isolation.
//!
//! Two passes over one parsed document, both emitted as span edits on the source text:
//!
//! - id isolation: every descendant `id` gains the instance prefix and every internal
//!   reference to it follows;
//! - URL absolutization: relative `url(...)` and `href` values are resolved against the
//!   URL the SVG was fetched from, so the markup can be inlined into any page.

use std::collections::BTreeMap;

use url::Url;

use crate::{
    foundation::error::EmbedResult,
    loader::markup::{self, Edit},
};

/// Sanitized SVG markup plus what the later load stages need from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SanitizedSvg {
    /// Rewritten root `<svg>` element. The prolog and anything after the root are dropped.
    pub markup: String,
    /// Original id to prefixed id.
    pub id_map: BTreeMap<String, String>,
    /// Text of every `<style>` element after rewriting, in document order.
    pub style_sheets: Vec<String>,
}

/// Where `#id` references are recognized inside a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RefMode {
    /// A value that is itself `#id`, or `url(#id)` (`href`, `filter`, `clip-path`, `mask`).
    Fragment,
    /// Only `url(#id)`; a bare `#abc` is a color here.
    UrlOnly,
    /// CSS rule text: selectors plus `url(#id)` in declaration values.
    Stylesheet,
}

/// Isolate ids with `prefix` and resolve relative URLs against `base`.
pub fn sanitize_svg(src: &str, prefix: &str, base: &Url) -> EmbedResult<SanitizedSvg> {
    let doc = markup::parse_document(src)?;
    let root = markup::svg_root(&doc)?;

    let mut edits = Vec::new();
    let mut id_map = BTreeMap::new();
    // The root id is replaced by the instance id later on.
    for node in root.descendants().skip(1).filter(|n| n.is_element()) {
        let Some(attr) = markup::plain_attribute(node, "id") else {
            continue;
        };
        if attr.value().is_empty() {
            continue;
        }
        let new_id = format!("{prefix}-{}", attr.value());
        edits.push(Edit::replace(
            attr.range_value(),
            markup::escape_attr(&new_id),
        ));
        id_map.insert(attr.value().to_string(), new_id);
    }

    let mut style_sheets = Vec::new();
    for node in root.descendants().filter(|n| n.is_element()) {
        for attr in node.attributes() {
            let plain = attr.namespace().is_none();
            let value = attr.value();
            let rewritten = match attr.name() {
                "id" if plain => continue,
                "href" => absolutize_href(&rewrite_refs(value, &id_map, RefMode::Fragment), base),
                "filter" | "clip-path" | "mask" if plain => {
                    rewrite_refs(value, &id_map, RefMode::Fragment)
                }
                "style" if plain => {
                    absolutize_css_urls(&rewrite_refs(value, &id_map, RefMode::UrlOnly), base)
                }
                _ => rewrite_refs(value, &id_map, RefMode::UrlOnly),
            };
            if rewritten != value {
                edits.push(Edit::replace(
                    attr.range_value(),
                    markup::escape_attr(&rewritten),
                ));
            }
        }

        if node.tag_name().name() == "style" {
            let text: String = node
                .children()
                .filter(|c| c.is_text())
                .filter_map(|c| c.text())
                .collect();
            if text.is_empty() {
                continue;
            }
            let rewritten =
                absolutize_css_urls(&rewrite_refs(&text, &id_map, RefMode::Stylesheet), base);
            if rewritten != text
                && let Some(range) = markup::element_content_range(src, node)
            {
                edits.push(Edit::replace(range, markup::escape_text(&rewritten)));
            }
            style_sheets.push(rewritten);
        }
    }

    tracing::debug!(
        ids = id_map.len(),
        style_sheets = style_sheets.len(),
        edits = edits.len(),
        "sanitized svg"
    );

    Ok(SanitizedSvg {
        markup: markup::apply_edits_in(src, root.range(), edits),
        id_map,
        style_sheets,
    })
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

/// Longest mapped id that `rest` starts with as a whole token.
fn match_id<'m>(rest: &str, ids: &'m BTreeMap<String, String>) -> Option<(&'m str, &'m str)> {
    ids.iter()
        .filter(|(old, _)| {
            rest.starts_with(old.as_str())
                && !rest[old.len()..].chars().next().is_some_and(is_ident_char)
        })
        .max_by_key(|(old, _)| old.len())
        .map(|(old, new)| (old.as_str(), new.as_str()))
}

/// Whether `before` ends with an open `url(`, optionally followed by a quote.
fn inside_url(before: &str) -> bool {
    let t = before.trim_end_matches(['"', '\'']).trim_end();
    t.len()
        .checked_sub(4)
        .and_then(|at| t.get(at..))
        .is_some_and(|tail| tail.eq_ignore_ascii_case("url("))
}

/// Whether the `:` right before `tail` opens a declaration value
/// rather than a pseudo-class in a nested selector.
fn colon_opens_value(tail: &str) -> bool {
    match (tail.find('{'), tail.find([';', '}'])) {
        (Some(brace), Some(end)) => end < brace,
        (Some(_), None) => false,
        _ => true,
    }
}

/// Rewrite `#id` references to their prefixed form.
pub(crate) fn rewrite_refs(text: &str, ids: &BTreeMap<String, String>, mode: RefMode) -> String {
    if ids.is_empty() || !text.contains('#') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + 16);
    let mut depth = 0usize;
    let mut in_value = false;
    let mut i = 0;
    while let Some(c) = text[i..].chars().next() {
        if mode == RefMode::Stylesheet {
            if text[i..].starts_with("/*") {
                let end = text[i + 2..].find("*/").map_or(text.len(), |e| i + 2 + e + 2);
                out.push_str(&text[i..end]);
                i = end;
                continue;
            }
            match c {
                '{' => {
                    depth += 1;
                    in_value = false;
                }
                '}' => {
                    depth = depth.saturating_sub(1);
                    in_value = false;
                }
                ';' => in_value = false,
                ':' if depth > 0 => in_value = colon_opens_value(&text[i + 1..]),
                _ => {}
            }
        }

        if c == '#'
            && let Some((old, new)) = match_id(&text[i + 1..], ids)
        {
            let rewrite = match mode {
                RefMode::Fragment => text[..i].trim().is_empty() || inside_url(&text[..i]),
                RefMode::UrlOnly => inside_url(&text[..i]),
                RefMode::Stylesheet => !in_value || inside_url(&text[..i]),
            };
            if rewrite {
                out.push('#');
                out.push_str(new);
                i += 1 + old.len();
                continue;
            }
        }

        out.push(c);
        i += c.len_utf8();
    }
    out
}

/// Resolve `value` against `base` unless it is already absolute.
///
/// Fragments, root-relative paths and anything carrying a scheme (`data:` included)
/// are left alone.
pub(crate) fn resolve_relative(value: &str, base: &Url) -> Option<Url> {
    let v = value.trim();
    if v.is_empty() || v.starts_with('#') || v.starts_with('/') || Url::parse(v).is_ok() {
        return None;
    }
    base.join(v).ok()
}

pub(crate) fn absolutize_href(value: &str, base: &Url) -> String {
    resolve_relative(value, base).map_or_else(|| value.to_string(), String::from)
}

/// Parse the argument of a `url(` token. `s` starts right after the parenthesis.
///
/// Returns the argument and the number of bytes consumed through the closing `)`.
pub(crate) fn parse_url_arg(s: &str) -> Option<(&str, usize)> {
    let lead = s.len() - s.trim_start().len();
    let body = &s[lead..];
    let (arg, consumed) = match body.chars().next()? {
        q @ ('"' | '\'') => {
            let end = body[1..].find(q)?;
            (&body[1..1 + end], end + 2)
        }
        _ => {
            let end = body.find(')')?;
            (body[..end].trim_end(), end)
        }
    };
    let rest = &body[consumed..];
    let trail = rest.len() - rest.trim_start().len();
    if !rest[trail..].starts_with(')') {
        return None;
    }
    Some((arg, lead + consumed + trail + 1))
}

/// Rewrite relative `url(...)` tokens in CSS text to `url("<absolute>")`.
pub(crate) fn absolutize_css_urls(text: &str, base: &Url) -> String {
    let lower = text.to_ascii_lowercase();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while let Some(pos) = lower[i..].find("url(") {
        let start = i + pos;
        let open = start + 4;
        out.push_str(&text[i..start]);
        match parse_url_arg(&text[open..]) {
            Some((arg, len)) => {
                match resolve_relative(arg, base) {
                    Some(abs) => {
                        out.push_str("url(\"");
                        out.push_str(abs.as_str());
                        out.push_str("\")");
                    }
                    None => out.push_str(&text[start..open + len]),
                }
                i = open + len;
            }
            None => {
                out.push_str(&text[start..open]);
                i = open;
            }
        }
    }
    out.push_str(&text[i..]);
    out
}

#[cfg(test)]
#[path = "../../tests/unit/loader/sanitize.rs"]
mod tests;
