//! Font readiness barrier for embedded `@font-face` rules.
//!
//! Every rule becomes one probe; all probes run concurrently and the barrier completes
//! when the last one settles. Failures never fail the load, they turn into
//! [`FontLoadWarning`]s.

use std::future::Future;

use url::Url;

use crate::{
    foundation::error::FontLoadWarning,
    loader::{
        fetch::{Fetch, fetch_ok},
        sanitize::parse_url_arg,
    },
};

/// One `@font-face` rule found in embedded style text.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FontFaceRule {
    /// Declared `font-family`, unquoted.
    pub family: String,
    /// Declared `font-weight`, `normal` when absent.
    pub weight: String,
    /// Declared `font-style`, `normal` when absent.
    pub style: String,
    /// `url(...)` sources from `src`, in declaration order.
    pub sources: Vec<Url>,
}

impl FontFaceRule {
    /// CSS font shorthand used to request this face, e.g. `italic 700 1em "Inter"`.
    pub fn query(&self) -> String {
        format!("{} {} 1em \"{}\"", self.style, self.weight, self.family)
    }
}

/// Resolves the readiness of one font face.
pub trait FontProbe {
    /// `Ok(Some(bytes))` delivers font data to register, `Ok(None)` means the face
    /// is ready without new data. `Err` becomes a [`FontLoadWarning`].
    fn probe(&self, rule: &FontFaceRule) -> impl Future<Output = anyhow::Result<Option<Vec<u8>>>>;
}

impl<T: FontProbe + ?Sized> FontProbe for &T {
    fn probe(&self, rule: &FontFaceRule) -> impl Future<Output = anyhow::Result<Option<Vec<u8>>>> {
        (**self).probe(rule)
    }
}

/// Probe that downloads the first reachable `src` URL through a [`Fetch`]er.
/// `data:` sources are decoded in place.
#[derive(Clone, Debug)]
pub struct FetchFontProbe<F> {
    fetcher: F,
}

impl<F: Fetch> FetchFontProbe<F> {
    /// Wrap a fetcher.
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }
}

impl<F: Fetch> FontProbe for FetchFontProbe<F> {
    async fn probe(&self, rule: &FontFaceRule) -> anyhow::Result<Option<Vec<u8>>> {
        let mut last_err = None;
        for source in &rule.sources {
            let got = if source.scheme() == "data" {
                decode_data_url(source)
            } else {
                fetch_ok(&self.fetcher, source)
                    .await
                    .map_err(anyhow::Error::new)
            };
            match got {
                Ok(bytes) => return Ok(Some(bytes)),
                Err(e) => last_err = Some(e),
            }
        }
        match last_err {
            Some(e) => Err(e),
            // Only local() sources, nothing to download.
            None => Ok(None),
        }
    }
}

/// Inline font data; never touches the fetcher.
fn decode_data_url(source: &Url) -> anyhow::Result<Vec<u8>> {
    let url = data_url::DataUrl::process(source.as_str())
        .map_err(|e| anyhow::anyhow!("malformed data: URL: {e}"))?;
    let (bytes, _) = url
        .decode_to_vec()
        .map_err(|e| anyhow::anyhow!("undecodable data: URL body: {e}"))?;
    Ok(bytes)
}

/// Collect the `@font-face` rules of `sheets`, resolving sources against `base`.
///
/// Rules without a `font-family` are skipped.
pub fn scan_font_faces(sheets: &[String], base: &Url) -> Vec<FontFaceRule> {
    let mut rules = Vec::new();
    for sheet in sheets {
        let lower = sheet.to_ascii_lowercase();
        let mut i = 0;
        while let Some(pos) = lower[i..].find("@font-face") {
            let after = i + pos + "@font-face".len();
            let Some(open) = sheet[after..].find('{').map(|o| after + o + 1) else {
                break;
            };
            let close = sheet[open..].find('}').map_or(sheet.len(), |c| open + c);
            if let Some(rule) = parse_font_face(&sheet[open..close], base) {
                rules.push(rule);
            }
            i = close;
        }
    }
    rules
}

fn parse_font_face(body: &str, base: &Url) -> Option<FontFaceRule> {
    let mut family = None;
    let mut weight = None;
    let mut style = None;
    let mut sources = Vec::new();

    for decl in split_declarations(body) {
        let Some((name, value)) = decl.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match name.trim().to_ascii_lowercase().as_str() {
            "font-family" => family = Some(unquote(value).to_string()),
            "font-weight" => weight = Some(value.to_string()),
            "font-style" => style = Some(value.to_string()),
            "src" => sources.extend(url_sources(value, base)),
            _ => {}
        }
    }

    let family = family.filter(|f| !f.is_empty())?;
    Some(FontFaceRule {
        family,
        weight: weight.unwrap_or_else(|| "normal".to_string()),
        style: style.unwrap_or_else(|| "normal".to_string()),
        sources,
    })
}

/// Split a declaration block on `;` outside quotes and parentheses.
fn split_declarations(body: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut quote = None;
    let mut start = 0;
    for (i, c) in body.char_indices() {
        match (quote, c) {
            (Some(q), _) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                out.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    out.push(&body[start..]);
    out
}

fn unquote(value: &str) -> &str {
    let v = value.trim();
    for q in ['"', '\''] {
        if let Some(inner) = v.strip_prefix(q).and_then(|s| s.strip_suffix(q)) {
            return inner.trim();
        }
    }
    v
}

fn url_sources(value: &str, base: &Url) -> Vec<Url> {
    let lower = value.to_ascii_lowercase();
    let mut out = Vec::new();
    let mut i = 0;
    while let Some(pos) = lower[i..].find("url(") {
        let open = i + pos + 4;
        match parse_url_arg(&value[open..]) {
            Some((arg, len)) => {
                match base.join(arg.trim()) {
                    Ok(url) => out.push(url),
                    Err(e) => tracing::debug!(source = arg, error = %e, "unusable font source"),
                }
                i = open + len;
            }
            None => i = open,
        }
    }
    out
}

/// Run every probe concurrently and register delivered font data in `db`.
///
/// Returns one warning per rule that could not be satisfied; each is also logged.
pub async fn await_fonts<P: FontProbe + ?Sized>(
    rules: &[FontFaceRule],
    probe: &P,
    db: &mut usvg::fontdb::Database,
) -> Vec<FontLoadWarning> {
    let results = futures::future::join_all(rules.iter().map(|rule| probe.probe(rule))).await;

    let mut warnings = Vec::new();
    for (rule, result) in rules.iter().zip(results) {
        let reason = match result {
            Ok(Some(bytes)) => {
                let before = db.len();
                db.load_font_data(bytes);
                if db.len() > before {
                    tracing::debug!(font = %rule.query(), faces = db.len() - before, "font ready");
                    continue;
                }
                "font data contains no usable face".to_string()
            }
            Ok(None) => {
                tracing::debug!(font = %rule.query(), "font ready without download");
                continue;
            }
            Err(e) => format!("{e:#}"),
        };
        let warning = FontLoadWarning {
            family: rule.family.clone(),
            reason,
        };
        tracing::warn!("{warning}");
        warnings.push(warning);
    }
    warnings
}

#[cfg(test)]
#[path = "../../tests/unit/loader/fonts.rs"]
mod tests;
