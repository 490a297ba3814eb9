//! Natural content bounds of an SVG document.

use std::sync::Arc;

use anyhow::Context as _;

use crate::{
    foundation::{
        core::{Rect, parse_leading_number},
        error::EmbedResult,
    },
    loader::markup,
};

/// Which rule produced the natural bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundsSource {
    /// A valid `viewBox` attribute.
    ViewBox,
    /// Numeric `width` and `height` attributes.
    Size,
    /// Geometric bounding box of the rendered content, padded.
    Measured,
}

/// Content bounds at 100% zoom.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct NaturalBounds {
    /// Origin and extent in content coordinates.
    pub rect: Rect,
    /// Rule that produced `rect`.
    pub source: BoundsSource,
}

/// Parse `"x y w h"` (whitespace and/or comma separated).
///
/// `None` unless there are exactly four finite numbers with positive width and height.
pub fn parse_view_box(raw: &str) -> Option<Rect> {
    let nums: Vec<f64> = raw
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f64>().ok().filter(|v| v.is_finite()))
        .collect::<Option<_>>()?;
    let [x, y, w, h] = nums[..] else {
        return None;
    };
    if w <= 0.0 || h <= 0.0 {
        return None;
    }
    Some(Rect::new(x, y, x + w, y + h))
}

fn parse_length(raw: &str) -> Option<f64> {
    if raw.trim_end().ends_with('%') {
        return None;
    }
    parse_leading_number(raw).filter(|v| *v > 0.0)
}

/// Bounds the root element declares itself, via `viewBox` or `width`/`height`.
pub fn declared_bounds(src: &str) -> EmbedResult<Option<NaturalBounds>> {
    let doc = markup::parse_document(src)?;
    let root = markup::svg_root(&doc)?;

    if let Some(rect) = markup::plain_attribute(root, "viewBox").and_then(|a| parse_view_box(a.value())) {
        return Ok(Some(NaturalBounds {
            rect,
            source: BoundsSource::ViewBox,
        }));
    }

    let width = markup::plain_attribute(root, "width").and_then(|a| parse_length(a.value()));
    let height = markup::plain_attribute(root, "height").and_then(|a| parse_length(a.value()));
    Ok(match (width, height) {
        (Some(w), Some(h)) => Some(NaturalBounds {
            rect: Rect::new(0.0, 0.0, w, h),
            source: BoundsSource::Size,
        }),
        _ => None,
    })
}

/// Measure the geometric bounding box of the content in user units, padded on
/// every side.
///
/// Text is laid out with `fontdb`, so this must run after the font barrier.
pub fn measure_bounds(
    src: &str,
    fontdb: Arc<usvg::fontdb::Database>,
    padding: f64,
) -> EmbedResult<Rect> {
    // Without a viewBox user units map 1:1 to the canvas, so the tree bounds are
    // in content coordinates.
    let probe = markup::set_root_attributes(
        src,
        &[
            ("viewBox", None),
            ("width", Some("100")),
            ("height", Some("100")),
        ],
    )?;
    let opts = usvg::Options {
        fontdb,
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(&probe, &opts).context("measure svg content")?;

    let root = tree.root();
    let bbox = if root.has_children() {
        let b = root.abs_bounding_box();
        Rect::new(
            f64::from(b.left()),
            f64::from(b.top()),
            f64::from(b.right()),
            f64::from(b.bottom()),
        )
    } else {
        Rect::ZERO
    };
    tracing::debug!(?bbox, padding, "measured svg content");
    Ok(bbox.inflate(padding, padding))
}

/// Natural bounds in priority order: `viewBox`, `width`/`height`, measured content.
pub fn natural_bounds(
    src: &str,
    fontdb: Arc<usvg::fontdb::Database>,
    padding: f64,
) -> EmbedResult<NaturalBounds> {
    if let Some(declared) = declared_bounds(src)? {
        return Ok(declared);
    }
    Ok(NaturalBounds {
        rect: measure_bounds(src, fontdb, padding)?,
        source: BoundsSource::Measured,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/loader/bounds.rs"]
mod tests;
