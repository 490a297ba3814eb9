//! Rendering directives written back to the painted element.

use crate::foundation::core::{Rect, Vec2, fmt_number};

/// What the surface must apply after a viewport mutation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderDirective {
    /// New `viewBox` of the root SVG element, in content coordinates.
    ViewBox(Rect),
    /// CSS transform of an image element: pixel translation then uniform scale.
    CssTransform {
        /// Translation in screen pixels.
        translate: Vec2,
        /// Uniform scale factor (`percent / 100`).
        scale: f64,
    },
}

impl RenderDirective {
    /// Name of the attribute or style property the directive targets.
    pub fn target(&self) -> &'static str {
        match self {
            Self::ViewBox(_) => "viewBox",
            Self::CssTransform { .. } => "transform",
        }
    }
}

impl std::fmt::Display for RenderDirective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ViewBox(r) => write!(
                f,
                "{} {} {} {}",
                fmt_number(r.x0),
                fmt_number(r.y0),
                fmt_number(r.width()),
                fmt_number(r.height())
            ),
            Self::CssTransform { translate, scale } => write!(
                f,
                "translate({}px, {}px) scale({})",
                fmt_number(translate.x),
                fmt_number(translate.y),
                fmt_number(*scale)
            ),
        }
    }
}

/// Round half towards positive infinity, the way browser labels round.
pub fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// Text of the zoom label for a displayed percentage.
pub fn zoom_label(percent: f64) -> String {
    format!("{}%", fmt_number(round_half_up(percent)))
}

#[cfg(test)]
#[path = "../../tests/unit/transform/directive.rs"]
mod tests;
