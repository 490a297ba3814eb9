//! SVG viewport engine: origin/extent state driven by a logarithmic zoom scale.

use crate::{
    config::EmbedConfig,
    foundation::core::{Point, Rect, Size, Vec2},
    transform::directive::{RenderDirective, round_half_up},
};

/// Logarithmic zoom scale: `factor(s) = base^(s / 100)`.
///
/// Percentages map to scroll values through `s = ln(100 / p) / ln(base) * 100`, so
/// `factor(s(p)) == 100 / p` and successive steps compose multiplicatively.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogZoomScale {
    base: f64,
}

impl LogZoomScale {
    /// Build a scale with the given base (must be > 1).
    pub fn new(base: f64) -> Self {
        Self { base }
    }

    /// Multiplicative factor for a scroll value.
    pub fn factor(self, scroll: f64) -> f64 {
        self.base.powf(scroll / 100.0)
    }

    /// Scroll value corresponding to a displayed percentage.
    pub fn scroll_from_percent(self, percent: f64) -> f64 {
        (100.0 / percent).ln() / self.base.ln() * 100.0
    }
}

/// Observable state of one SVG viewport.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ViewportState {
    /// Top-left of the visible window in content coordinates.
    pub origin: Point,
    /// Size of the visible window in content coordinates.
    pub extent: Size,
    /// User-facing zoom level.
    pub percent: f64,
    /// Auxiliary logarithmic scroll value kept in sync with `percent`.
    pub log_scroll: f64,
}

/// Transform engine for an embedded SVG.
#[derive(Clone, Debug)]
pub struct SvgViewport {
    state: ViewportState,
    baseline: Rect,
    scale: LogZoomScale,
    min_percent: f64,
    max_percent: f64,
}

impl SvgViewport {
    /// Construct at 100% centered on `baseline`, the natural bounds of the content.
    pub fn new(baseline: Rect, config: &EmbedConfig) -> Self {
        let mut out = Self {
            state: ViewportState {
                origin: baseline.origin(),
                extent: baseline.size(),
                percent: 100.0,
                log_scroll: 0.0,
            },
            baseline,
            scale: LogZoomScale::new(config.log_base),
            min_percent: config.min_percent,
            max_percent: config.max_percent,
        };
        out.zoom_to(100.0, true);
        out
    }

    /// Current state.
    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    /// Natural content bounds the viewport was built with.
    pub fn baseline(&self) -> Rect {
        self.baseline
    }

    /// Displayed zoom percentage.
    pub fn percent(&self) -> f64 {
        self.state.percent
    }

    /// Visible window in content coordinates.
    pub fn visible_rect(&self) -> Rect {
        Rect::from_origin_size(self.state.origin, self.state.extent)
    }

    fn visible_center(&self) -> Point {
        self.state.origin + self.state.extent.to_vec2() * 0.5
    }

    fn place_center(&mut self, center: Point) {
        self.state.origin = center - self.state.extent.to_vec2() * 0.5;
    }

    /// Relative zoom keeping the visible-window center fixed.
    ///
    /// Returns `false` (and leaves the state untouched) when the clamped percentage
    /// equals the current one.
    pub fn zoom_by(&mut self, percent_delta: f64) -> bool {
        let next = (self.state.percent + percent_delta).clamp(self.min_percent, self.max_percent);
        if next == self.state.percent {
            return false;
        }

        let old_scroll = self.state.log_scroll;
        let new_scroll = self.scale.scroll_from_percent(next);
        let factor = self.scale.factor(new_scroll) / self.scale.factor(old_scroll);

        let center = self.visible_center();
        self.state.extent = self.state.extent * factor;
        self.place_center(center);

        self.state.log_scroll = new_scroll;
        self.state.percent = next;
        true
    }

    /// Absolute zoom. Centers on the content when `recenter_on_content` is set,
    /// otherwise on the current visible-window center.
    pub fn zoom_to(&mut self, percent: f64, recenter_on_content: bool) {
        let percent = percent.clamp(self.min_percent, self.max_percent);
        let center = if recenter_on_content {
            self.baseline.center()
        } else {
            self.visible_center()
        };

        self.state.percent = percent;
        self.state.log_scroll = self.scale.scroll_from_percent(percent);
        self.state.extent = self.baseline.size() * (100.0 / percent);
        self.place_center(center);
    }

    /// Translate the origin by `delta` content units. Unclamped.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.state.origin += delta;
    }

    /// Recenter on the content without changing the zoom.
    pub fn center(&mut self) {
        self.place_center(self.baseline.center());
    }

    /// Back to 100%, centered on the content.
    pub fn reset(&mut self) {
        self.zoom_to(100.0, true);
    }

    /// Content units covered by one screen pixel along X.
    ///
    /// X and Y share the factor since zoom is uniform.
    pub fn units_per_pixel(&self, viewport: Rect) -> Option<f64> {
        (viewport.width() > 0.0).then(|| self.state.extent.width / viewport.width())
    }

    /// Map a screen point into content coordinates given the on-screen rect of the SVG.
    pub fn screen_to_content(&self, screen: Point, viewport: Rect) -> Option<Point> {
        if viewport.width() <= 0.0 || viewport.height() <= 0.0 {
            return None;
        }
        let s = &self.state;
        Some(Point::new(
            s.origin.x + (screen.x - viewport.x0) / viewport.width() * s.extent.width,
            s.origin.y + (screen.y - viewport.y0) / viewport.height() * s.extent.height,
        ))
    }

    /// Inverse of [`SvgViewport::screen_to_content`].
    pub fn content_to_screen(&self, content: Point, viewport: Rect) -> Option<Point> {
        let s = &self.state;
        if s.extent.width <= 0.0 || s.extent.height <= 0.0 {
            return None;
        }
        Some(Point::new(
            viewport.x0 + (content.x - s.origin.x) / s.extent.width * viewport.width(),
            viewport.y0 + (content.y - s.origin.y) / s.extent.height * viewport.height(),
        ))
    }

    /// Current `viewBox` directive.
    pub fn directive(&self) -> RenderDirective {
        RenderDirective::ViewBox(self.visible_rect())
    }

    /// Coordinate readout label for a pointer position.
    pub fn readout(&self, screen: Point, viewport: Rect) -> Option<String> {
        let p = self.screen_to_content(screen, viewport)?;
        Some(format!("X: {:.1} Y: {:.1}", round_tenth(p.x), round_tenth(p.y)))
    }
}

fn round_tenth(v: f64) -> f64 {
    round_half_up(v * 10.0) / 10.0
}

#[cfg(test)]
#[path = "../../tests/unit/transform/viewport.rs"]
mod tests;
