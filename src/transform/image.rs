//! Image viewport engine: linear percent zoom plus a clamped pixel translation.

use crate::{
    config::EmbedConfig,
    foundation::core::{Point, Rect, Size, Vec2, fmt_number},
    transform::directive::{RenderDirective, round_half_up},
};

/// Transform engine for an embedded raster image.
///
/// The image is centered in its canvas; `pan` is the screen-pixel offset of its center.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageViewport {
    natural: Size,
    canvas: Size,
    percent: f64,
    pan: Vec2,
    min_percent: f64,
    max_percent: f64,
}

impl ImageViewport {
    /// Construct at 100% with no pan.
    pub fn new(natural: Size, canvas: Size, config: &EmbedConfig) -> Self {
        let mut out = Self {
            natural,
            canvas,
            percent: 100.0,
            pan: Vec2::ZERO,
            min_percent: config.min_percent,
            max_percent: config.max_percent,
        };
        out.clamp_pan();
        out
    }

    /// Natural pixel size of the image.
    pub fn natural(&self) -> Size {
        self.natural
    }

    /// Canvas size the pan is currently clamped against.
    pub fn canvas(&self) -> Size {
        self.canvas
    }

    /// Displayed zoom percentage.
    pub fn percent(&self) -> f64 {
        self.percent
    }

    /// Current translation in screen pixels.
    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    fn scale(&self) -> f64 {
        self.percent / 100.0
    }

    /// Largest allowed absolute pan per axis at the current zoom.
    pub fn max_pan(&self) -> Vec2 {
        let scaled = self.natural * self.scale();
        Vec2::new(
            ((scaled.width - self.canvas.width) / 2.0).max(0.0),
            ((scaled.height - self.canvas.height) / 2.0).max(0.0),
        )
    }

    fn clamp_pan(&mut self) {
        let max = self.max_pan();
        self.pan = Vec2::new(
            self.pan.x.clamp(-max.x, max.x),
            self.pan.y.clamp(-max.y, max.y),
        );
    }

    /// Update the canvas size (responsive layouts) and re-clamp the pan.
    pub fn set_canvas(&mut self, canvas: Size) {
        self.canvas = canvas;
        self.clamp_pan();
    }

    /// Linear zoom step clamped to the configured bounds.
    pub fn zoom_by(&mut self, percent_delta: f64) -> bool {
        let next = (self.percent + percent_delta).clamp(self.min_percent, self.max_percent);
        if next == self.percent {
            return false;
        }
        self.percent = next;
        self.clamp_pan();
        true
    }

    /// Accumulate a translation in screen pixels.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
        self.clamp_pan();
    }

    /// Drop the pan, keep the zoom.
    pub fn center(&mut self) {
        self.pan = Vec2::ZERO;
    }

    /// Back to 100% with no pan.
    pub fn reset(&mut self) {
        self.percent = 100.0;
        self.pan = Vec2::ZERO;
    }

    /// Map a screen point to natural image pixel coordinates.
    pub fn screen_to_image(&self, screen: Point, viewport: Rect) -> Point {
        let rel = screen - viewport.origin();
        let image_center = Vec2::new(viewport.width() / 2.0, viewport.height() / 2.0) + self.pan;
        let offset = (rel - image_center) / self.scale();
        Point::new(
            self.natural.width / 2.0 + offset.x,
            self.natural.height / 2.0 + offset.y,
        )
    }

    /// Current CSS transform directive.
    pub fn directive(&self) -> RenderDirective {
        RenderDirective::CssTransform {
            translate: self.pan,
            scale: self.scale(),
        }
    }

    /// Coordinate readout label for a pointer position.
    pub fn readout(&self, screen: Point, viewport: Rect) -> String {
        let p = self.screen_to_image(screen, viewport);
        format!(
            "X: {} Y: {}",
            fmt_number(round_half_up(p.x)),
            fmt_number(round_half_up(p.y))
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/image.rs"]
mod tests;
