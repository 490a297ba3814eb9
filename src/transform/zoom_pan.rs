//! The seam between input handling and the two viewport engines.

use crate::{
    foundation::core::{Point, Rect, Vec2},
    transform::{directive::RenderDirective, image::ImageViewport, viewport::SvgViewport},
};

/// Operations the gesture interpreter and the toolbar drive.
pub trait ZoomPan {
    /// Displayed zoom percentage.
    fn percent(&self) -> f64;

    /// Relative zoom; `false` when the clamped result equals the current level.
    fn zoom_by(&mut self, percent_delta: f64) -> bool;

    /// Translate by a delta already expressed in the engine's pan units.
    fn pan_by(&mut self, delta: Vec2);

    /// Convert a pointer movement in screen pixels into the engine's pan units.
    fn drag_delta(&self, screen_delta: Vec2, viewport: Rect) -> Vec2;

    /// Recenter without changing zoom.
    fn center(&mut self);

    /// Back to 100%, recentered.
    fn reset(&mut self);

    /// Rendering directive for the current state.
    fn directive(&self) -> RenderDirective;

    /// Coordinate readout for a pointer position, if the viewport rect is usable.
    fn readout(&self, screen: Point, viewport: Rect) -> Option<String>;

    /// Notify the engine of the current on-screen rect of its canvas.
    fn observe_viewport(&mut self, _viewport: Rect) {}
}

impl ZoomPan for SvgViewport {
    fn percent(&self) -> f64 {
        Self::percent(self)
    }

    fn zoom_by(&mut self, percent_delta: f64) -> bool {
        Self::zoom_by(self, percent_delta)
    }

    fn pan_by(&mut self, delta: Vec2) {
        Self::pan_by(self, delta);
    }

    fn drag_delta(&self, screen_delta: Vec2, viewport: Rect) -> Vec2 {
        // Dragging right moves the visible window left over the content.
        match self.units_per_pixel(viewport) {
            Some(k) => -screen_delta * k,
            None => Vec2::ZERO,
        }
    }

    fn center(&mut self) {
        Self::center(self);
    }

    fn reset(&mut self) {
        Self::reset(self);
    }

    fn directive(&self) -> RenderDirective {
        Self::directive(self)
    }

    fn readout(&self, screen: Point, viewport: Rect) -> Option<String> {
        Self::readout(self, screen, viewport)
    }
}

impl ZoomPan for ImageViewport {
    fn percent(&self) -> f64 {
        Self::percent(self)
    }

    fn zoom_by(&mut self, percent_delta: f64) -> bool {
        Self::zoom_by(self, percent_delta)
    }

    fn pan_by(&mut self, delta: Vec2) {
        Self::pan_by(self, delta);
    }

    fn drag_delta(&self, screen_delta: Vec2, _viewport: Rect) -> Vec2 {
        screen_delta
    }

    fn center(&mut self) {
        Self::center(self);
    }

    fn reset(&mut self) {
        Self::reset(self);
    }

    fn directive(&self) -> RenderDirective {
        Self::directive(self)
    }

    fn readout(&self, screen: Point, viewport: Rect) -> Option<String> {
        Some(Self::readout(self, screen, viewport))
    }

    fn observe_viewport(&mut self, viewport: Rect) {
        if viewport.size() != self.canvas() {
            self.set_canvas(viewport.size());
        }
    }
}

/// Either engine, so the widget shell is written once.
#[derive(Clone, Debug)]
pub enum Viewport {
    /// Viewport of an SVG document.
    Svg(SvgViewport),
    /// Viewport of a raster image.
    Image(ImageViewport),
}

macro_rules! delegate {
    ($self:ident, $v:ident => $body:expr) => {
        match $self {
            Viewport::Svg($v) => $body,
            Viewport::Image($v) => $body,
        }
    };
}

impl ZoomPan for Viewport {
    fn percent(&self) -> f64 {
        delegate!(self, v => ZoomPan::percent(v))
    }

    fn zoom_by(&mut self, percent_delta: f64) -> bool {
        delegate!(self, v => ZoomPan::zoom_by(v, percent_delta))
    }

    fn pan_by(&mut self, delta: Vec2) {
        delegate!(self, v => ZoomPan::pan_by(v, delta))
    }

    fn drag_delta(&self, screen_delta: Vec2, viewport: Rect) -> Vec2 {
        delegate!(self, v => ZoomPan::drag_delta(v, screen_delta, viewport))
    }

    fn center(&mut self) {
        delegate!(self, v => ZoomPan::center(v))
    }

    fn reset(&mut self) {
        delegate!(self, v => ZoomPan::reset(v))
    }

    fn directive(&self) -> RenderDirective {
        delegate!(self, v => ZoomPan::directive(v))
    }

    fn readout(&self, screen: Point, viewport: Rect) -> Option<String> {
        delegate!(self, v => ZoomPan::readout(v, screen, viewport))
    }

    fn observe_viewport(&mut self, viewport: Rect) {
        delegate!(self, v => ZoomPan::observe_viewport(v, viewport))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/zoom_pan.rs"]
mod tests;
