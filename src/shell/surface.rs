//! Output side of a widget: where directives and labels are written.

use crate::{shell::actions::FullscreenRequest, transform::directive::RenderDirective};

/// Receives everything a widget writes back to its page.
///
/// Toolbar actions write synchronously. Gesture changes only call `request_frame`,
/// at most once until the frame is delivered, and are written when it arrives.
pub trait ViewSink {
    /// Apply a rendering directive to the content element.
    fn render(&mut self, directive: &RenderDirective);

    /// Replace the zoom label text.
    fn zoom_label(&mut self, text: &str);

    /// Replace the coordinate readout text.
    fn coordinates(&mut self, text: &str);

    /// Switch the grab/grabbing cursor state of the canvas.
    fn dragging(&mut self, active: bool);

    /// Ask for a repaint on the next animation frame.
    fn request_frame(&mut self);

    /// Enter or leave fullscreen.
    fn fullscreen(&mut self, request: &FullscreenRequest);
}

impl<S: ViewSink + ?Sized> ViewSink for &mut S {
    fn render(&mut self, directive: &RenderDirective) {
        (**self).render(directive);
    }

    fn zoom_label(&mut self, text: &str) {
        (**self).zoom_label(text);
    }

    fn coordinates(&mut self, text: &str) {
        (**self).coordinates(text);
    }

    fn dragging(&mut self, active: bool) {
        (**self).dragging(active);
    }

    fn request_frame(&mut self) {
        (**self).request_frame();
    }

    fn fullscreen(&mut self, request: &FullscreenRequest) {
        (**self).fullscreen(request);
    }
}

/// A sink that just remembers the latest value of everything written to it.
///
/// Used by the CLI to snapshot the initial state and by tests to observe widgets.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct SurfaceState {
    /// Last rendering directive.
    pub directive: Option<RenderDirective>,
    /// Directive in its attribute/CSS text form.
    pub directive_text: String,
    /// Zoom label text.
    pub zoom_label: String,
    /// Coordinate readout text.
    pub coordinates: String,
    /// Whether the canvas shows the grabbing cursor.
    pub dragging: bool,
    /// Number of animation frames requested so far.
    pub frames_requested: usize,
    /// Number of directives written so far.
    pub renders: usize,
    /// Last fullscreen request.
    pub fullscreen: Option<FullscreenRequest>,
}

impl ViewSink for SurfaceState {
    fn render(&mut self, directive: &RenderDirective) {
        self.directive = Some(*directive);
        self.directive_text = directive.to_string();
        self.renders += 1;
    }

    fn zoom_label(&mut self, text: &str) {
        self.zoom_label = text.to_string();
    }

    fn coordinates(&mut self, text: &str) {
        self.coordinates = text.to_string();
    }

    fn dragging(&mut self, active: bool) {
        self.dragging = active;
    }

    fn request_frame(&mut self) {
        self.frames_requested += 1;
    }

    fn fullscreen(&mut self, request: &FullscreenRequest) {
        self.fullscreen = Some(request.clone());
    }
}

/// Dirty flag plus next-frame callback: at most one pending repaint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameScheduler {
    pending: bool,
}

impl FrameScheduler {
    /// Mark dirty. Returns `true` when a frame must be requested, i.e. none is pending.
    pub fn schedule(&mut self) -> bool {
        !std::mem::replace(&mut self.pending, true)
    }

    /// The requested frame arrived. Returns whether a repaint was pending.
    pub fn frame(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// Whether a frame has been requested and not delivered yet.
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shell/surface.rs"]
mod tests;
