//! Pointer, touch and wheel interpretation for one widget.

use crate::{
    config::EmbedConfig,
    foundation::core::{Point, Rect},
    transform::zoom_pan::ZoomPan,
};

/// Active gesture of a session. Exactly one mode at a time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureMode {
    /// No pointer or touch is held.
    Idle,
    /// One pointer/finger is dragging the content.
    Panning {
        /// Last observed position in screen pixels.
        last: Point,
    },
    /// Two fingers are pinching.
    Pinching {
        /// Last observed distance between the two fingers, in screen pixels.
        last_distance: f64,
    },
}

/// Raw input, already reduced to screen-pixel positions.
///
/// Touch events carry the positions of all touches still active after the event,
/// in the order the browser reports them.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Mouse button pressed over the canvas.
    PointerDown(Point),
    /// Mouse moved over the canvas.
    PointerMove(Point),
    /// Mouse button released anywhere in the window.
    PointerUp,
    /// Pointer left the browser window.
    PointerLeave,
    /// A finger touched the canvas.
    TouchStart(Vec<Point>),
    /// One or more fingers moved.
    TouchMove(Vec<Point>),
    /// A finger was lifted.
    TouchEnd(Vec<Point>),
    /// Wheel tick; only the sign of `delta_y` matters.
    Wheel {
        /// Vertical scroll delta reported by the browser.
        delta_y: f64,
    },
}

/// How a change in finger distance turns into a zoom delta.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PinchResponse {
    /// `zoom_by(distance_delta * sensitivity)`.
    Proportional(f64),
    /// `zoom_by(±step)` by the sign of the distance delta.
    Stepped(f64),
}

impl PinchResponse {
    fn zoom_delta(self, distance_delta: f64) -> Option<f64> {
        if distance_delta == 0.0 || !distance_delta.is_finite() {
            return None;
        }
        Some(match self {
            Self::Proportional(sensitivity) => distance_delta * sensitivity,
            Self::Stepped(step) => step.copysign(distance_delta),
        })
    }
}

/// Drag indicator transitions, for the grab/grabbing cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragChange {
    /// A pan started.
    Started,
    /// The pan ended.
    Ended,
}

/// What handling one event did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GestureOutcome {
    /// The viewport was translated.
    pub panned: bool,
    /// The zoom level changed.
    pub zoomed: bool,
    /// New coordinate readout, for pointer moves.
    pub readout: Option<String>,
    /// Drag indicator change, if any.
    pub drag: Option<DragChange>,
}

impl GestureOutcome {
    /// Whether the viewport state changed and must be re-emitted.
    pub fn mutated(&self) -> bool {
        self.panned || self.zoomed
    }
}

/// State machine turning raw input into [`ZoomPan`] calls.
#[derive(Clone, Debug)]
pub struct GestureInterpreter {
    mode: GestureMode,
    pinch: PinchResponse,
    wheel_step: f64,
}

fn distance(touches: &[Point]) -> Option<f64> {
    match touches {
        [a, b, ..] => Some(a.distance(*b)),
        _ => None,
    }
}

impl GestureInterpreter {
    /// Build an idle interpreter.
    pub fn new(pinch: PinchResponse, wheel_step: f64) -> Self {
        Self {
            mode: GestureMode::Idle,
            pinch,
            wheel_step,
        }
    }

    /// Interpreter tuned for SVG viewports (proportional pinch).
    pub fn for_svg(config: &EmbedConfig) -> Self {
        Self::new(
            PinchResponse::Proportional(config.pinch_sensitivity),
            config.zoom_step,
        )
    }

    /// Interpreter tuned for image viewports (stepped pinch).
    pub fn for_image(config: &EmbedConfig) -> Self {
        Self::new(
            PinchResponse::Stepped(config.image_pinch_step),
            config.zoom_step,
        )
    }

    /// Current mode.
    pub fn mode(&self) -> GestureMode {
        self.mode
    }

    fn enter(&mut self, next: GestureMode, out: &mut GestureOutcome) {
        let was_panning = matches!(self.mode, GestureMode::Panning { .. });
        let is_panning = matches!(next, GestureMode::Panning { .. });
        out.drag = match (was_panning, is_panning) {
            (false, true) => Some(DragChange::Started),
            (true, false) => Some(DragChange::Ended),
            _ => out.drag,
        };
        self.mode = next;
    }

    fn drag_to<T: ZoomPan + ?Sized>(
        &mut self,
        last: Point,
        current: Point,
        target: &mut T,
        viewport: Rect,
        out: &mut GestureOutcome,
    ) {
        let delta = target.drag_delta(current - last, viewport);
        target.pan_by(delta);
        self.mode = GestureMode::Panning { last: current };
        out.panned = true;
    }

    /// Feed one event. `viewport` is the current on-screen rect of the canvas.
    pub fn handle<T: ZoomPan + ?Sized>(
        &mut self,
        event: &InputEvent,
        target: &mut T,
        viewport: Rect,
    ) -> GestureOutcome {
        target.observe_viewport(viewport);
        let mut out = GestureOutcome::default();

        match event {
            InputEvent::Wheel { delta_y } => {
                let step = if *delta_y > 0.0 {
                    -self.wheel_step
                } else if *delta_y < 0.0 {
                    self.wheel_step
                } else {
                    return out;
                };
                out.zoomed = target.zoom_by(step);
            }
            InputEvent::PointerDown(p) => {
                self.enter(GestureMode::Panning { last: *p }, &mut out);
            }
            InputEvent::PointerMove(p) => {
                out.readout = target.readout(*p, viewport);
                if let GestureMode::Panning { last } = self.mode {
                    self.drag_to(last, *p, target, viewport, &mut out);
                }
            }
            InputEvent::PointerUp | InputEvent::PointerLeave => {
                if matches!(self.mode, GestureMode::Panning { .. }) {
                    self.enter(GestureMode::Idle, &mut out);
                }
            }
            InputEvent::TouchStart(touches) => match touches.as_slice() {
                [] => self.enter(GestureMode::Idle, &mut out),
                [only] => self.enter(GestureMode::Panning { last: *only }, &mut out),
                many => {
                    if let Some(d) = distance(many) {
                        self.enter(GestureMode::Pinching { last_distance: d }, &mut out);
                    }
                }
            },
            InputEvent::TouchMove(touches) => match (self.mode, touches.as_slice()) {
                (GestureMode::Panning { last }, [only]) => {
                    self.drag_to(last, *only, target, viewport, &mut out);
                }
                (_, many) if many.len() >= 2 => {
                    let Some(current) = distance(many) else {
                        return out;
                    };
                    if let GestureMode::Pinching { last_distance } = self.mode {
                        if let Some(delta) = self.pinch.zoom_delta(current - last_distance) {
                            out.zoomed = target.zoom_by(delta);
                        }
                    }
                    self.enter(
                        GestureMode::Pinching {
                            last_distance: current,
                        },
                        &mut out,
                    );
                }
                _ => {}
            },
            InputEvent::TouchEnd(remaining) => match distance(remaining) {
                Some(d) if matches!(self.mode, GestureMode::Pinching { .. }) => {
                    self.mode = GestureMode::Pinching { last_distance: d };
                }
                _ => self.enter(GestureMode::Idle, &mut out),
            },
        }

        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gesture/session.rs"]
mod tests;
