//! One mounted widget: content, viewport engine, gesture session and output sink.

use crate::{
    config::EmbedConfig,
    foundation::{
        core::{Rect, Size},
        error::EmbedResult,
    },
    gesture::session::{DragChange, GestureInterpreter, GestureMode, GestureOutcome, InputEvent},
    loader::content::{EmbedKind, LoadedContent},
    shell::{
        actions::{
            DownloadArtifact, FullscreenRequest, FullscreenToggle, ToolbarAction,
            download_file_name, path_extension,
        },
        surface::{FrameScheduler, ViewSink},
        template::{ElementIds, widget_html},
    },
    transform::{
        directive::zoom_label,
        zoom_pan::{Viewport, ZoomPan},
    },
};

/// Result of a toolbar action.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionOutcome {
    /// A viewport action ran; `changed` is false when it was a no-op.
    Viewport {
        /// Whether the state changed and was re-emitted.
        changed: bool,
    },
    /// The content to hand to the browser as a file.
    Download(DownloadArtifact),
    /// The fullscreen transition that was requested from the sink.
    Fullscreen(FullscreenRequest),
}

/// A live widget. Owns all of its state; widgets share nothing.
#[derive(Debug)]
pub struct Widget<S> {
    ids: ElementIds,
    title: String,
    content: LoadedContent,
    viewport: Viewport,
    gestures: GestureInterpreter,
    frames: FrameScheduler,
    fullscreen: FullscreenToggle,
    zoom_step: f64,
    sink: S,
}

impl<S: ViewSink> Widget<S> {
    /// Build the engine for `content` and emit the initial state to `sink`.
    ///
    /// `canvas` is the on-screen size of the canvas area at mount time.
    pub fn new(
        content: LoadedContent,
        ids: ElementIds,
        title: impl Into<String>,
        canvas: Size,
        config: &EmbedConfig,
        sink: S,
    ) -> Self {
        let viewport = content.viewport(canvas, config);
        let gestures = match content.kind() {
            EmbedKind::Svg => GestureInterpreter::for_svg(config),
            EmbedKind::Image => GestureInterpreter::for_image(config),
        };
        let mut widget = Self {
            ids,
            title: title.into(),
            content,
            viewport,
            gestures,
            frames: FrameScheduler::default(),
            fullscreen: FullscreenToggle::default(),
            zoom_step: config.zoom_step,
            sink,
        };
        widget.emit_now();
        widget
    }

    /// Element ids of this widget.
    pub fn ids(&self) -> &ElementIds {
        &self.ids
    }

    /// Title shown in the top toolbar.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The loaded content.
    pub fn content(&self) -> &LoadedContent {
        &self.content
    }

    /// The viewport engine.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Current gesture mode.
    pub fn gesture_mode(&self) -> GestureMode {
        self.gestures.mode()
    }

    /// The output sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the widget, returning its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Complete widget markup with the content in the canvas area.
    pub fn html(&self) -> String {
        let canvas = self.content.canvas_markup(&self.ids.instance, &self.title);
        widget_html(&self.ids, &self.title, &canvas)
    }

    fn emit_now(&mut self) {
        self.sink.render(&self.viewport.directive());
        self.sink.zoom_label(&zoom_label(self.viewport.percent()));
    }

    /// Defer the repaint to the next animation frame, requesting one if none is pending.
    fn schedule_paint(&mut self) {
        if self.frames.schedule() {
            self.sink.request_frame();
        }
    }

    /// Run a toolbar action.
    pub fn dispatch(&mut self, action: ToolbarAction) -> EmbedResult<ActionOutcome> {
        let changed = match action {
            ToolbarAction::ZoomIn => self.viewport.zoom_by(self.zoom_step),
            ToolbarAction::ZoomOut => self.viewport.zoom_by(-self.zoom_step),
            ToolbarAction::Reset => {
                self.viewport.reset();
                true
            }
            ToolbarAction::Center => {
                self.viewport.center();
                true
            }
            ToolbarAction::Download => return Ok(ActionOutcome::Download(self.download()?)),
            ToolbarAction::ToggleFullscreen => {
                let request = self.fullscreen.toggle(&self.ids.container);
                self.sink.fullscreen(&request);
                return Ok(ActionOutcome::Fullscreen(request));
            }
        };
        if changed {
            self.emit_now();
        }
        tracing::trace!(widget = %self.ids.instance, ?action, changed, "toolbar action");
        Ok(ActionOutcome::Viewport { changed })
    }

    /// Dispatch the action behind a toolbar button element id.
    ///
    /// `None` when the id does not belong to one of this widget's buttons.
    pub fn click(&mut self, element_id: &str) -> Option<EmbedResult<ActionOutcome>> {
        let action = self.ids.action_for_button(element_id)?;
        Some(self.dispatch(action))
    }

    /// What the download button saves: the SVG as currently framed, or the image bytes.
    pub fn download(&self) -> EmbedResult<DownloadArtifact> {
        match (&self.content, &self.viewport) {
            (LoadedContent::Svg(svg), viewport) => {
                let view_box = match viewport {
                    Viewport::Svg(v) => v.visible_rect(),
                    Viewport::Image(_) => svg.bounds.rect,
                };
                Ok(DownloadArtifact {
                    file_name: download_file_name(&self.title, "svg"),
                    mime: "image/svg+xml".to_string(),
                    bytes: svg.markup_with_view_box(view_box)?.into_bytes(),
                })
            }
            (LoadedContent::Image(img), _) => {
                let ext = path_extension(img.url.path()).unwrap_or("png");
                Ok(DownloadArtifact {
                    file_name: download_file_name(&self.title, ext),
                    mime: img.mime.clone(),
                    bytes: img.bytes.clone(),
                })
            }
        }
    }

    /// Feed one input event. `canvas` is the current on-screen rect of the content.
    ///
    /// Viewport changes are painted by [`Widget::on_animation_frame`]; readout and
    /// cursor updates are written at once.
    pub fn handle_input(&mut self, event: &InputEvent, canvas: Rect) -> GestureOutcome {
        let outcome = self.gestures.handle(event, &mut self.viewport, canvas);
        if outcome.mutated() {
            self.schedule_paint();
        }
        if let Some(text) = &outcome.readout {
            self.sink.coordinates(text);
        }
        match outcome.drag {
            Some(DragChange::Started) => self.sink.dragging(true),
            Some(DragChange::Ended) => self.sink.dragging(false),
            None => {}
        }
        outcome
    }

    /// The requested animation frame arrived. Paints the latest viewport state if a
    /// repaint was pending and returns whether it was.
    pub fn on_animation_frame(&mut self) -> bool {
        if !self.frames.frame() {
            return false;
        }
        self.emit_now();
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shell/widget.rs"]
mod tests;
