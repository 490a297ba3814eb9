//! Mount manager: turns container elements into widgets, once each.

use std::collections::BTreeMap;

use crate::{
    foundation::{
        core::Size,
        error::{EmbedError, EmbedResult},
    },
    loader::{
        content::{EmbedKind, load_content},
        fetch::Fetch,
        fonts::FontProbe,
        svg::LoadEnv,
    },
    shell::{
        surface::ViewSink,
        template::{ElementIds, error_html, new_instance_id},
        widget::Widget,
    },
};

/// Idempotency marker set on a mount point when its initialization starts.
pub const LOADED_MARKER: &str = "data-embed-loaded";

/// Optional title attribute of a mount point.
pub const TITLE_ATTRIBUTE: &str = "data-title";

/// A container element declared by the page, e.g.
/// `<div class="svg-root" data-svg-path="img/flow.svg" data-title="Flow">`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MountPoint {
    /// Which widget the container asks for.
    pub kind: EmbedKind,
    /// `data-*` attributes of the container.
    pub attributes: BTreeMap<String, String>,
    /// Inner HTML, replaced by the widget markup or an error message.
    pub content: String,
}

impl MountPoint {
    /// Empty container of `kind`.
    pub fn new(kind: EmbedKind) -> Self {
        Self {
            kind,
            attributes: BTreeMap::new(),
            content: String::new(),
        }
    }

    /// SVG container pointing at `path`.
    pub fn svg(path: &str) -> Self {
        Self::new(EmbedKind::Svg).with_attribute(EmbedKind::Svg.path_attribute(), path)
    }

    /// Image container pointing at `path`.
    pub fn image(path: &str) -> Self {
        Self::new(EmbedKind::Image).with_attribute(EmbedKind::Image.path_attribute(), path)
    }

    /// Set an attribute.
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    /// Set the title attribute.
    pub fn with_title(self, title: &str) -> Self {
        self.with_attribute(TITLE_ATTRIBUTE, title)
    }

    /// Whether initialization already started for this container.
    pub fn is_loaded(&self) -> bool {
        self.attributes.contains_key(LOADED_MARKER)
    }

    fn source_path(&self) -> EmbedResult<&str> {
        let attr = self.kind.path_attribute();
        self.attributes
            .get(attr)
            .map(String::as_str)
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| EmbedError::config(format!("attribute {attr} is not set")))
    }
}

/// Result of mounting one container.
#[derive(Debug)]
pub enum MountOutcome<S> {
    /// The container was initialized before; nothing was done.
    AlreadyMounted,
    /// The widget is live and its markup was written into the container.
    Mounted(Box<Widget<S>>),
    /// Initialization failed; the container now shows an error message.
    Failed(EmbedError),
}

impl<S> MountOutcome<S> {
    /// The widget, if mounting succeeded.
    pub fn widget(self) -> Option<Widget<S>> {
        match self {
            Self::Mounted(w) => Some(*w),
            _ => None,
        }
    }

    /// The error, if mounting failed.
    pub fn error(&self) -> Option<&EmbedError> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }
}

fn user_message(kind: EmbedKind, path: &str, err: &EmbedError) -> String {
    match (kind, err) {
        (_, EmbedError::Config(msg)) => format!("Cannot show this {}: {msg}.", kind.type_prefix()),
        (EmbedKind::Svg, EmbedError::Parse(_)) => "Invalid or empty SVG.".to_string(),
        (EmbedKind::Svg, _) => format!("Failed to load or process SVG: {err}"),
        (EmbedKind::Image, _) => format!("Failed to load image: {path}"),
    }
}

/// Mount `point` with a fresh random instance id.
pub async fn mount<F: Fetch, P: FontProbe, S: ViewSink>(
    env: &LoadEnv<F, P>,
    point: &mut MountPoint,
    canvas: Size,
    sink: S,
) -> MountOutcome<S> {
    let id = new_instance_id(point.kind);
    mount_with_id(env, point, &id, canvas, sink).await
}

/// Mount `point` as `instance_id`.
///
/// The marker is set before anything can fail, so a failed container is not
/// retried by later passes.
pub async fn mount_with_id<F: Fetch, P: FontProbe, S: ViewSink>(
    env: &LoadEnv<F, P>,
    point: &mut MountPoint,
    instance_id: &str,
    canvas: Size,
    sink: S,
) -> MountOutcome<S> {
    if point.is_loaded() {
        tracing::debug!(kind = ?point.kind, "already mounted");
        return MountOutcome::AlreadyMounted;
    }
    point
        .attributes
        .insert(LOADED_MARKER.to_string(), "true".to_string());

    let path = match point.source_path() {
        Ok(p) => p.to_string(),
        Err(err) => return fail(point, "", err),
    };
    if let Err(err) = env.config.validate() {
        return fail(point, &path, err);
    }

    let content = match load_content(env, point.kind, &path, instance_id).await {
        Ok(c) => c,
        Err(err) => return fail(point, &path, err),
    };

    let title = point
        .attributes
        .get(TITLE_ATTRIBUTE)
        .filter(|t| !t.is_empty())
        .cloned()
        .unwrap_or_else(|| point.kind.default_title(&env.config).to_string());

    let widget = Widget::new(
        content,
        ElementIds::new(point.kind, instance_id),
        title,
        canvas,
        &env.config,
        sink,
    );
    point.content = widget.html();
    tracing::info!(widget = instance_id, %path, "mounted");
    MountOutcome::Mounted(Box::new(widget))
}

fn fail<S>(point: &mut MountPoint, path: &str, err: EmbedError) -> MountOutcome<S> {
    tracing::error!(kind = ?point.kind, %path, error = %err, "embed initialization failed");
    point.content = error_html(&user_message(point.kind, path, &err));
    MountOutcome::Failed(err)
}

/// Mount every container concurrently. One failure never affects the others.
pub async fn mount_all<F: Fetch, P: FontProbe, S: ViewSink + Default>(
    env: &LoadEnv<F, P>,
    points: &mut [MountPoint],
    canvas: Size,
) -> Vec<MountOutcome<S>> {
    let pending = points
        .iter_mut()
        .map(|point| mount(env, point, canvas, S::default()));
    futures::future::join_all(pending).await
}

#[cfg(test)]
#[path = "../../tests/unit/shell/mount.rs"]
mod tests;
