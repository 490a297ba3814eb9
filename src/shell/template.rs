//! Widget markup: instance ids, element ids, styles and the toolbar skeleton.

use rand::Rng;

use crate::{
    loader::{content::EmbedKind, markup::escape_html},
    shell::actions::ToolbarAction,
    transform::directive::zoom_label,
};

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 9;

const STYLE_TEMPLATE: &str = include_str!("embed.css");

/// Stylesheet with the Material Icons font used by the toolbar buttons.
pub const ICON_FONT_LINK: &str =
    r#"<link href="https://fonts.googleapis.com/icon?family=Material+Icons" rel="stylesheet">"#;

/// Random instance id such as `my-svg-k3x9q0a1z`.
pub fn instance_id<R: Rng>(kind: EmbedKind, rng: &mut R) -> String {
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect();
    format!("my-{}-{suffix}", kind.type_prefix())
}

/// [`instance_id`] drawn from the thread-local generator.
#[must_use]
pub fn new_instance_id(kind: EmbedKind) -> String {
    instance_id(kind, &mut rand::rng())
}

/// Ids of the elements one widget owns.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ElementIds {
    /// Content kind the ids were derived for.
    pub kind: EmbedKind,
    /// Instance id.
    pub instance: String,
    /// Outer container, also the fullscreen target.
    pub container: String,
    /// Title span of the top toolbar.
    pub title: String,
    /// Canvas area holding the content.
    pub canvas: String,
    /// Zoom percentage label.
    pub zoom_label: String,
    /// Coordinate readout.
    pub coord_display: String,
}

impl ElementIds {
    /// Derive every element id of the widget `instance`.
    pub fn new(kind: EmbedKind, instance: &str) -> Self {
        let t = kind.type_prefix();
        Self {
            kind,
            instance: instance.to_string(),
            container: format!("{t}-container-{instance}"),
            title: format!("{t}-title-{instance}"),
            canvas: format!("canvas-area-{instance}"),
            zoom_label: format!("{t}-zoom-label-{instance}"),
            coord_display: format!("{t}-coord-display-{instance}"),
        }
    }

    /// Id of a toolbar button.
    pub fn button(&self, action: ToolbarAction) -> String {
        format!(
            "btn-{}-{}-{}",
            self.kind.type_prefix(),
            action.slug(),
            self.instance
        )
    }

    /// Inverse of [`ElementIds::button`].
    pub fn action_for_button(&self, element_id: &str) -> Option<ToolbarAction> {
        let slug = element_id
            .strip_prefix("btn-")?
            .strip_prefix(self.kind.type_prefix())?
            .strip_prefix('-')?
            .strip_suffix(self.instance.as_str())?
            .strip_suffix('-')?;
        ToolbarAction::from_slug(slug)
    }
}

/// Per-instance `<style>` block.
pub fn style_block(ids: &ElementIds) -> String {
    let css = STYLE_TEMPLATE
        .replace("__TYPE__", ids.kind.type_prefix())
        .replace("__ID__", &ids.instance);
    format!("<style>\n{css}</style>")
}

fn button_html(ids: &ElementIds, action: ToolbarAction) -> String {
    format!(
        r#"<button class="icon-btn" id="{}" title="{}"><span class="material-icons">{}</span></button>"#,
        ids.button(action),
        action.tooltip(),
        action.icon()
    )
}

/// Container with both toolbars. `canvas_content` goes inside the canvas area as is.
pub fn container_html(ids: &ElementIds, title: &str, canvas_content: &str) -> String {
    let b = |a| button_html(ids, a);
    format!(
        r#"<div id="{container}" class="embed-container">
  <div class="toolbar-top">
    <span id="{title_id}">{title}</span>
  </div>
  <div id="{canvas}" class="embed-canvas">{canvas_content}</div>
  <div class="toolbar-bottom">
    <div class="button-group">
      {zoom_out}
      <span id="{zoom_label_id}">{zoom}</span>
      {zoom_in}
      {reset}
      {center}
    </div>
    <div class="coord-group">
      <span id="{coord_id}"></span>
      {download}
      {fullscreen}
    </div>
  </div>
</div>"#,
        container = ids.container,
        title_id = ids.title,
        title = escape_html(title),
        canvas = ids.canvas,
        zoom_label_id = ids.zoom_label,
        zoom = zoom_label(100.0),
        coord_id = ids.coord_display,
        zoom_out = b(ToolbarAction::ZoomOut),
        zoom_in = b(ToolbarAction::ZoomIn),
        reset = b(ToolbarAction::Reset),
        center = b(ToolbarAction::Center),
        download = b(ToolbarAction::Download),
        fullscreen = b(ToolbarAction::ToggleFullscreen),
    )
}

/// Complete widget markup: styles, icon font link, container.
pub fn widget_html(ids: &ElementIds, title: &str, canvas_content: &str) -> String {
    format!(
        "{}\n{ICON_FONT_LINK}\n{}",
        style_block(ids),
        container_html(ids, title, canvas_content)
    )
}

/// Short end-user error message that replaces a widget's content.
pub fn error_html(message: &str) -> String {
    format!("<p style='color: red;'>{}</p>", escape_html(message))
}

#[cfg(test)]
#[path = "../../tests/unit/shell/template.rs"]
mod tests;
