//! Embeddable content: one tagged union over the SVG and image load paths.

use crate::{
    config::EmbedConfig,
    foundation::{
        core::{Rect, Size},
        error::EmbedResult,
    },
    loader::{
        fetch::Fetch,
        fonts::FontProbe,
        image::{LoadedImage, load_image},
        markup::escape_attr,
        svg::{LoadEnv, LoadedSvg, load_svg},
    },
    transform::{image::ImageViewport, viewport::SvgViewport, zoom_pan::Viewport},
};

/// Kind of content a mount point embeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedKind {
    /// Inline SVG document.
    Svg,
    /// Raster (or SVG) image shown through an `<img>` element.
    Image,
}

impl EmbedKind {
    /// Prefix used in instance and element ids.
    pub fn type_prefix(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Image => "image",
        }
    }

    /// Mount attribute carrying the source path.
    pub fn path_attribute(self) -> &'static str {
        match self {
            Self::Svg => "data-svg-path",
            Self::Image => "data-image-path",
        }
    }

    /// Title used when the mount point has none.
    pub fn default_title(self, config: &EmbedConfig) -> &str {
        match self {
            Self::Svg => &config.default_svg_title,
            Self::Image => &config.default_image_title,
        }
    }
}

/// Loaded content of either kind.
#[derive(Clone, Debug, serde::Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LoadedContent {
    /// A sanitized SVG document.
    Svg(LoadedSvg),
    /// An image with known natural size.
    Image(LoadedImage),
}

impl LoadedContent {
    /// Kind of the loaded content.
    pub fn kind(&self) -> EmbedKind {
        match self {
            Self::Svg(_) => EmbedKind::Svg,
            Self::Image(_) => EmbedKind::Image,
        }
    }

    /// Natural bounds in content coordinates (pixels for images).
    pub fn natural_rect(&self) -> Rect {
        match self {
            Self::Svg(svg) => svg.bounds.rect,
            Self::Image(img) => Rect::from_origin_size((0.0, 0.0), img.natural),
        }
    }

    /// Build the matching viewport engine. `canvas` is the initial on-screen size
    /// of the canvas area; images re-read it on every input event.
    pub fn viewport(&self, canvas: Size, config: &EmbedConfig) -> Viewport {
        match self {
            Self::Svg(svg) => Viewport::Svg(SvgViewport::new(svg.bounds.rect, config)),
            Self::Image(img) => Viewport::Image(ImageViewport::new(img.natural, canvas, config)),
        }
    }

    /// Markup placed inside the canvas area.
    pub fn canvas_markup(&self, instance_id: &str, title: &str) -> String {
        match self {
            Self::Svg(svg) => svg.markup.clone(),
            Self::Image(img) => format!(
                "<img id=\"img-{}\" src=\"{}\" alt=\"{}\" draggable=\"false\" \
                 style=\"object-fit: contain; transform-origin: center; will-change: transform\">",
                escape_attr(instance_id),
                escape_attr(img.url.as_str()),
                escape_attr(title)
            ),
        }
    }
}

/// Load content of `kind` from `path`.
pub async fn load_content<F: Fetch, P: FontProbe>(
    env: &LoadEnv<F, P>,
    kind: EmbedKind,
    path: &str,
    instance_id: &str,
) -> EmbedResult<LoadedContent> {
    Ok(match kind {
        EmbedKind::Svg => LoadedContent::Svg(load_svg(env, path, instance_id).await?),
        EmbedKind::Image => LoadedContent::Image(load_image(env, path).await?),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/loader/content.rs"]
mod tests;
