//! SVG load pipeline: fetch, parse, sanitize, font barrier, measure.

use std::sync::Arc;

use url::Url;

use crate::{
    config::EmbedConfig,
    foundation::{
        core::Rect,
        error::{EmbedError, EmbedResult, FontLoadWarning},
    },
    loader::{
        bounds::{NaturalBounds, natural_bounds},
        fetch::{Fetch, fetch_ok, resolve_source},
        fonts::{FetchFontProbe, FontFaceRule, FontProbe, await_fonts, scan_font_faces},
        markup::set_root_attributes,
        sanitize::sanitize_svg,
    },
    transform::directive::RenderDirective,
};

/// Collaborators and settings shared by every load.
#[derive(Clone, Debug)]
pub struct LoadEnv<F, P> {
    /// Source of every fetched resource.
    pub fetcher: F,
    /// Font readiness probe.
    pub fonts: P,
    /// Base URL that mount-point paths are resolved against.
    pub base_url: Url,
    /// Widget tunables.
    pub config: EmbedConfig,
    /// Seed each load's font registry with the system fonts before probing.
    pub system_fonts: bool,
}

impl<F: Fetch + Clone> LoadEnv<F, FetchFontProbe<F>> {
    /// Environment whose font probe downloads `@font-face` sources with `fetcher`.
    pub fn with_fetched_fonts(fetcher: F, base_url: Url) -> Self {
        Self {
            fonts: FetchFontProbe::new(fetcher.clone()),
            fetcher,
            base_url,
            config: EmbedConfig::default(),
            system_fonts: false,
        }
    }
}

impl<F, P> LoadEnv<F, P> {
    /// Replace the tunables.
    pub fn with_config(mut self, config: EmbedConfig) -> Self {
        self.config = config;
        self
    }

    /// Toggle seeding the font registry with system fonts.
    pub fn with_system_fonts(mut self, enabled: bool) -> Self {
        self.system_fonts = enabled;
        self
    }
}

/// A sanitized SVG ready to be inlined, plus its natural bounds.
#[derive(Clone, Debug, serde::Serialize)]
pub struct LoadedSvg {
    /// Absolute URL the document was fetched from.
    pub url: Url,
    /// Instance id, also the id prefix and the root `id`.
    pub instance_id: String,
    /// Sanitized markup with the root attributes set for embedding.
    pub markup: String,
    /// Natural bounds written to the root `viewBox`.
    pub bounds: NaturalBounds,
    /// `@font-face` rules the barrier waited for.
    pub fonts_requested: Vec<FontFaceRule>,
    /// Font probes that failed.
    pub font_warnings: Vec<FontLoadWarning>,
}

impl LoadedSvg {
    /// The markup with its root `viewBox` replaced by `view_box`.
    pub fn markup_with_view_box(&self, view_box: Rect) -> EmbedResult<String> {
        let value = RenderDirective::ViewBox(view_box).to_string();
        set_root_attributes(&self.markup, &[("viewBox", Some(value.as_str()))])
    }
}

/// Fetch the SVG at `path` and prepare it for embedding as `instance_id`.
#[tracing::instrument(skip(env), fields(base = %env.base_url))]
pub async fn load_svg<F: Fetch, P: FontProbe>(
    env: &LoadEnv<F, P>,
    path: &str,
    instance_id: &str,
) -> EmbedResult<LoadedSvg> {
    let url = resolve_source(&env.base_url, path)?;
    let bytes = fetch_ok(&env.fetcher, &url).await?;
    let text = String::from_utf8(bytes)
        .map_err(|e| EmbedError::parse(format!("'{url}' is not UTF-8 text: {e}")))?;

    let sanitized = sanitize_svg(&text, instance_id, &url)?;

    let rules = scan_font_faces(&sanitized.style_sheets, &url);
    let mut db = usvg::fontdb::Database::new();
    if env.system_fonts {
        db.load_system_fonts();
    }
    let font_warnings = await_fonts(&rules, &env.fonts, &mut db).await;

    let bounds = natural_bounds(&sanitized.markup, Arc::new(db), env.config.bbox_padding)?;
    tracing::debug!(source = ?bounds.source, rect = ?bounds.rect, "natural bounds");

    let view_box = RenderDirective::ViewBox(bounds.rect).to_string();
    let markup = set_root_attributes(
        &sanitized.markup,
        &[
            ("id", Some(instance_id)),
            ("viewBox", Some(view_box.as_str())),
            ("width", Some("100%")),
            ("height", Some("100%")),
            ("preserveAspectRatio", Some("xMidYMid meet")),
        ],
    )?;

    tracing::info!(%url, ids = sanitized.id_map.len(), fonts = rules.len(), "svg loaded");
    Ok(LoadedSvg {
        url,
        instance_id: instance_id.to_string(),
        markup,
        bounds,
        fonts_requested: rules,
        font_warnings,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/loader/svg.rs"]
mod tests;
