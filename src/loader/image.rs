//! Image load path: fetch once, report natural pixel dimensions.

use std::io::Cursor;

use url::Url;

use crate::{
    foundation::{
        core::Size,
        error::{EmbedError, EmbedResult},
    },
    loader::{
        fetch::{Fetch, fetch_ok, resolve_source},
        fonts::FontProbe,
        svg::LoadEnv,
    },
};

/// A fetched image and its natural size.
#[derive(Clone, Debug, serde::Serialize)]
pub struct LoadedImage {
    /// Absolute URL the image was fetched from.
    pub url: Url,
    /// Natural size in pixels.
    pub natural: Size,
    /// Detected format as a file extension (`png`, `jpg`, `svg`, ...).
    pub format: String,
    /// MIME type matching `format`.
    pub mime: String,
    /// Encoded image bytes as fetched.
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

/// Decode just enough of `bytes` to learn the pixel dimensions and the format.
pub fn probe_image(bytes: &[u8]) -> EmbedResult<(Size, String, String)> {
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| EmbedError::load(format!("could not read image data: {e}")))?;
    if let Some(format) = reader.format() {
        let (w, h) = reader
            .into_dimensions()
            .map_err(|e| EmbedError::load(format!("could not decode {format:?} image: {e}")))?;
        let ext = format.extensions_str().first().copied().unwrap_or("png");
        return Ok((
            Size::new(f64::from(w), f64::from(h)),
            ext.to_string(),
            format.to_mime_type().to_string(),
        ));
    }

    // Raster decoders don't know SVG; browsers show it as an image all the same.
    let tree = usvg::Tree::from_data(bytes, &usvg::Options::default())
        .map_err(|e| EmbedError::load(format!("unrecognized image data: {e}")))?;
    let size = tree.size();
    Ok((
        Size::new(f64::from(size.width()), f64::from(size.height())),
        "svg".to_string(),
        "image/svg+xml".to_string(),
    ))
}

/// Fetch the image at `path` and measure it.
#[tracing::instrument(skip(env), fields(base = %env.base_url))]
pub async fn load_image<F: Fetch, P: FontProbe>(
    env: &LoadEnv<F, P>,
    path: &str,
) -> EmbedResult<LoadedImage> {
    let url = resolve_source(&env.base_url, path)?;
    let bytes = fetch_ok(&env.fetcher, &url).await?;
    let (natural, format, mime) = probe_image(&bytes)?;
    if natural.width <= 0.0 || natural.height <= 0.0 {
        return Err(EmbedError::load(format!("'{url}' has no pixels")));
    }
    tracing::info!(%url, width = natural.width, height = natural.height, %format, "image loaded");
    Ok(LoadedImage {
        url,
        natural,
        format,
        mime,
        bytes,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/loader/image.rs"]
mod tests;
