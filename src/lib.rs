//! panframe embeds SVG diagrams and raster images in documentation pages with pan and
//! zoom.
//!
//! The crate is split along the path a widget takes from markup to pixels:
//!
//! - The loader fetches content, isolates SVG ids, absolutizes URLs, waits for fonts
//!   and measures natural bounds ([`load_content`])
//! - A [`Viewport`] keeps the visible window and zoom level and emits a
//!   [`RenderDirective`] after every change
//! - A [`GestureInterpreter`] turns pointer, touch and wheel input into viewport calls
//! - [`Widget`] and [`mount_all`] wire everything to a [`ViewSink`]
//!
//! All I/O goes through the [`Fetch`] and [`FontProbe`] seams, so the whole pipeline
//! runs without a browser.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod foundation;

pub(crate) mod gesture;
pub(crate) mod loader;
pub(crate) mod shell;
pub(crate) mod transform;

pub use crate::config::EmbedConfig;
pub use crate::foundation::core::{Point, Rect, Size, Vec2, fmt_number};
pub use crate::foundation::error::{EmbedError, EmbedResult, FontLoadWarning};

pub use crate::gesture::session::{
    DragChange, GestureInterpreter, GestureMode, GestureOutcome, InputEvent, PinchResponse,
};
pub use crate::loader::bounds::{BoundsSource, NaturalBounds, natural_bounds, parse_view_box};
pub use crate::loader::content::{EmbedKind, LoadedContent, load_content};
pub use crate::loader::fetch::{
    Fetch, FetchResponse, FsFetcher, StaticFetcher, fetch_ok, resolve_source,
};
pub use crate::loader::fonts::{
    FetchFontProbe, FontFaceRule, FontProbe, await_fonts, scan_font_faces,
};
pub use crate::loader::image::{LoadedImage, load_image, probe_image};
pub use crate::loader::markup::escape_html;
pub use crate::loader::sanitize::{SanitizedSvg, sanitize_svg};
pub use crate::loader::svg::{LoadEnv, LoadedSvg, load_svg};
pub use crate::shell::actions::{
    DownloadArtifact, FullscreenRequest, FullscreenToggle, ToolbarAction, download_file_name,
};
pub use crate::shell::mount::{
    LOADED_MARKER, MountOutcome, MountPoint, TITLE_ATTRIBUTE, mount, mount_all, mount_with_id,
};
pub use crate::shell::surface::{FrameScheduler, SurfaceState, ViewSink};
pub use crate::shell::template::{
    ElementIds, ICON_FONT_LINK, error_html, instance_id, new_instance_id, style_block,
    widget_html,
};
pub use crate::shell::widget::{ActionOutcome, Widget};
pub use crate::transform::directive::{RenderDirective, zoom_label};
pub use crate::transform::image::ImageViewport;
pub use crate::transform::viewport::{LogZoomScale, SvgViewport, ViewportState};
pub use crate::transform::zoom_pan::{Viewport, ZoomPan};
