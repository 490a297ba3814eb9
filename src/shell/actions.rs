//! Toolbar actions and the artifacts they produce.

/// Buttons of the bottom toolbar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolbarAction {
    /// Zoom in by one step.
    ZoomIn,
    /// Zoom out by one step.
    ZoomOut,
    /// Back to 100%, recentered.
    Reset,
    /// Recenter without changing zoom.
    Center,
    /// Save the content.
    Download,
    /// Enter or leave fullscreen.
    ToggleFullscreen,
}

impl ToolbarAction {
    /// Every action, in toolbar order.
    pub const ALL: [Self; 6] = [
        Self::ZoomOut,
        Self::ZoomIn,
        Self::Reset,
        Self::Center,
        Self::Download,
        Self::ToggleFullscreen,
    ];

    /// Action part of the button id (`btn-<type>-<slug>-<id>`).
    pub fn slug(self) -> &'static str {
        match self {
            Self::ZoomIn => "zoom-in",
            Self::ZoomOut => "zoom-out",
            Self::Reset => "reset",
            Self::Center => "center",
            Self::Download => "download",
            Self::ToggleFullscreen => "fullscreen",
        }
    }

    /// Material icon name.
    pub fn icon(self) -> &'static str {
        match self {
            Self::ZoomIn => "add",
            Self::ZoomOut => "remove",
            Self::Reset => "refresh",
            Self::Center => "center_focus_strong",
            Self::Download => "download",
            Self::ToggleFullscreen => "fullscreen",
        }
    }

    /// Button tooltip.
    pub fn tooltip(self) -> &'static str {
        match self {
            Self::ZoomIn => "Zoom in",
            Self::ZoomOut => "Zoom out",
            Self::Reset => "Reset zoom",
            Self::Center => "Center content",
            Self::Download => "Download",
            Self::ToggleFullscreen => "Fullscreen",
        }
    }

    /// Parse a slug back into an action.
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.slug() == slug)
    }
}

/// File handed to the browser when the download button is pressed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadArtifact {
    /// Suggested file name.
    pub file_name: String,
    /// MIME type of `bytes`.
    pub mime: String,
    /// File content.
    pub bytes: Vec<u8>,
}

/// File name for a download: whitespace in `title` becomes `_`, then `.ext`.
pub fn download_file_name(title: &str, ext: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    format!("{stem}.{ext}")
}

/// Extension of the last path segment of `path`, ignoring query and fragment.
pub fn path_extension(path: &str) -> Option<&str> {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let name = path.rsplit('/').next().unwrap_or(path);
    let (_, ext) = name.rsplit_once('.')?;
    (!ext.is_empty()).then_some(ext)
}

/// Fullscreen transition requested by the toggle button.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FullscreenRequest {
    /// Put the widget container in fullscreen.
    Enter {
        /// Element id of the container (`<type>-container-<id>`).
        container_id: String,
    },
    /// Leave fullscreen.
    Exit,
}

/// Per-widget fullscreen toggle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FullscreenToggle {
    active: bool,
}

impl FullscreenToggle {
    /// Flip the state and return the request for the new state.
    pub fn toggle(&mut self, container_id: &str) -> FullscreenRequest {
        self.active = !self.active;
        if self.active {
            FullscreenRequest::Enter {
                container_id: container_id.to_string(),
            }
        } else {
            FullscreenRequest::Exit
        }
    }

    /// Whether the widget is currently fullscreen.
    pub fn is_active(self) -> bool {
        self.active
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shell/actions.rs"]
mod tests;
