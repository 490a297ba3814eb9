/// Convenience result type used across panframe.
pub type EmbedResult<T> = Result<T, EmbedError>;

/// Top-level error taxonomy for widget initialization.
///
/// Every variant aborts the initialization of exactly one widget. Font problems are
/// not errors; see [`FontLoadWarning`].
#[derive(thiserror::Error, Debug)]
pub enum EmbedError {
    /// Fetching a resource (SVG source, image, font) failed.
    #[error("load error: {0}")]
    Load(String),

    /// Fetched content is not a usable SVG document.
    #[error("parse error: {0}")]
    Parse(String),

    /// A required mount attribute or configuration value is missing or invalid.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EmbedError {
    /// Build a [`EmbedError::Load`] value.
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Build a [`EmbedError::Parse`] value.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`EmbedError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Non-fatal font loading failure collected during the font readiness barrier.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FontLoadWarning {
    /// Font family named by the `@font-face` rule.
    pub family: String,
    /// Human-readable failure reason.
    pub reason: String,
}

impl std::fmt::Display for FontLoadWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "font '{}' could not be loaded, layout may be imperfect: {}",
            self.family, self.reason
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
