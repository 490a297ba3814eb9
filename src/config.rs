//! Tunables shared by the viewport engines, the gesture interpreter and the loaders.

use crate::foundation::error::{EmbedError, EmbedResult};

/// Every tunable of an embed widget.
///
/// The defaults reproduce the behaviour documentation sites rely on; a JSON file with a
/// subset of fields can override them (missing fields fall back to the defaults).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmbedConfig {
    /// Lowest displayed zoom percentage.
    pub min_percent: f64,
    /// Highest displayed zoom percentage.
    pub max_percent: f64,
    /// Percentage points applied by the zoom buttons and by every wheel tick.
    pub zoom_step: f64,
    /// Multiplier applied to the change in finger distance during an SVG pinch.
    pub pinch_sensitivity: f64,
    /// Percentage points applied per pinch move on images (direction only).
    pub image_pinch_step: f64,
    /// Base of the logarithmic zoom scale (`factor = base^(log/100)`).
    pub log_base: f64,
    /// Padding added around a measured bounding box when the SVG declares no size.
    pub bbox_padding: f64,
    /// Title used when an SVG mount point has none.
    pub default_svg_title: String,
    /// Title used when an image mount point has none.
    pub default_image_title: String,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            min_percent: 25.0,
            max_percent: 600.0,
            zoom_step: 25.0,
            pinch_sensitivity: 0.7,
            image_pinch_step: 10.0,
            log_base: 1.05,
            bbox_padding: 10.0,
            default_svg_title: "Diagram".to_string(),
            default_image_title: "Image".to_string(),
        }
    }
}

impl EmbedConfig {
    /// Reject configurations that would break the zoom invariants.
    pub fn validate(&self) -> EmbedResult<()> {
        let finite = [
            self.min_percent,
            self.max_percent,
            self.zoom_step,
            self.pinch_sensitivity,
            self.image_pinch_step,
            self.log_base,
            self.bbox_padding,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(EmbedError::config("all numeric settings must be finite"));
        }
        if self.min_percent <= 0.0 {
            return Err(EmbedError::config("min_percent must be > 0"));
        }
        if self.min_percent >= self.max_percent {
            return Err(EmbedError::config("min_percent must be < max_percent"));
        }
        if !(self.min_percent..=self.max_percent).contains(&100.0) {
            return Err(EmbedError::config(
                "zoom range must include the 100% baseline",
            ));
        }
        if self.zoom_step <= 0.0 || self.image_pinch_step <= 0.0 {
            return Err(EmbedError::config("zoom steps must be > 0"));
        }
        if self.pinch_sensitivity <= 0.0 {
            return Err(EmbedError::config("pinch_sensitivity must be > 0"));
        }
        if self.log_base <= 1.0 {
            return Err(EmbedError::config("log_base must be > 1"));
        }
        if self.bbox_padding < 0.0 {
            return Err(EmbedError::config("bbox_padding must be >= 0"));
        }
        Ok(())
    }

    /// Parse a (possibly partial) JSON configuration and validate it.
    pub fn from_json(text: &str) -> EmbedResult<Self> {
        let cfg: Self = serde_json::from_str(text)
            .map_err(|e| EmbedError::config(format!("invalid config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Clamp a percentage into `[min_percent, max_percent]`.
    pub fn clamp_percent(&self, percent: f64) -> f64 {
        percent.clamp(self.min_percent, self.max_percent)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
