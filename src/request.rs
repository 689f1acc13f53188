//! Transform request types.
//!
//! A [`TransformRequest`] describes *what* the caller wants back — target
//! size, fit mode, output format, quality — not how the backend achieves it.
//! Every field is optional; the builder supplies the documented defaults
//! (format inference, quality 100, fit `cover`) so callers only state what
//! they care about.

use serde::{Deserialize, Serialize};

/// How the source image should be fitted into the target dimensions.
///
/// These are the CMS-side mode names; the sharp backend uses different
/// vocabulary, mapped by [`sharp_fit`](FitMode::sharp_fit):
///
/// | Mode | sharp fit | Behavior |
/// |------|-----------|----------|
/// | `fit` | `inside` | Scale to fit entirely within the box |
/// | `crop` | `cover` | Scale to fill the box, cropping overflow |
/// | `stretch` | `fill` | Distort to exactly the box |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    Fit,
    Crop,
    Stretch,
}

impl FitMode {
    /// Parse a CMS mode string. Unknown modes yield `None`; the builder
    /// treats that as "use the default fit" rather than an error.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "fit" => Some(Self::Fit),
            "crop" => Some(Self::Crop),
            "stretch" => Some(Self::Stretch),
            _ => None,
        }
    }

    /// The backend's name for this fit mode.
    pub fn sharp_fit(self) -> &'static str {
        match self {
            Self::Fit => "inside",
            Self::Crop => "cover",
            Self::Stretch => "fill",
        }
    }
}

/// Requested output image properties.
///
/// `Default` yields the all-unset request: infer the format, default quality,
/// no resize, no interlace preference, no position override.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformRequest {
    /// Output format. `None` or empty means "infer from the asset".
    pub format: Option<String>,
    /// Encoder quality 0–100. `None` means the default of 100.
    pub quality: Option<u32>,
    /// Fit mode. `None` falls back to `cover` on the backend side.
    pub mode: Option<FitMode>,
    /// Target width in pixels.
    pub width: Option<u32>,
    /// Target height in pixels.
    pub height: Option<u32>,
    /// Interlace setting: `"none"` or any other non-empty value meaning
    /// progressive (the CMS offers `line`/`plane`/`partition`). When unset,
    /// no `progressive` flag is emitted at all.
    pub interlace: Option<String>,
    /// Explicit crop anchor like `"left-top"`. Overridden by the asset's
    /// focal point when one is set.
    pub position: Option<String>,
}

impl TransformRequest {
    /// Derive the webp variant of this request: same everything, format
    /// forced to `webp`.
    pub fn to_webp(&self) -> Self {
        Self {
            format: Some("webp".to_string()),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_mode_parses_known_modes() {
        assert_eq!(FitMode::parse("fit"), Some(FitMode::Fit));
        assert_eq!(FitMode::parse("crop"), Some(FitMode::Crop));
        assert_eq!(FitMode::parse("stretch"), Some(FitMode::Stretch));
        assert_eq!(FitMode::parse("CROP"), Some(FitMode::Crop));
    }

    #[test]
    fn fit_mode_rejects_unknown_modes() {
        assert_eq!(FitMode::parse("letterbox"), None);
        assert_eq!(FitMode::parse(""), None);
    }

    #[test]
    fn fit_mode_maps_to_sharp_vocabulary() {
        assert_eq!(FitMode::Fit.sharp_fit(), "inside");
        assert_eq!(FitMode::Crop.sharp_fit(), "cover");
        assert_eq!(FitMode::Stretch.sharp_fit(), "fill");
    }

    #[test]
    fn to_webp_forces_format_and_keeps_the_rest() {
        let request = TransformRequest {
            format: Some("png".to_string()),
            width: Some(600),
            mode: Some(FitMode::Crop),
            ..Default::default()
        };
        let webp = request.to_webp();
        assert_eq!(webp.format.as_deref(), Some("webp"));
        assert_eq!(webp.width, Some(600));
        assert_eq!(webp.mode, Some(FitMode::Crop));
    }
}
