//! Plugin-level settings consumed by the URL builder.
//!
//! Settings are passed explicitly into [`SharpTransform`](crate::transform::SharpTransform)
//! rather than read from a global — the builder is a pure function of its
//! arguments.

use serde::{Deserialize, Serialize};

/// Auto-sharpen knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Request a sharpen edit when the output is scaled past the threshold.
    pub auto_sharpen_scaled_images: bool,
    /// Scale percentage at or above which sharpening kicks in.
    ///
    /// Note the comparison uses the *output/original* ratio, and an axis the
    /// request leaves unset counts as 100%. A threshold of 100 or below
    /// therefore fires for every sized asset.
    pub sharpen_scaled_image_percentage: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_sharpen_scaled_images: false,
            sharpen_scaled_image_percentage: 50,
        }
    }
}
