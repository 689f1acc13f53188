//! Edit-instruction assembly.
//!
//! The backend's instruction schema is an `edits` object with up to three
//! members, built here in the order the backend's documentation lists them:
//!
//! 1. encoder options keyed by the resolved format name,
//! 2. a `resize` group (dimensions, fit, crop anchor),
//! 3. a `sharpen` flag.
//!
//! Field order inside the instruction is part of the wire contract in
//! practice: the serialized JSON becomes the URL, and the URL is a cache key
//! downstream, so the same input must always produce the same bytes.

use serde_json::{Map, Value};

use crate::asset::AssetDescriptor;
use crate::gravity;
use crate::request::TransformRequest;
use crate::settings::Settings;

/// Default encoder quality when the request doesn't specify one.
const DEFAULT_QUALITY: u32 = 100;

/// Encoder options for the resolved format.
///
/// Quality defaults to 100; a quality of 0 is dropped rather than serialized
/// (the backend would reject it). The returned map may be empty — it is still
/// emitted as `{}` under the format key, which tells the backend "encode to
/// this format, defaults throughout".
///
/// JPEG additionally gets three always-on encoder tuning flags and, like PNG,
/// a `progressive` flag when the request carried an interlace setting at all.
pub fn encoder_options(format: &str, request: &TransformRequest) -> Map<String, Value> {
    let mut options = Map::new();
    let quality = request.quality.unwrap_or(DEFAULT_QUALITY);
    if quality > 0 {
        options.insert("quality".to_string(), quality.into());
    }
    let progressive = request
        .interlace
        .as_deref()
        .filter(|i| !i.is_empty())
        .map(|i| i != "none");
    match format {
        "jpeg" => {
            if let Some(progressive) = progressive {
                options.insert("progressive".to_string(), progressive.into());
            }
            options.insert("trellisQuantisation".to_string(), true.into());
            options.insert("overshootDeringing".to_string(), true.into());
            options.insert("optimizeScans".to_string(), true.into());
        }
        "png" => {
            if let Some(progressive) = progressive {
                options.insert("progressive".to_string(), progressive.into());
            }
        }
        // webp and pass-through formats: quality only
        _ => {}
    }
    options
}

/// The `resize` group: dimensions, crop anchor, and fit mode.
///
/// Width/height are copied only when present and nonzero. The fit always ends
/// up set — mapped from the request mode, `cover` otherwise. Field order
/// mirrors the historical builder: `fit` lands before `position` when the
/// request named a mode, after it when the default kicks in.
pub fn resize_options(request: &TransformRequest, asset: &AssetDescriptor) -> Map<String, Value> {
    let mut resize = Map::new();
    if let Some(width) = request.width.filter(|&w| w > 0) {
        resize.insert("width".to_string(), width.into());
    }
    if let Some(height) = request.height.filter(|&h| h > 0) {
        resize.insert("height".to_string(), height.into());
    }
    if let Some(mode) = request.mode {
        resize.insert("fit".to_string(), mode.sharp_fit().into());
    }
    if let Some(token) = gravity::resolve(asset.focal_point, request.position.as_deref()) {
        resize.insert("position".to_string(), token.into());
    }
    if !resize.contains_key("fit") {
        resize.insert("fit".to_string(), "cover".into());
    }
    resize
}

/// Whether the auto-sharpen heuristic fires for this build.
///
/// Only evaluated when enabled and the asset's intrinsic size is known. Each
/// axis's scale is `round(100 * requested / original)`, with an unrequested
/// axis falling back to the original dimension (scale 100). Either axis at or
/// past the threshold triggers the sharpen edit.
pub fn auto_sharpen(asset: &AssetDescriptor, request: &TransformRequest, settings: &Settings) -> bool {
    if !settings.auto_sharpen_scaled_images {
        return false;
    }
    let (Some(width), Some(height)) = (asset.width, asset.height) else {
        return false;
    };
    if width == 0 || height == 0 {
        return false;
    }
    let scale = |requested: Option<u32>, original: u32| -> u32 {
        let resolved = requested.unwrap_or(original);
        (f64::from(resolved) / f64::from(original) * 100.0).round() as u32
    };
    scale(request.width, width) >= settings.sharpen_scaled_image_percentage
        || scale(request.height, height) >= settings.sharpen_scaled_image_percentage
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::FitMode;

    fn asset() -> AssetDescriptor {
        AssetDescriptor::new("photos/dawn.jpg", "jpg")
    }

    fn sized_asset(width: u32, height: u32) -> AssetDescriptor {
        AssetDescriptor {
            width: Some(width),
            height: Some(height),
            ..asset()
        }
    }

    fn sharpen_settings(threshold: u32) -> Settings {
        Settings {
            auto_sharpen_scaled_images: true,
            sharpen_scaled_image_percentage: threshold,
        }
    }

    // =========================================================================
    // encoder_options tests
    // =========================================================================

    #[test]
    fn quality_defaults_to_100() {
        let options = encoder_options("webp", &TransformRequest::default());
        assert_eq!(options.get("quality"), Some(&Value::from(100)));
    }

    #[test]
    fn quality_zero_is_dropped() {
        let request = TransformRequest {
            quality: Some(0),
            ..Default::default()
        };
        let options = encoder_options("webp", &request);
        assert!(options.is_empty());
    }

    #[test]
    fn jpeg_gets_tuning_flags() {
        let options = encoder_options("jpeg", &TransformRequest::default());
        assert_eq!(options.get("trellisQuantisation"), Some(&Value::Bool(true)));
        assert_eq!(options.get("overshootDeringing"), Some(&Value::Bool(true)));
        assert_eq!(options.get("optimizeScans"), Some(&Value::Bool(true)));
        // No interlace on the request → no progressive flag either way
        assert!(!options.contains_key("progressive"));
    }

    #[test]
    fn interlace_none_emits_progressive_false() {
        let request = TransformRequest {
            interlace: Some("none".to_string()),
            ..Default::default()
        };
        let options = encoder_options("jpeg", &request);
        assert_eq!(options.get("progressive"), Some(&Value::Bool(false)));
    }

    #[test]
    fn interlace_line_emits_progressive_true_for_png() {
        let request = TransformRequest {
            interlace: Some("line".to_string()),
            ..Default::default()
        };
        let options = encoder_options("png", &request);
        assert_eq!(options.get("progressive"), Some(&Value::Bool(true)));
        // PNG never gets the jpeg tuning flags
        assert!(!options.contains_key("trellisQuantisation"));
    }

    #[test]
    fn webp_gets_quality_only() {
        let request = TransformRequest {
            quality: Some(80),
            interlace: Some("line".to_string()),
            ..Default::default()
        };
        let options = encoder_options("webp", &request);
        assert_eq!(options.len(), 1);
        assert_eq!(options.get("quality"), Some(&Value::from(80)));
    }

    // =========================================================================
    // resize_options tests
    // =========================================================================

    #[test]
    fn dimensions_copied_only_when_present() {
        let request = TransformRequest {
            width: Some(600),
            ..Default::default()
        };
        let resize = resize_options(&request, &asset());
        assert_eq!(resize.get("width"), Some(&Value::from(600)));
        assert!(!resize.contains_key("height"));
    }

    #[test]
    fn zero_dimensions_are_treated_as_unset() {
        let request = TransformRequest {
            width: Some(0),
            height: Some(0),
            ..Default::default()
        };
        let resize = resize_options(&request, &asset());
        assert!(!resize.contains_key("width"));
        assert!(!resize.contains_key("height"));
    }

    #[test]
    fn fit_defaults_to_cover() {
        let resize = resize_options(&TransformRequest::default(), &asset());
        assert_eq!(resize.get("fit"), Some(&Value::from("cover")));
    }

    #[test]
    fn fit_maps_mode_table() {
        for (mode, expected) in [
            (FitMode::Fit, "inside"),
            (FitMode::Crop, "cover"),
            (FitMode::Stretch, "fill"),
        ] {
            let request = TransformRequest {
                mode: Some(mode),
                ..Default::default()
            };
            let resize = resize_options(&request, &asset());
            assert_eq!(resize.get("fit"), Some(&Value::from(expected)));
        }
    }

    #[test]
    fn fit_precedes_position_when_mode_given() {
        let request = TransformRequest {
            width: Some(600),
            mode: Some(FitMode::Crop),
            position: Some("left-top".to_string()),
            ..Default::default()
        };
        let resize = resize_options(&request, &asset());
        let keys: Vec<&String> = resize.keys().collect();
        assert_eq!(keys, ["width", "fit", "position"]);
    }

    #[test]
    fn fit_follows_position_when_mode_absent() {
        let request = TransformRequest {
            position: Some("left-top".to_string()),
            ..Default::default()
        };
        let resize = resize_options(&request, &asset());
        let keys: Vec<&String> = resize.keys().collect();
        assert_eq!(keys, ["position", "fit"]);
    }

    #[test]
    fn focal_point_feeds_position() {
        let mut asset = asset();
        asset.focal_point = Some(crate::asset::FocalPoint { x: 0.1, y: 0.1 });
        let resize = resize_options(&TransformRequest::default(), &asset);
        assert_eq!(resize.get("position"), Some(&Value::from("left top")));
    }

    // =========================================================================
    // auto_sharpen tests
    // =========================================================================

    #[test]
    fn sharpen_requires_the_setting() {
        let request = TransformRequest {
            width: Some(600),
            ..Default::default()
        };
        assert!(!auto_sharpen(&sized_asset(1000, 800), &request, &Settings::default()));
    }

    #[test]
    fn sharpen_requires_known_dimensions() {
        let request = TransformRequest {
            width: Some(600),
            ..Default::default()
        };
        assert!(!auto_sharpen(&asset(), &request, &sharpen_settings(50)));
    }

    #[test]
    fn sharpen_fires_at_threshold() {
        // 600/1000 → 60% ≥ 50
        let request = TransformRequest {
            width: Some(600),
            ..Default::default()
        };
        assert!(auto_sharpen(&sized_asset(1000, 800), &request, &sharpen_settings(50)));
    }

    #[test]
    fn sharpen_fires_on_either_axis() {
        // width 10% < 150, height 200% ≥ 150
        let request = TransformRequest {
            width: Some(100),
            height: Some(1600),
            ..Default::default()
        };
        assert!(auto_sharpen(&sized_asset(1000, 800), &request, &sharpen_settings(150)));
    }

    #[test]
    fn sharpen_below_threshold_does_not_fire() {
        // 600/1000 → 60% < 150 and no height requested... height falls back
        // to 100%, also < 150
        let request = TransformRequest {
            width: Some(600),
            ..Default::default()
        };
        assert!(!auto_sharpen(&sized_asset(1000, 800), &request, &sharpen_settings(150)));
    }

    #[test]
    fn unrequested_axis_counts_as_full_scale() {
        // Neither axis requested → both scales are 100%, which meets any
        // threshold ≤ 100. Long-standing behavior; see DESIGN.md.
        let request = TransformRequest::default();
        assert!(auto_sharpen(&sized_asset(1000, 800), &request, &sharpen_settings(50)));
        assert!(!auto_sharpen(&sized_asset(1000, 800), &request, &sharpen_settings(101)));
    }

    #[test]
    fn scale_percentage_rounds() {
        // 605/1000 → 60.5 → 61 ≥ 61
        let request = TransformRequest {
            width: Some(605),
            ..Default::default()
        };
        assert!(auto_sharpen(&sized_asset(1000, 800), &request, &sharpen_settings(61)));
    }
}
