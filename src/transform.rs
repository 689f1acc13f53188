//! The transform-to-URL compiler.
//!
//! [`SharpTransform`] implements [`ImageTransform`] for an AWS Serverless
//! Image Handler deployment. It compiles a transform request plus an asset
//! descriptor into the backend's edit-instruction JSON and encodes that as a
//! base64 path segment appended to the configured base URL.
//!
//! The build is a pure, synchronous function of its arguments: no I/O, no
//! shared state, safe to call concurrently. Storage lookups and environment
//! resolution have already happened by the time a descriptor reaches it.
//!
//! Purging is deliberately unsupported — the backend keys its cache on the
//! URL itself, so there is nothing to invalidate; a changed instruction is a
//! new URL.

use serde_json::{Map, Value};

use crate::asset::AssetDescriptor;
use crate::edits;
use crate::encode;
use crate::format;
use crate::request::TransformRequest;
use crate::settings::Settings;

/// Capability every image-transform backend exposes: build a URL, derive a
/// webp variant, and (maybe) purge.
///
/// Other backends (imgix-style services, local generation) implement the same
/// trait so callers stay backend-agnostic.
pub trait ImageTransform {
    /// Compile `transform` against `asset` into a URL.
    ///
    /// `None` means this backend cannot produce a URL for the asset; the
    /// sharp backend always can, and never panics for well-formed inputs.
    fn transform_url(&self, asset: &AssetDescriptor, transform: Option<&TransformRequest>)
    -> Option<String>;

    /// The webp variant of `transform` for `asset`.
    ///
    /// Falls back to the passed-in `url` unchanged when the variant cannot be
    /// built — the caller always gets something servable back.
    fn webp_url(
        &self,
        url: &str,
        asset: &AssetDescriptor,
        transform: Option<&TransformRequest>,
    ) -> Option<String> {
        let request = transform.cloned().unwrap_or_default().to_webp();
        Some(
            self.transform_url(asset, Some(&request))
                .unwrap_or_else(|| url.to_string()),
        )
    }

    /// URL that would purge the asset from the backend's cache, if the
    /// backend supports purging.
    fn purge_url(&self, asset: &AssetDescriptor) -> Option<String>;

    /// Purge a previously built URL. Returns whether a purge was performed.
    fn purge(&self, url: &str) -> bool;
}

/// URL builder for an AWS Serverless Image Handler ("sharp") deployment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SharpTransform {
    /// Distribution base URL, already environment-resolved. Trailing slashes
    /// are tolerated and normalized away.
    pub base_url: String,
    pub settings: Settings,
}

impl SharpTransform {
    /// Backend name shown in transform pickers.
    pub const DISPLAY_NAME: &'static str = "Sharp";

    pub fn new(base_url: impl Into<String>, settings: Settings) -> Self {
        Self {
            base_url: base_url.into(),
            settings,
        }
    }

    /// Assemble the `{bucket?, key, edits?}` instruction for a build.
    ///
    /// Split out from [`transform_url`](ImageTransform::transform_url) so
    /// tests can assert on structure without decoding base64.
    pub fn instruction(
        &self,
        asset: &AssetDescriptor,
        transform: Option<&TransformRequest>,
    ) -> Map<String, Value> {
        let mut instruction = Map::new();
        if let Some(bucket) = &asset.bucket {
            instruction.insert("bucket".to_string(), bucket.as_str().into());
        }
        let key = asset.key.strip_prefix('/').unwrap_or(&asset.key);
        instruction.insert("key".to_string(), key.into());

        if let Some(request) = transform {
            let mut group = Map::new();
            let format = format::resolve(request.format.as_deref(), &asset.extension);
            let options = edits::encoder_options(&format, request);
            // The format key stays even with empty options: it is what tells
            // the backend which encoder to use.
            group.insert(format, Value::Object(options));
            group.insert(
                "resize".to_string(),
                Value::Object(edits::resize_options(request, asset)),
            );
            if edits::auto_sharpen(asset, request, &self.settings) {
                group.insert("sharpen".to_string(), true.into());
            }
            instruction.insert("edits".to_string(), Value::Object(group));
        }
        instruction
    }
}

impl ImageTransform for SharpTransform {
    fn transform_url(
        &self,
        asset: &AssetDescriptor,
        transform: Option<&TransformRequest>,
    ) -> Option<String> {
        let instruction = self.instruction(asset, transform);
        let json = encode::canonical_json(instruction);
        let url = encode::instruction_url(&self.base_url, &json);
        tracing::debug!(key = %asset.key, config = %json, url = %url, "sharp transform built");
        Some(url)
    }

    fn purge_url(&self, _asset: &AssetDescriptor) -> Option<String> {
        None
    }

    fn purge(&self, _url: &str) -> bool {
        false
    }
}
