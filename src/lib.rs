//! # sharp-transform
//!
//! Compile abstract image transform requests into AWS Serverless Image
//! Handler ("sharp") URLs.
//!
//! The handler takes no query parameters: the entire edit instruction —
//! source key/bucket, encoder options, resize geometry, crop anchor — is a
//! JSON object, base64-encoded into a single URL path segment:
//!
//! ```text
//! https://images.example.com/eyJrZXkiOiJwaG90b3MvZGF3bi5qcGciLCAuLi59
//!                            └── base64({"key":"photos/dawn.jpg", ...})
//! ```
//!
//! This crate is that compiler. It performs no image work and no I/O of its
//! own: storage lookups, settings persistence, and environment resolution are
//! collaborators around the edges, and the build itself is a pure function of
//! its inputs — same request, same asset, same URL, byte for byte. That
//! byte-stability matters because the URL is the backend's cache key; an
//! encoding that wobbled would bust CDN caches on every deploy.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`transform`] | The compiler: [`ImageTransform`] trait + [`SharpTransform`] builder |
//! | [`asset`] | [`AssetDescriptor`] and the [`Volume`](asset::Volume) storage seam |
//! | [`request`] | [`TransformRequest`] and [`FitMode`] |
//! | [`format`] | Output-format resolution (web-safe inference, `jpg → jpeg`) |
//! | [`gravity`] | Focal-point bucketing and crop-anchor tokens |
//! | [`edits`] | Encoder options, resize group, auto-sharpen heuristic |
//! | [`encode`] | Canonical JSON + base64 + URL assembly |
//! | [`settings`] | Auto-sharpen settings passed into the builder |
//! | [`config`] | `sharp.toml` loading for the CLI |
//! | [`env`] | `$VAR` placeholder resolution |
//!
//! # Example
//!
//! ```
//! use sharp_transform::{AssetDescriptor, ImageTransform, Settings, SharpTransform, TransformRequest};
//! use sharp_transform::request::FitMode;
//!
//! let builder = SharpTransform::new("https://images.example.com", Settings::default());
//! let asset = AssetDescriptor::new("photos/dawn.jpg", "jpg");
//! let request = TransformRequest {
//!     width: Some(600),
//!     height: Some(400),
//!     mode: Some(FitMode::Crop),
//!     quality: Some(82),
//!     ..Default::default()
//! };
//!
//! let url = builder.transform_url(&asset, Some(&request)).unwrap();
//! assert!(url.starts_with("https://images.example.com/"));
//! ```
//!
//! # What it deliberately does not do
//!
//! Purging is a no-op by design ([`purge`](ImageTransform::purge) returns
//! `false`): the backend caches by URL, so a changed instruction *is* the
//! invalidation. Image decoding/encoding, storage management, and transform
//! caching all belong to the backend and the surrounding CMS, not here.

pub mod asset;
pub mod config;
pub mod edits;
pub mod encode;
pub mod env;
pub mod format;
pub mod gravity;
pub mod request;
pub mod settings;
pub mod transform;

pub use asset::{AssetDescriptor, FocalPoint};
pub use config::Config;
pub use request::{FitMode, TransformRequest};
pub use settings::Settings;
pub use transform::{ImageTransform, SharpTransform};
