//! Source-asset description and the storage-volume seam.
//!
//! An [`AssetDescriptor`] is a read-only view of the image being transformed:
//! where it lives (storage key, optional bucket), how big it is, and where its
//! focal point sits. It carries no pixel data — the remote backend fetches the
//! bytes itself using the key/bucket embedded in the URL.
//!
//! Bucket resolution goes through the [`Volume`] trait so the URL builder
//! never talks to a storage SDK directly. A volume lookup that fails (storage
//! misconfiguration) degrades to "no bucket" with a warning rather than
//! failing the whole build — a URL without a bucket is still well-formed, and
//! the backend's default source bucket may well serve it.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VolumeError {
    #[error("storage volume misconfigured: {0}")]
    Misconfigured(String),
}

/// Storage volume an asset lives on.
///
/// The only question the URL builder ever asks a volume is whether it is
/// bucket-backed, and if so which bucket. Everything else about storage
/// (credentials, regions, subfolders) stays on the other side of this trait.
pub trait Volume {
    /// Bucket identifier, or `None` for local/non-bucket storage.
    fn bucket(&self) -> Result<Option<String>, VolumeError>;
}

/// A volume backed by an object-storage bucket (S3 and friends).
///
/// The bucket name must already be environment-resolved — see
/// [`env::parse_env`](crate::env::parse_env).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketVolume {
    pub bucket: String,
}

impl Volume for BucketVolume {
    fn bucket(&self) -> Result<Option<String>, VolumeError> {
        if self.bucket.is_empty() {
            return Err(VolumeError::Misconfigured(
                "bucket volume has an empty bucket name".to_string(),
            ));
        }
        Ok(Some(self.bucket.clone()))
    }
}

/// A volume on plain local/web storage — no bucket field in the URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalVolume;

impl Volume for LocalVolume {
    fn bucket(&self) -> Result<Option<String>, VolumeError> {
        Ok(None)
    }
}

/// Focal point as fractional coordinates within the image.
///
/// `x` runs left → right, `y` runs top → bottom, both in `[0, 1]`.
/// `{0.5, 0.5}` is the exact center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocalPoint {
    pub x: f64,
    pub y: f64,
}

/// Read-only view of the source image being transformed.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetDescriptor {
    /// Storage key. A single leading slash is tolerated and stripped at
    /// build time.
    pub key: String,
    /// Bucket identifier for bucket-backed storage, `None` otherwise.
    pub bucket: Option<String>,
    /// Intrinsic width in pixels, if known.
    pub width: Option<u32>,
    /// Intrinsic height in pixels, if known.
    pub height: Option<u32>,
    /// Focal point set by an editor, if any.
    pub focal_point: Option<FocalPoint>,
    /// File extension without the dot (e.g. `jpg`), used for format inference.
    pub extension: String,
}

impl AssetDescriptor {
    pub fn new(key: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            bucket: None,
            width: None,
            height: None,
            focal_point: None,
            extension: extension.into(),
        }
    }

    /// Resolve the bucket from the asset's storage volume.
    ///
    /// A failed lookup is logged and degrades to no bucket — the resulting
    /// URL simply omits the `bucket` field.
    pub fn with_volume(mut self, volume: &dyn Volume) -> Self {
        self.bucket = match volume.bucket() {
            Ok(bucket) => bucket,
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "volume lookup failed, omitting bucket");
                None
            }
        };
        self
    }
}
