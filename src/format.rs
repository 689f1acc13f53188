//! Output-format resolution.
//!
//! The backend keys encoder options by format name, so the format must be
//! concrete before the edit instruction is assembled — "auto"/empty never
//! survives past this module. Unknown formats are passed through unchanged;
//! the backend, not this compiler, decides what it can encode.

/// Formats browsers render natively. An asset with one of these extensions
/// keeps its own format when the request doesn't name one.
pub const WEB_SAFE_FORMATS: &[&str] = &["jpg", "jpeg", "gif", "png", "svg", "webp", "avif"];

/// Input aliases folded into the backend's canonical name. `jpg → jpeg` is
/// the only one.
const FORMAT_ALIASES: &[(&str, &str)] = &[("jpg", "jpeg")];

/// Resolve the requested format to the concrete, lowercase name used as the
/// encoder-options key.
///
/// An empty/absent request format is inferred: the asset's own extension when
/// it is web-safe, else `jpeg`. The result is lowercased and de-aliased; any
/// other format passes through as-is.
pub fn resolve(requested: Option<&str>, extension: &str) -> String {
    let format = match requested {
        Some(f) if !f.is_empty() => f.to_string(),
        _ => {
            if WEB_SAFE_FORMATS.contains(&extension.to_lowercase().as_str()) {
                extension.to_string()
            } else {
                "jpeg".to_string()
            }
        }
    };
    let format = format.to_lowercase();
    FORMAT_ALIASES
        .iter()
        .find(|(alias, _)| *alias == format)
        .map(|(_, canonical)| (*canonical).to_string())
        .unwrap_or(format)
}
