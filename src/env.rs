//! Environment-placeholder resolution for configuration strings.
//!
//! Config values like the base URL or bucket name may be written as `$VAR`
//! placeholders so the same config file works across environments. Resolution
//! happens here, in the config layer — the URL builder itself only ever sees
//! already-resolved strings.

/// Resolve a `$VAR` placeholder against the process environment.
///
/// A value starting with `$` is replaced by the named environment variable.
/// Anything else — including a placeholder whose variable is unset — passes
/// through unchanged, so a missing variable shows up verbatim in output
/// instead of silently becoming an empty string.
pub fn parse_env(value: &str) -> String {
    match value.strip_prefix('$') {
        Some(name) if !name.is_empty() => {
            std::env::var(name).unwrap_or_else(|_| value.to_string())
        }
        _ => value.to_string(),
    }
}
