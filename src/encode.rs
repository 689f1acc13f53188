//! Canonical encoding of an edit instruction into a URL.
//!
//! The wire contract with the backend is `<baseUrl>/<base64(JSON)>`, and the
//! URL doubles as a CDN cache key, so encoding must be byte-stable: same
//! instruction, same bytes, forever. Three rules keep it so:
//!
//! - maps serialize as JSON objects even when empty (`{}`, never `[]`),
//! - `/` and non-ASCII are left unescaped,
//! - string values that look numeric are encoded as numbers
//!   (`"600"` → `600`), matching what the backend's decoder expects.
//!
//! The first two are `serde_json` defaults; the numeric check is applied as a
//! normalization pass before serializing.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Map, Value};

/// Recursively convert numeric-looking string values to JSON numbers.
///
/// Integers are preferred over floats so `"600"` comes out as `600`, not
/// `600.0`. Strings that parse only to a non-finite float (`"inf"`, `"NaN"`)
/// stay strings. Object keys are never touched.
pub fn numeric_check(value: Value) -> Value {
    match value {
        Value::String(s) => {
            if let Ok(n) = s.parse::<i64>() {
                return Value::from(n);
            }
            if let Ok(f) = s.parse::<f64>() {
                if let Some(n) = serde_json::Number::from_f64(f) {
                    return Value::Number(n);
                }
            }
            Value::String(s)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(numeric_check).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, numeric_check(value)))
                .collect(),
        ),
        other => other,
    }
}

/// Serialize an instruction to its canonical JSON text.
pub fn canonical_json(instruction: Map<String, Value>) -> String {
    // Infallible for the value types the builder produces (no non-string
    // keys, no non-finite floats survive numeric_check).
    serde_json::to_string(&numeric_check(Value::Object(instruction)))
        .unwrap_or_else(|_| "{}".to_string())
}

/// Assemble the final URL: slash-normalized base, one `/`, standard base64 of
/// the canonical JSON.
pub fn instruction_url(base_url: &str, json: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), STANDARD.encode(json))
}
