#![deny(missing_docs)]

//! # Reference Utilities
//!
//! Parsing of same-document `$ref` values into JSON Pointer tokens.
//!
//! Only fragment pointers of the form `#/a/b/c` are accepted; external
//! documents are never fetched and are rejected as malformed.

use crate::error::{SchemaError, SchemaResult};
use percent_encoding::percent_decode_str;
use serde_json::Value;

/// Prefix every same-document pointer must start with.
pub(crate) const FRAGMENT_PREFIX: &str = "#/";

/// Returns the pointer text of a `$ref` value, or a printable rendering of a
/// non-string value for error messages.
pub(crate) fn raw_pointer(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Splits a `$ref` value into decoded pointer tokens.
///
/// Fails with `MalformedReference` when the value is not a string, does not
/// start with `#/`, or names no path at all.
pub(crate) fn parse_local_ref(value: &Value) -> SchemaResult<Vec<String>> {
    let Value::String(pointer) = value else {
        return Err(SchemaError::MalformedReference {
            pointer: raw_pointer(value),
            reason: "value is not a string".into(),
        });
    };

    let Some(rest) = pointer.strip_prefix(FRAGMENT_PREFIX) else {
        return Err(SchemaError::MalformedReference {
            pointer: pointer.clone(),
            reason: "only same-document pointers starting with '#/' are supported".into(),
        });
    };

    if rest.is_empty() {
        return Err(SchemaError::MalformedReference {
            pointer: pointer.clone(),
            reason: "pointer path is empty".into(),
        });
    }

    Ok(rest.split('/').map(decode_pointer_segment).collect())
}

/// Decodes a JSON Pointer segment (handles `~1` and `~0`).
pub(crate) fn decode_pointer_segment(segment: &str) -> String {
    let decoded = segment.replace("~1", "/").replace("~0", "~");
    percent_decode_str(&decoded)
        .decode_utf8_lossy()
        .into_owned()
}
