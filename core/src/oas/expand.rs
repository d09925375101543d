#![deny(missing_docs)]

//! # Reference Expansion
//!
//! Inlines every same-document `$ref` in place until none remain.
//!
//! Each pass searches the whole document (pre-order) for the first `$ref`
//! member and splices exactly that one. Splicing can introduce new `$ref`
//! members or move existing ones, so positions found by an earlier search
//! are never reused. The loop stops at the first pass that finds nothing.
//!
//! Every splice is remembered as a (holder, target) pair. A reference whose
//! target was already inlined at or above its own holder can only grow the
//! document forever, so it fails with `CyclicReference`.

use crate::error::{RefSide, SchemaError, SchemaResult};
use crate::oas::ref_utils::{parse_local_ref, raw_pointer};
use crate::options::LoadOptions;
use crate::tree::{
    find_first_key, is_ancestor_or_self, pointer_string, resolve_tokens, select, select_mut,
    PathSegment,
};
use serde_json::Value;
use tracing::{debug, trace};

/// Member name of a reference.
pub const REF_KEY: &str = "$ref";

/// Member recording the pointer an object was expanded from.
pub const PROVENANCE_KEY: &str = "x-original-ref";

/// A reference located during one expansion pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Path of the object holding the `$ref` member.
    pub location: Vec<PathSegment>,
    /// Canonical path of the node the pointer resolves to.
    pub target: Vec<PathSegment>,
    /// The pointer as written in the document.
    pub raw: String,
}

/// A splice already performed: the holder's path, the inlined target and the
/// member names the target wrote into the holder.
#[derive(Debug)]
struct Inlined {
    location: Vec<PathSegment>,
    target: Vec<PathSegment>,
    keys: Vec<String>,
}

impl Inlined {
    /// True when `path` is the holder itself or lies under a member that
    /// came from the target.
    fn covers(&self, path: &[PathSegment]) -> bool {
        if !path.starts_with(&self.location) {
            return false;
        }
        match path.get(self.location.len()) {
            None => true,
            Some(PathSegment::Key(key)) => self.keys.contains(key),
            Some(PathSegment::Index(_)) => false,
        }
    }
}

/// Returns true if any `$ref` member remains anywhere in the document.
pub fn has_references(doc: &Value) -> bool {
    find_first_key(doc, REF_KEY).is_some()
}

/// Expands every `$ref` in `doc`, returning the number of references inlined.
///
/// A document without references is left untouched. On error the document
/// is left partially expanded and must be discarded.
pub fn expand_references(doc: &mut Value, options: &LoadOptions) -> SchemaResult<usize> {
    let mut passes = 0;
    let mut inlined: Vec<Inlined> = Vec::new();
    while let Some(reference) = next_reference(doc, &inlined)? {
        if passes >= options.max_expansion_passes {
            return Err(SchemaError::ExpansionLimitExceeded {
                passes: options.max_expansion_passes,
                pointer: reference.raw,
            });
        }
        trace!(
            pass = passes,
            pointer = %reference.raw,
            location = %pointer_string(&reference.location),
            "expanding reference"
        );
        let replaced = splice(doc, &reference, options.annotate_references)?;

        // Overwritten members no longer hold what was inlined into them.
        let record = Inlined {
            location: reference.location,
            target: reference.target,
            keys: replaced,
        };
        inlined.retain(|seen| {
            seen.location.len() == record.location.len() || !record.covers(&seen.location)
        });
        inlined.push(record);
        passes += 1;
    }
    debug!(expanded = passes, "reference expansion complete");
    Ok(passes)
}

/// Finds and validates the first reference in pre-order.
fn next_reference(doc: &Value, inlined: &[Inlined]) -> SchemaResult<Option<Reference>> {
    let Some((location, value)) = find_first_key(doc, REF_KEY) else {
        return Ok(None);
    };

    let tokens = parse_local_ref(value)?;
    let raw = raw_pointer(value);

    let Some(target) = resolve_tokens(doc, &tokens) else {
        return Err(SchemaError::UnresolvableReference {
            pointer: raw,
            location: pointer_string(&location),
        });
    };

    // Inlining an ancestor into its own descendant never converges, nor does
    // re-inlining a target that an enclosing holder already came from.
    let recursive = inlined
        .iter()
        .any(|seen| seen.target == target && seen.covers(&location));
    if recursive || is_ancestor_or_self(&target, &location) {
        return Err(SchemaError::CyclicReference {
            pointer: raw,
            location: pointer_string(&location),
        });
    }

    Ok(Some(Reference {
        location,
        target,
        raw,
    }))
}

/// Replaces the `$ref` member at `reference.location` with the target's members
/// and returns the names written into the holder.
///
/// Members already next to the `$ref` survive unless the target defines the
/// same name.
fn splice(doc: &mut Value, reference: &Reference, annotate: bool) -> SchemaResult<Vec<String>> {
    match select(doc, &reference.location) {
        Some(Value::Object(_)) => {}
        Some(_) => {
            return Err(SchemaError::ReferenceTypeMismatch {
                pointer: reference.raw.clone(),
                side: RefSide::Location,
                path: pointer_string(&reference.location),
            })
        }
        None => {
            return Err(SchemaError::UnresolvableReference {
                pointer: reference.raw.clone(),
                location: pointer_string(&reference.location),
            })
        }
    }

    let replacement = match select(doc, &reference.target) {
        Some(Value::Object(map)) => map.clone(),
        Some(_) => {
            return Err(SchemaError::ReferenceTypeMismatch {
                pointer: reference.raw.clone(),
                side: RefSide::Target,
                path: pointer_string(&reference.target),
            })
        }
        None => {
            return Err(SchemaError::UnresolvableReference {
                pointer: reference.raw.clone(),
                location: pointer_string(&reference.location),
            })
        }
    };

    let Some(Value::Object(holder)) = select_mut(doc, &reference.location) else {
        return Err(SchemaError::ReferenceTypeMismatch {
            pointer: reference.raw.clone(),
            side: RefSide::Location,
            path: pointer_string(&reference.location),
        });
    };

    holder.remove(REF_KEY);
    if annotate {
        holder.insert(
            PROVENANCE_KEY.to_string(),
            Value::String(reference.raw.clone()),
        );
    }
    let mut replaced = Vec::with_capacity(replacement.len());
    for (key, value) in replacement {
        replaced.push(key.clone());
        holder.insert(key, value);
    }
    Ok(replaced)
}
