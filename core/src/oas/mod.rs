#![deny(missing_docs)]

//! # OpenAPI / Swagger Document Handling
//!
//! - **ref_utils**: Parsing of same-document `$ref` pointers.
//! - **expand**: In-place `$ref` inlining.
//! - **version**: Dialect detection from the root version marker.
//! - **params**: Parameter iteration and canonical schema synthesis.
//! - **dialect**: Swagger 2.0 and OpenAPI 3.0 specific lookups.

pub(crate) mod dialect;
pub mod expand;
pub mod params;
pub(crate) mod ref_utils;
pub mod version;

pub use expand::{expand_references, has_references, Reference, PROVENANCE_KEY, REF_KEY};
pub use params::{CanonicalSchema, ParamLocation};
pub use version::{detect, Dialect};
