#![deny(missing_docs)]

//! # OAS Validation Core
//!
//! Loads a Swagger 2.0 or OpenAPI 3.0 description, inlines its `$ref`
//! pointers, and synthesizes JSON Schema documents for operation parameters
//! and request bodies that request data is then validated against.

/// Shared error types.
pub mod error;

/// Load-time configuration.
pub mod options;

/// Document tree navigation helpers.
pub mod tree;

/// OpenAPI (OAS) document handling.
pub mod oas;

/// JSON Schema validation facade.
pub mod validation;

/// Loaded API description and its accessors.
pub mod schema;

pub use error::{RefSide, SchemaError, SchemaResult};
pub use oas::{
    detect, expand_references, has_references, CanonicalSchema, Dialect, ParamLocation,
    Reference,
};
pub use options::LoadOptions;
pub use schema::{Schema, JSON_CONTENT_TYPE};
pub use validation::{validate, validate_text, ValidationResult, Violation};
