#![deny(missing_docs)]

//! # Error Handling
//!
//! Provides the unified `SchemaError` enum returned by loading, reference
//! expansion, schema extraction and validation.

use derive_more::{Display, From};

/// Which side of a `$ref` violated the object-only contract.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum RefSide {
    /// The object holding the `$ref` key.
    #[display("location")]
    Location,
    /// The node the pointer resolves to.
    #[display("target")]
    Target,
}

/// The Global Error Enum.
///
/// Only `Io` converts implicitly; every other variant is built explicitly at
/// the point of failure so the message can carry the offending
/// path, method or pointer.
#[derive(Debug, Display, From)]
pub enum SchemaError {
    /// Wrapper for standard IO errors (loading a document from disk).
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// The raw document is neither valid JSON nor valid YAML.
    #[from(ignore)]
    #[display("Parse Error: {_0}")]
    Parse(String),

    /// No `openapi` or `swagger` version marker at the document root.
    #[from(ignore)]
    #[display("Unsupported schema: no 'openapi' or 'swagger' version marker")]
    UnsupportedSchema,

    /// A version marker is present but names an unsupported version.
    #[from(ignore)]
    #[display("Unsupported schema version '{_0}'")]
    UnsupportedVersion(String),

    /// A `$ref` that is not a same-document fragment pointer.
    #[from(ignore)]
    #[display("Malformed reference '{pointer}': {reason}")]
    MalformedReference {
        /// The raw `$ref` value (JSON-encoded when not a string).
        pointer: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The `$ref` holder or its target is not an object.
    #[from(ignore)]
    #[display("Reference '{pointer}': {side} at '{path}' is not an object")]
    ReferenceTypeMismatch {
        /// The raw `$ref` value.
        pointer: String,
        /// Which side violated the contract.
        side: RefSide,
        /// JSON Pointer of the offending node.
        path: String,
    },

    /// The pointer does not resolve to any node in the document.
    #[from(ignore)]
    #[display("Reference '{pointer}' at '{location}' does not resolve")]
    UnresolvableReference {
        /// The raw `$ref` value.
        pointer: String,
        /// JSON Pointer of the object holding the `$ref`.
        location: String,
    },

    /// The pointer targets the object holding it, or one of its ancestors.
    #[from(ignore)]
    #[display("Reference '{pointer}' at '{location}' is cyclic")]
    CyclicReference {
        /// The raw `$ref` value.
        pointer: String,
        /// JSON Pointer of the object holding the `$ref`.
        location: String,
    },

    /// Expansion did not reach a fixpoint within the configured pass budget.
    #[from(ignore)]
    #[display("Reference expansion exceeded {passes} passes (last reference '{pointer}')")]
    ExpansionLimitExceeded {
        /// The configured maximum.
        passes: usize,
        /// The reference being expanded when the budget ran out.
        pointer: String,
    },

    /// `paths.<path>.<method>` is absent.
    #[from(ignore)]
    #[display("Operation not found: {method} {path}")]
    OperationNotFound {
        /// Request path template.
        path: String,
        /// HTTP method (lower-cased).
        method: String,
    },

    /// The operation has no `parameters` entry.
    #[from(ignore)]
    #[display("Parameters not found: {method} {path}")]
    ParametersNotFound {
        /// Request path template.
        path: String,
        /// HTTP method (lower-cased).
        method: String,
    },

    /// The operation's `parameters` entry is not an array.
    #[from(ignore)]
    #[display("Parameters is not an array: {method} {path}")]
    ParametersNotArray {
        /// Request path template.
        path: String,
        /// HTTP method (lower-cased).
        method: String,
    },

    /// A parameter spec without a non-empty `name`.
    #[from(ignore)]
    #[display("Parameter #{index} has no name: {method} {path}")]
    MissingParameterName {
        /// Request path template.
        path: String,
        /// HTTP method (lower-cased).
        method: String,
        /// Position in the `parameters` array.
        index: usize,
    },

    /// No request body schema is declared for the operation.
    #[from(ignore)]
    #[display("Request body not found: {method} {path} ({content_type})")]
    BodyNotFound {
        /// Request path template.
        path: String,
        /// HTTP method (lower-cased).
        method: String,
        /// Requested content type.
        content_type: String,
    },

    /// The document declares no server information.
    #[from(ignore)]
    #[display("Servers not found: {_0}")]
    ServersNotFound(String),

    /// A server entry lacks a usable `url`.
    #[from(ignore)]
    #[display("Server #{index} has no url")]
    MalformedServer {
        /// Position in the `servers` array.
        index: usize,
    },

    /// A tree node had a different JSON type than required.
    #[from(ignore)]
    #[display("Type mismatch at '{path}': expected {expected}")]
    TypeMismatch {
        /// JSON Pointer of the node.
        path: String,
        /// Expected JSON type name.
        expected: &'static str,
    },

    /// Data or schema could not be handed to the validator as JSON.
    #[from(ignore)]
    #[display("Schema serialization error: {_0}")]
    SchemaSerialization(String),

    /// The validator rejected the schema document itself.
    #[from(ignore)]
    #[display("Invalid schema: {_0}")]
    InvalidSchema(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for SchemaError {}

/// Helper type alias for Result using SchemaError.
pub type SchemaResult<T> = Result<T, SchemaError>;
