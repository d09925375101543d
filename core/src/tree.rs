#![deny(missing_docs)]

//! # Document Tree Helpers
//!
//! Navigation over the `serde_json::Value` document: path segments, node
//! selection, pre-order key search and typed accessors that fail with
//! `TypeMismatch` instead of silently coercing.

use crate::error::{SchemaError, SchemaResult};
use serde_json::{Map, Value};
use std::fmt;

/// One step from a node to one of its children.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object member.
    Key(String),
    /// Array element.
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Renders the segment as an escaped JSON Pointer token.
impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{}", key.replace('~', "~0").replace('/', "~1")),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

/// Formats a path as a JSON Pointer (`""` for the root).
pub fn pointer_string(path: &[PathSegment]) -> String {
    path.iter().map(|seg| format!("/{}", seg)).collect()
}

fn child<'a>(node: &'a Value, seg: &PathSegment) -> Option<&'a Value> {
    match (node, seg) {
        (Value::Object(map), PathSegment::Key(key)) => map.get(key),
        (Value::Array(items), PathSegment::Index(index)) => items.get(*index),
        (Value::Array(items), PathSegment::Key(key)) => {
            key.parse::<usize>().ok().and_then(|i| items.get(i))
        }
        _ => None,
    }
}

fn child_mut<'a>(node: &'a mut Value, seg: &PathSegment) -> Option<&'a mut Value> {
    match (node, seg) {
        (Value::Object(map), PathSegment::Key(key)) => map.get_mut(key),
        (Value::Array(items), PathSegment::Index(index)) => items.get_mut(*index),
        (Value::Array(items), PathSegment::Key(key)) => {
            key.parse::<usize>().ok().and_then(move |i| items.get_mut(i))
        }
        _ => None,
    }
}

/// Follows `path` from `root`. Numeric keys index into arrays.
pub fn select<'a>(root: &'a Value, path: &[PathSegment]) -> Option<&'a Value> {
    path.iter().try_fold(root, |node, seg| child(node, seg))
}

/// Mutable counterpart of [`select`].
pub fn select_mut<'a>(root: &'a mut Value, path: &[PathSegment]) -> Option<&'a mut Value> {
    let mut current = root;
    for seg in path {
        current = child_mut(current, seg)?;
    }
    Some(current)
}

/// Follows a chain of object keys from `root`.
pub fn select_keys<'a>(root: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().try_fold(root, |node, key| node.as_object()?.get(*key))
}

/// Resolves raw pointer tokens against `root` and returns the canonical path,
/// with array steps expressed as [`PathSegment::Index`].
pub fn resolve_tokens(root: &Value, tokens: &[String]) -> Option<Vec<PathSegment>> {
    let mut current = root;
    let mut path = Vec::with_capacity(tokens.len());
    for token in tokens {
        let seg = match current {
            Value::Array(_) => PathSegment::Index(token.parse::<usize>().ok()?),
            _ => PathSegment::Key(token.clone()),
        };
        current = child(current, &seg)?;
        path.push(seg);
    }
    Some(path)
}

/// Finds the first member named `key` in pre-order (object members in
/// document order, array elements by index).
///
/// Returns the path of the object holding the member and the member's value.
/// The walk keeps its own stack, so document depth is not bounded by the
/// thread stack.
pub fn find_first_key<'a>(root: &'a Value, key: &str) -> Option<(Vec<PathSegment>, &'a Value)> {
    // (path to node, node is a member named `key`, node)
    let mut stack: Vec<(Vec<PathSegment>, bool, &'a Value)> = vec![(Vec::new(), false, root)];
    while let Some((mut path, is_match, node)) = stack.pop() {
        if is_match {
            path.pop();
            return Some((path, node));
        }
        match node {
            Value::Object(map) => {
                for (k, v) in map.iter().rev() {
                    let mut child = path.clone();
                    child.push(PathSegment::Key(k.clone()));
                    stack.push((child, k == key, v));
                }
            }
            Value::Array(items) => {
                for (i, v) in items.iter().enumerate().rev() {
                    let mut child = path.clone();
                    child.push(PathSegment::Index(i));
                    stack.push((child, false, v));
                }
            }
            _ => {}
        }
    }
    None
}

/// Returns true when `ancestor` equals `path` or is a prefix of it.
pub fn is_ancestor_or_self(ancestor: &[PathSegment], path: &[PathSegment]) -> bool {
    path.starts_with(ancestor)
}

fn mismatch(path: &str, expected: &'static str) -> SchemaError {
    SchemaError::TypeMismatch {
        path: path.to_string(),
        expected,
    }
}

/// Typed accessor: the node must be an object.
pub fn as_object<'a>(node: &'a Value, path: &str) -> SchemaResult<&'a Map<String, Value>> {
    node.as_object().ok_or_else(|| mismatch(path, "object"))
}

/// Typed accessor: the node must be an array.
pub fn as_array<'a>(node: &'a Value, path: &str) -> SchemaResult<&'a Vec<Value>> {
    node.as_array().ok_or_else(|| mismatch(path, "array"))
}

/// Typed accessor: the node must be a string.
pub fn as_str<'a>(node: &'a Value, path: &str) -> SchemaResult<&'a str> {
    node.as_str().ok_or_else(|| mismatch(path, "string"))
}
