// crates/reqres-contract/src/matcher.rs
// ============================================================================
// Module: Structural Matcher
// Description: Recursive matching of JSON values against contract shapes.
// Purpose: Enumerate every missing key, wrong type, and format failure.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! [`check`] walks a [`serde_json::Value`] depth-first alongside a [`Shape`]
//! and collects [`Violation`] records. Traversal never stops at the first
//! failure so reports describe the whole mismatch. A value of the wrong type
//! is reported once; its children are not visited.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde_json::Map;
use serde_json::Value;

use crate::shape::ObjectShape;
use crate::shape::Shape;
use crate::shape::StringFormat;

// ============================================================================
// SECTION: Violations
// ============================================================================

/// Kind of structural mismatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// A required object key is absent.
    MissingKey {
        /// Missing key name.
        key: String,
    },
    /// The value has a different JSON type than the shape expects.
    WrongType {
        /// Expected type label.
        expected: &'static str,
        /// Observed type label.
        actual: &'static str,
    },
    /// A string failed its format constraint.
    InvalidFormat {
        /// Format that was not satisfied.
        format: StringFormat,
    },
    /// None of the alternatives of an any-of shape matched.
    NoAlternativeMatched {
        /// Type labels of the alternatives tried.
        expected: Vec<&'static str>,
        /// Observed type label.
        actual: &'static str,
    },
}

/// A single mismatch located by JSON pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON pointer of the offending value (`""` is the document root).
    pub path: String,
    /// What went wrong.
    pub kind: ViolationKind,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let at = if self.path.is_empty() { "/" } else { self.path.as_str() };
        match &self.kind {
            ViolationKind::MissingKey {
                key,
            } => write!(f, "missing required key `{key}` at {at}"),
            ViolationKind::WrongType {
                expected,
                actual,
            } => write!(f, "wrong type at {at}: expected {expected}, found {actual}"),
            ViolationKind::InvalidFormat {
                format,
            } => write!(f, "invalid format at {at}: expected {}", format.as_str()),
            ViolationKind::NoAlternativeMatched {
                expected,
                actual,
            } => write!(
                f,
                "no alternative matched at {at}: expected one of [{}], found {actual}",
                expected.join(", ")
            ),
        }
    }
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Checks `instance` against `shape` and returns every violation found.
///
/// An empty vector means the instance conforms.
#[must_use]
pub fn check(shape: &Shape, instance: &Value) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut path = String::new();
    walk(shape, instance, &mut path, &mut violations);
    violations
}

// ============================================================================
// SECTION: Traversal
// ============================================================================

/// Recursively matches `value` against `shape`, appending to `out`.
///
/// `path` is restored to its entry value before returning.
fn walk(shape: &Shape, value: &Value, path: &mut String, out: &mut Vec<Violation>) {
    match shape {
        Shape::Any => {}
        Shape::Integer => {
            if !is_integer(value) {
                push_wrong_type(shape, value, path, out);
            }
        }
        Shape::String(format) => match value {
            Value::String(text) => {
                if !format_matches(*format, text) {
                    out.push(Violation {
                        path: path.clone(),
                        kind: ViolationKind::InvalidFormat {
                            format: *format,
                        },
                    });
                }
            }
            _ => push_wrong_type(shape, value, path, out),
        },
        Shape::Object(object) => match value {
            Value::Object(map) => walk_object(object, map, path, out),
            _ => push_wrong_type(shape, value, path, out),
        },
        Shape::Array(items) => match value {
            Value::Array(elements) => {
                for (index, element) in elements.iter().enumerate() {
                    let restore = path.len();
                    path.push('/');
                    path.push_str(&index.to_string());
                    walk(items, element, path, out);
                    path.truncate(restore);
                }
            }
            _ => push_wrong_type(shape, value, path, out),
        },
        Shape::AnyOf(alternatives) => {
            let matched =
                alternatives.iter().any(|alternative| check(alternative, value).is_empty());
            if !matched {
                out.push(Violation {
                    path: path.clone(),
                    kind: ViolationKind::NoAlternativeMatched {
                        expected: alternatives.iter().map(Shape::type_label).collect(),
                        actual: json_type(value),
                    },
                });
            }
        }
    }
}

/// Matches declared fields of an object shape.
fn walk_object(
    object: &ObjectShape,
    map: &Map<String, Value>,
    path: &mut String,
    out: &mut Vec<Violation>,
) {
    for field in object.fields() {
        match map.get(field.name) {
            Some(child) => {
                let restore = path.len();
                path.push('/');
                push_pointer_token(path, field.name);
                walk(&field.shape, child, path, out);
                path.truncate(restore);
            }
            None if field.required => out.push(Violation {
                path: path.clone(),
                kind: ViolationKind::MissingKey {
                    key: field.name.to_string(),
                },
            }),
            None => {}
        }
    }
}

/// Records a type mismatch for `value`.
fn push_wrong_type(shape: &Shape, value: &Value, path: &str, out: &mut Vec<Violation>) {
    out.push(Violation {
        path: path.to_string(),
        kind: ViolationKind::WrongType {
            expected: shape.type_label(),
            actual: json_type(value),
        },
    });
}

/// Appends an RFC 6901 escaped reference token.
fn push_pointer_token(path: &mut String, token: &str) {
    for ch in token.chars() {
        match ch {
            '~' => path.push_str("~0"),
            '/' => path.push_str("~1"),
            other => path.push(other),
        }
    }
}

// ============================================================================
// SECTION: Type Helpers
// ============================================================================

/// Returns the JSON type label of a value.
#[must_use]
pub fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) if is_integer(value) => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Returns true for numbers without a fractional part.
fn is_integer(value: &Value) -> bool {
    let Value::Number(number) = value else {
        return false;
    };
    number.is_i64()
        || number.is_u64()
        || number.as_f64().is_some_and(|float| float.is_finite() && float.fract() == 0.0)
}

/// Applies a string format constraint.
fn format_matches(format: StringFormat, text: &str) -> bool {
    match format {
        StringFormat::Plain => true,
        StringFormat::NonEmpty => !text.is_empty(),
        StringFormat::Email => is_email(text),
    }
}

/// Returns true when `text` looks like `local@domain.tld`.
///
/// Exactly one `@`, no whitespace, a non-empty local part, and a domain of
/// at least two non-empty dot-separated labels.
#[must_use]
pub fn is_email(text: &str) -> bool {
    if text.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = text.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
