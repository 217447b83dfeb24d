//! Validation error types.
//!
//! Every data validation failure is a [`ValidationError`] carrying the path
//! from the validated root down to the offending value. Errors are collected
//! into [`ValidationErrors`], which is what a failed [`crate::Decoded`] holds.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// One step in the path to a value: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) if needs_brackets(key) => {
                write!(f, "[{}]", Value::String(key.clone()))
            }
            PathSegment::Key(key) => write!(f, "{}", key),
            PathSegment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Keys that would read as path structure are rendered in bracket form.
fn needs_brackets(key: &str) -> bool {
    key.is_empty() || key.contains(['.', '[', ']', '"'])
}

/// Render a path the way it reads in JSON accessors, e.g. `spec.containers[0].image`.
///
/// Keys containing `.`, `[`, `]` or `"` (and the empty key) are written as
/// quoted brackets, so `{"a.b": ..}` renders as `["a.b"]` and stays distinct
/// from `{"a": {"b": ..}}`.
pub fn format_path(path: &[PathSegment]) -> String {
    let mut out = String::new();
    for segment in path {
        match segment {
            PathSegment::Key(key) if needs_brackets(key) => {
                out.push_str(&format!("[{}]", Value::String(key.clone())));
            }
            PathSegment::Key(key) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(key);
            }
            PathSegment::Index(index) => out.push_str(&format!("[{}]", index)),
        }
    }
    out
}

/// A single validation error with its location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Path from the validated root to the failing value, outermost first.
    pub path: Vec<PathSegment>,

    /// Human-readable error message.
    pub error: String,
}

impl ValidationError {
    /// Create an error at the given path.
    pub fn new(path: Vec<PathSegment>, error: impl Into<String>) -> Self {
        Self {
            path,
            error: error.into(),
        }
    }

    /// Create an error located at the value currently being validated.
    ///
    /// Enclosing validators prepend their own segment as the error bubbles up.
    pub fn here(error: impl Into<String>) -> Self {
        Self::new(Vec::new(), error)
    }

    /// Prepend a path segment.
    pub fn with_path_prefix(mut self, segment: impl Into<PathSegment>) -> Self {
        self.path.insert(0, segment.into());
        self
    }

    // --- Common error constructors ---

    /// The value is not of the expected JSON kind.
    pub fn type_mismatch(expected: &str, actual: &Value) -> Self {
        Self::here(format!(
            "expected {}, but got \"{}\" instead.",
            expected, actual
        ))
    }

    pub fn pattern(value: &str, pattern: &str) -> Self {
        Self::here(format!("{} does not match pattern /{}/", value, pattern))
    }

    pub fn minimum(minimum: f64) -> Self {
        Self::here(format!("expected a number greater or equal to {}", minimum))
    }

    pub fn maximum(maximum: f64) -> Self {
        Self::here(format!("expected a number smaller or equal to {}", maximum))
    }

    pub fn min_items(min_items: usize) -> Self {
        Self::here(format!("expected an array of minimum length {}", min_items))
    }

    pub fn max_items(max_items: usize) -> Self {
        Self::here(format!("expected an array of maximum length {}", max_items))
    }

    pub fn invalid_enum(allowed: &[Value], actual: &Value) -> Self {
        Self::here(format!(
            "expected one of {}, but got \"{}\" instead.",
            Value::Array(allowed.to_vec()),
            actual
        ))
    }

    /// A required object field is absent.
    pub fn required(key: &str) -> Self {
        Self::new(vec![PathSegment::from(key)], "required field is missing")
    }

    /// A field that is neither declared nor admitted by `additionalProperties`.
    pub fn unknown_field(key: &str) -> Self {
        Self::new(
            vec![PathSegment::from(key)],
            format!("unexpected field {} is not allowed", key),
        )
    }

    /// A reserved key used as a declared property.
    pub fn magic_field(key: &str) -> Self {
        Self::new(
            vec![PathSegment::from(key)],
            format!("Using {} as field of an object is not allowed", key),
        )
    }

    /// A reserved key routed through `additionalProperties`.
    pub fn magic_additional_field(key: &str) -> Self {
        Self::new(
            vec![PathSegment::from(key)],
            format!("Using {} as objects additional field is not allowed.", key),
        )
    }

    pub fn ambiguous_union(matches: usize) -> Self {
        Self::here(format!(
            "multiple options match: {} options of the union accepted the value",
            matches
        ))
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.error)
        } else {
            write!(f, "{}: {}", format_path(&self.path), self.error)
        }
    }
}

impl std::error::Error for ValidationError {}

/// An ordered collection of validation errors.
///
/// A failed [`crate::Decoded`] always holds at least one error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_error(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Append all errors from `other`, keeping their order.
    pub fn merge(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    pub fn as_slice(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Prefix all error paths with a given path segment.
    ///
    /// Used when a nested validation fails and its errors move up one level.
    pub fn with_path_prefix(mut self, segment: impl Into<PathSegment>) -> Self {
        let segment = segment.into();
        for error in &mut self.errors {
            error.path.insert(0, segment.clone());
        }
        self
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            write!(f, "No validation errors")
        } else if self.errors.len() == 1 {
            write!(f, "Validation error: {}", self.errors[0])
        } else {
            writeln!(f, "{} validation errors:", self.errors.len())?;
            for (i, error) in self.errors.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, error)?;
            }
            Ok(())
        }
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self::from_error(error)
    }
}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_validation_error_display() {
        let error = ValidationError::required("image")
            .with_path_prefix(0usize)
            .with_path_prefix("containers");

        assert_eq!(
            error.to_string(),
            "containers[0].image: required field is missing"
        );
        assert_eq!(
            ValidationError::minimum(3.0).to_string(),
            "expected a number greater or equal to 3"
        );
    }

    #[test]
    fn test_format_path_brackets_keys_with_separators() {
        let dotted = vec![PathSegment::from("a.b")];
        let nested = vec![PathSegment::from("a"), PathSegment::from("b")];
        assert_eq!(format_path(&dotted), r#"["a.b"]"#);
        assert_eq!(format_path(&nested), "a.b");

        let mixed = vec![
            PathSegment::from("spec"),
            PathSegment::from("x[0]"),
            PathSegment::Index(1),
            PathSegment::from("say \"hi\""),
            PathSegment::from("name"),
        ];
        assert_eq!(
            format_path(&mixed),
            r#"spec["x[0]"][1]["say \"hi\""].name"#
        );
        assert_eq!(PathSegment::from("").to_string(), r#"[""]"#);
    }

    #[test]
    fn test_validation_errors_path_prefix() {
        let mut errors = ValidationErrors::new();
        errors.push(ValidationError::here("too short"));
        errors.push(ValidationError::new(vec![PathSegment::Index(0)], "invalid"));

        let prefixed = errors.with_path_prefix("labels");

        assert_eq!(prefixed.as_slice()[0].path, vec![PathSegment::from("labels")]);
        assert_eq!(
            prefixed.as_slice()[1].path,
            vec![PathSegment::from("labels"), PathSegment::Index(0)]
        );
    }

    #[test]
    fn test_type_mismatch_embeds_serialized_value() {
        let error = ValidationError::type_mismatch("an object", &json!([]));
        assert_eq!(error.error, "expected an object, but got \"[]\" instead.");
    }

    #[test]
    fn test_magic_key_wording() {
        assert_eq!(
            ValidationError::magic_field("__proto__").error,
            "Using __proto__ as field of an object is not allowed"
        );
        assert_eq!(
            ValidationError::magic_additional_field("constructor").error,
            "Using constructor as objects additional field is not allowed."
        );
    }

    #[test]
    fn test_errors_serialize_with_untagged_path() {
        let error = ValidationError::pattern("b", "a+")
            .with_path_prefix(1usize)
            .with_path_prefix("names");
        let errors = ValidationErrors::from_error(error);

        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!([{ "path": ["names", 1], "error": "b does not match pattern /a+/" }])
        );
    }
}
