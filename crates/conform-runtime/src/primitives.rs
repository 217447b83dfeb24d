//! Validators for leaf values: strings, numbers, booleans, null, enums and `Unknown`.

use crate::formats::FormatRegistry;
use conform_core::{
    Decoded, NumberType, SchemaError, StringType, Validate, ValidationError, ValidationOptions,
};
use regex::Regex;
use serde_json::Value;
use std::sync::Arc;

/// Type check, optional pattern, optional registered format.
#[derive(Debug)]
pub struct StringValidator {
    pattern: Option<Regex>,
    format: Option<String>,
    formats: Arc<FormatRegistry>,
}

impl StringValidator {
    /// Compiles the pattern up front; an invalid pattern is a schema error.
    pub fn new(ty: &StringType, formats: Arc<FormatRegistry>) -> Result<Self, SchemaError> {
        let pattern = ty
            .pattern
            .as_deref()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| SchemaError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                })
            })
            .transpose()?;

        Ok(Self {
            pattern,
            format: ty.format.clone(),
            formats,
        })
    }
}

impl Validate for StringValidator {
    fn validate(&self, value: &Value, _options: &ValidationOptions) -> Decoded<Value> {
        let Value::String(s) = value else {
            return Decoded::error(ValidationError::type_mismatch("a string", value));
        };

        if let Some(pattern) = &self.pattern {
            if !pattern.is_match(s) {
                return Decoded::error(ValidationError::pattern(s, pattern.as_str()));
            }
        }

        if let Some(name) = &self.format {
            match self.formats.get(name) {
                Some(check) => {
                    // The check's payload is discarded; the original string is kept.
                    let checked = check(s.as_str()).or_reason(|| {
                        ValidationError::here(format!("format {} rejected the value", name))
                    });
                    if let Decoded::Err(errors) = checked {
                        return Decoded::Err(errors);
                    }
                }
                None => {
                    tracing::trace!(format_name = %name, "string format is not registered, skipping");
                }
            }
        }

        Decoded::ok(value.clone())
    }
}

/// Numbers and integers with inclusive bounds.
#[derive(Debug)]
pub struct NumberValidator {
    bounds: NumberType,
    integer: bool,
}

impl NumberValidator {
    pub fn number(bounds: NumberType) -> Result<Self, SchemaError> {
        Self::new(bounds, false)
    }

    pub fn integer(bounds: NumberType) -> Result<Self, SchemaError> {
        Self::new(bounds, true)
    }

    fn new(bounds: NumberType, integer: bool) -> Result<Self, SchemaError> {
        let type_name = if integer { "integer" } else { "number" };
        for bound in [bounds.minimum, bounds.maximum].into_iter().flatten() {
            if !bound.is_finite() {
                return Err(SchemaError::invalid_bounds(
                    type_name,
                    format!("bound {} is not a finite number", bound),
                ));
            }
        }
        if let (Some(minimum), Some(maximum)) = (bounds.minimum, bounds.maximum) {
            if minimum > maximum {
                return Err(SchemaError::invalid_bounds(
                    type_name,
                    format!("minimum {} exceeds maximum {}", minimum, maximum),
                ));
            }
        }
        Ok(Self { bounds, integer })
    }
}

impl Validate for NumberValidator {
    fn validate(&self, value: &Value, _options: &ValidationOptions) -> Decoded<Value> {
        let Some(number) = value.as_f64() else {
            let expected = if self.integer { "an integer" } else { "a number" };
            return Decoded::error(ValidationError::type_mismatch(expected, value));
        };

        if self.integer && !(value.is_i64() || value.is_u64() || number.fract() == 0.0) {
            return Decoded::error(ValidationError::type_mismatch("an integer", value));
        }
        if let Some(minimum) = self.bounds.minimum {
            if number < minimum {
                return Decoded::error(ValidationError::minimum(minimum));
            }
        }
        if let Some(maximum) = self.bounds.maximum {
            if number > maximum {
                return Decoded::error(ValidationError::maximum(maximum));
            }
        }

        Decoded::ok(value.clone())
    }
}

#[derive(Debug, Default)]
pub struct BooleanValidator;

impl Validate for BooleanValidator {
    fn validate(&self, value: &Value, _options: &ValidationOptions) -> Decoded<Value> {
        match value {
            Value::Bool(_) => Decoded::ok(value.clone()),
            other => Decoded::error(ValidationError::type_mismatch("a boolean", other)),
        }
    }
}

#[derive(Debug, Default)]
pub struct NullValidator;

impl Validate for NullValidator {
    fn validate(&self, value: &Value, _options: &ValidationOptions) -> Decoded<Value> {
        match value {
            Value::Null => Decoded::ok(Value::Null),
            other => Decoded::error(ValidationError::type_mismatch("null", other)),
        }
    }
}

/// Accepts exactly the listed literals.
#[derive(Debug)]
pub struct EnumValidator {
    allowed: Vec<Value>,
}

impl EnumValidator {
    pub fn new(allowed: Vec<Value>) -> Self {
        Self { allowed }
    }
}

impl Validate for EnumValidator {
    fn validate(&self, value: &Value, _options: &ValidationOptions) -> Decoded<Value> {
        if self.allowed.contains(value) {
            Decoded::ok(value.clone())
        } else {
            Decoded::error(ValidationError::invalid_enum(&self.allowed, value))
        }
    }
}

/// Accepts anything, returning an independent copy of the input.
#[derive(Debug, Default)]
pub struct UnknownValidator;

impl Validate for UnknownValidator {
    fn validate(&self, value: &Value, _options: &ValidationOptions) -> Decoded<Value> {
        Decoded::ok(value.clone())
    }
}
