//! Validators for arrays and objects.

use conform_core::{
    Decoded, SchemaError, Validate, ValidationError, ValidationErrors, ValidationOptions,
    Validator,
};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Keys that are always rejected, whatever the descriptor admits.
pub const MAGIC_KEYS: [&str; 2] = ["__proto__", "constructor"];

pub fn is_magic_key(key: &str) -> bool {
    MAGIC_KEYS.contains(&key)
}

/// Ordered elements with optional length bounds.
#[derive(Debug)]
pub struct ArrayValidator {
    items: Validator,
    min_items: Option<usize>,
    max_items: Option<usize>,
}

impl ArrayValidator {
    pub fn new(
        items: Validator,
        min_items: Option<usize>,
        max_items: Option<usize>,
    ) -> Result<Self, SchemaError> {
        if let (Some(min), Some(max)) = (min_items, max_items) {
            if min > max {
                return Err(SchemaError::invalid_bounds(
                    "array",
                    format!("minItems {} exceeds maxItems {}", min, max),
                ));
            }
        }
        Ok(Self {
            items,
            min_items,
            max_items,
        })
    }
}

impl Validate for ArrayValidator {
    fn validate(&self, value: &Value, options: &ValidationOptions) -> Decoded<Value> {
        let Value::Array(elements) = value else {
            return Decoded::error(ValidationError::type_mismatch("an array", value));
        };

        if let Some(min_items) = self.min_items {
            if elements.len() < min_items {
                return Decoded::error(ValidationError::min_items(min_items));
            }
        }
        if let Some(max_items) = self.max_items {
            if elements.len() > max_items {
                return Decoded::error(ValidationError::max_items(max_items));
            }
        }

        let mut output = Vec::with_capacity(elements.len());
        let mut errors = ValidationErrors::new();
        for (index, element) in elements.iter().enumerate() {
            match self.items.validate(element, options) {
                Decoded::Ok(item) => output.push(item),
                Decoded::Err(item_errors) => errors.merge(item_errors.with_path_prefix(index)),
            }
        }

        Decoded::from_parts(Value::Array(output), errors)
    }
}

#[derive(Debug)]
pub struct PropertyValidator {
    pub validator: Validator,
    pub required: bool,
}

/// Declared properties, an additional-properties policy, and the magic-key guard.
#[derive(Debug)]
pub struct ObjectValidator {
    properties: BTreeMap<String, PropertyValidator>,
    /// `None` when undeclared keys are forbidden
    additional: Option<Validator>,
}

impl ObjectValidator {
    pub fn new(
        properties: BTreeMap<String, PropertyValidator>,
        additional: Option<Validator>,
    ) -> Self {
        Self {
            properties,
            additional,
        }
    }

    fn check_magic_keys(&self, input: &Map<String, Value>, errors: &mut ValidationErrors) {
        for key in input.keys().filter(|key| is_magic_key(key)) {
            if self.properties.contains_key(key) {
                errors.push(ValidationError::magic_field(key));
            } else {
                errors.push(ValidationError::magic_additional_field(key));
            }
        }
    }

    fn validate_declared(
        &self,
        input: &Map<String, Value>,
        options: &ValidationOptions,
        output: &mut Map<String, Value>,
        errors: &mut ValidationErrors,
    ) {
        for (name, property) in &self.properties {
            match input.get(name) {
                Some(_) if is_magic_key(name) => {}
                None => {
                    if property.required {
                        errors.push(ValidationError::required(name));
                    }
                }
                Some(field) => match property.validator.validate(field, options) {
                    Decoded::Ok(sanitized) => {
                        output.insert(name.clone(), sanitized);
                    }
                    Decoded::Err(field_errors) => {
                        errors.merge(field_errors.with_path_prefix(name.as_str()));
                    }
                },
            }
        }
    }

    fn validate_additional(
        &self,
        input: &Map<String, Value>,
        options: &ValidationOptions,
        output: &mut Map<String, Value>,
        errors: &mut ValidationErrors,
    ) {
        let undeclared = input
            .iter()
            .filter(|(key, _)| !self.properties.contains_key(*key) && !is_magic_key(key));

        for (key, field) in undeclared {
            match &self.additional {
                Some(validator) => match validator.validate(field, options) {
                    Decoded::Ok(sanitized) => {
                        output.insert(key.clone(), sanitized);
                    }
                    Decoded::Err(field_errors) => {
                        errors.merge(field_errors.with_path_prefix(key.as_str()));
                    }
                },
                None if options.drops_unknown_fields() => {
                    tracing::trace!(field = %key, "dropping unknown field");
                }
                None => errors.push(ValidationError::unknown_field(key)),
            }
        }
    }
}

impl Validate for ObjectValidator {
    fn validate(&self, value: &Value, options: &ValidationOptions) -> Decoded<Value> {
        let Value::Object(input) = value else {
            return Decoded::error(ValidationError::type_mismatch("an object", value));
        };

        let mut output = Map::new();
        let mut errors = ValidationErrors::new();

        self.check_magic_keys(input, &mut errors);
        self.validate_declared(input, options, &mut output, &mut errors);
        self.validate_additional(input, options, &mut output, &mut errors);

        Decoded::from_parts(Value::Object(output), errors)
    }
}
