//! Validators that combine other validators: named references, unions and intersections.

use crate::merge::Merge;
use conform_core::{
    Decoded, Validate, ValidationError, ValidationErrors, ValidationOptions, Validator,
};
use serde_json::Value;

/// Delegates to the maker of a named type.
#[derive(Debug)]
pub struct NamedValidator {
    name: String,
    maker: Validator,
}

impl NamedValidator {
    pub fn new(name: impl Into<String>, maker: Validator) -> Self {
        Self {
            name: name.into(),
            maker,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Validate for NamedValidator {
    fn validate(&self, value: &Value, options: &ValidationOptions) -> Decoded<Value> {
        self.maker.validate(value, options)
    }
}

#[derive(Debug)]
pub struct UnionOption {
    pub validator: Validator,
    /// Name of the type when the option is a named reference
    pub named: Option<String>,
}

/// Exactly one option must match.
///
/// When several options match, a single successful named option is preferred
/// over any number of structural matches; otherwise the value is ambiguous.
#[derive(Debug)]
pub struct UnionValidator {
    options: Vec<UnionOption>,
}

impl UnionValidator {
    pub fn new(options: Vec<UnionOption>) -> Self {
        Self { options }
    }
}

impl Validate for UnionValidator {
    fn validate(&self, value: &Value, options: &ValidationOptions) -> Decoded<Value> {
        let mut successes: Vec<(&UnionOption, Value)> = Vec::new();
        let mut failures = ValidationErrors::new();

        for option in &self.options {
            match option.validator.validate(value, options) {
                Decoded::Ok(sanitized) => successes.push((option, sanitized)),
                Decoded::Err(errors) => failures.merge(errors),
            }
        }

        if successes.is_empty() {
            if failures.is_empty() {
                failures.push(ValidationError::here("no option of the union matched"));
            }
            return Decoded::Err(failures);
        }

        let named: Vec<usize> = successes
            .iter()
            .enumerate()
            .filter(|(_, (option, _))| option.named.is_some())
            .map(|(index, _)| index)
            .collect();

        if let [index] = named[..] {
            let (option, sanitized) = successes.swap_remove(index);
            tracing::trace!(
                named = option.named.as_deref().unwrap_or_default(),
                structural_matches = successes.len(),
                "union resolved by named preference"
            );
            return Decoded::ok(sanitized);
        }

        if let [(_, sanitized)] = successes.as_mut_slice() {
            return Decoded::ok(std::mem::take(sanitized));
        }

        tracing::trace!(
            matches = successes.len(),
            named_matches = named.len(),
            "union is ambiguous"
        );
        Decoded::error(ValidationError::ambiguous_union(successes.len()))
    }
}

/// Every option must match; the outputs are deep-merged in option order.
#[derive(Debug)]
pub struct IntersectionValidator {
    options: Vec<Validator>,
}

impl IntersectionValidator {
    pub fn new(options: Vec<Validator>) -> Self {
        Self { options }
    }
}

impl Validate for IntersectionValidator {
    fn validate(&self, value: &Value, options: &ValidationOptions) -> Decoded<Value> {
        let mut outputs = Vec::with_capacity(self.options.len());
        let mut errors = ValidationErrors::new();

        for option in &self.options {
            match option.validate(value, options) {
                Decoded::Ok(sanitized) => outputs.push(sanitized),
                Decoded::Err(option_errors) => errors.merge(option_errors),
            }
        }

        if !errors.is_empty() {
            return Decoded::Err(errors);
        }

        let mut outputs = outputs.into_iter();
        match outputs.next() {
            Some(first) => Decoded::ok(first.merge_all(outputs)),
            None => Decoded::ok(value.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn accept_all() -> Validator {
        Validator::from_fn(|value, _| Decoded::ok(value.clone()))
    }

    fn reject(message: &'static str) -> Validator {
        Validator::from_fn(move |_, _| Decoded::error(ValidationError::here(message)))
    }

    fn structural(validator: Validator) -> UnionOption {
        UnionOption {
            validator,
            named: None,
        }
    }

    fn named(name: &str, validator: Validator) -> UnionOption {
        UnionOption {
            validator,
            named: Some(name.to_string()),
        }
    }

    fn tagging(tag: &'static str) -> Validator {
        Validator::from_fn(move |_, _| Decoded::ok(json!(tag)))
    }

    #[test]
    fn test_named_delegates_with_options() {
        let maker = Validator::from_fn(|_, options| Decoded::ok(json!(options.drops_unknown_fields())));
        let validator = NamedValidator::new("Flag", maker);
        assert_eq!(validator.name(), "Flag");
        assert_eq!(
            validator
                .validate(&json!(null), &ValidationOptions::drop_unknown())
                .success(),
            json!(true)
        );
    }

    #[test]
    fn test_union_aggregates_all_failures() {
        let validator = UnionValidator::new(vec![
            structural(reject("first")),
            structural(reject("second")),
        ]);
        let result = validator.validate(&json!(1), &ValidationOptions::default());
        let messages: Vec<_> = result.errors().iter().map(|e| e.error.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
    }

    #[test]
    fn test_union_prefers_single_named_match() {
        let validator = UnionValidator::new(vec![
            structural(tagging("structural")),
            named("Pet", tagging("named")),
            structural(accept_all()),
        ]);
        let result = validator.validate(&json!(1), &ValidationOptions::default());
        assert_eq!(result.success(), json!("named"));
    }

    #[test]
    fn test_union_ambiguous_with_two_named_matches() {
        let validator = UnionValidator::new(vec![
            structural(accept_all()),
            named("Pet", accept_all()),
            named("Pet", accept_all()),
        ]);
        let result = validator.validate(&json!(1), &ValidationOptions::default());
        assert!(result.errors()[0].error.starts_with("multiple options match"));
    }

    #[test]
    fn test_union_single_named_success_without_structural_matches() {
        let validator = UnionValidator::new(vec![
            structural(reject("structural")),
            named("Pet", tagging("named")),
        ]);
        let result = validator.validate(&json!(1), &ValidationOptions::default());
        assert_eq!(result.success(), json!("named"));
    }

    #[test]
    fn test_empty_union_fails() {
        let validator = UnionValidator::new(vec![]);
        assert!(validator
            .validate(&json!(1), &ValidationOptions::default())
            .is_err());
    }

    #[test]
    fn test_intersection_collects_errors_from_every_branch() {
        let validator =
            IntersectionValidator::new(vec![reject("left"), accept_all(), reject("right")]);
        let result = validator.validate(&json!({}), &ValidationOptions::default());
        assert_eq!(result.errors().len(), 2);
    }

    #[test]
    fn test_intersection_later_branch_wins_on_overlap() {
        let validator = IntersectionValidator::new(vec![
            Validator::from_fn(|_, _| Decoded::ok(json!({"a": 1, "b": 1}))),
            Validator::from_fn(|_, _| Decoded::ok(json!({"a": 2}))),
        ]);
        let result = validator.validate(&json!({}), &ValidationOptions::default());
        assert_eq!(result.success(), json!({"a": 2, "b": 1}));
    }
}
