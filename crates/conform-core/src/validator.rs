//! The validator abstraction shared by compiled descriptors and named types.

use crate::decoded::Decoded;
use crate::error::SchemaError;
use crate::errors::ValidationError;
use crate::options::ValidationOptions;
use serde_json::Value;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Anything that can turn a raw value into a sanitized one.
///
/// Implementations must not mutate shared state, so a single validator can
/// serve many independent calls, including concurrent ones.
pub trait Validate: Send + Sync {
    fn validate(&self, value: &Value, options: &ValidationOptions) -> Decoded<Value>;
}

impl<F> Validate for F
where
    F: Fn(&Value, &ValidationOptions) -> Decoded<Value> + Send + Sync,
{
    fn validate(&self, value: &Value, options: &ValidationOptions) -> Decoded<Value> {
        self(value, options)
    }
}

/// A cheaply clonable, thread-safe handle to a [`Validate`] implementation.
#[derive(Clone)]
pub struct Validator {
    inner: Arc<dyn Validate>,
}

impl Validator {
    pub fn new<V>(validator: V) -> Self
    where
        V: Validate + 'static,
    {
        Self {
            inner: Arc::new(validator),
        }
    }

    /// Wrap a closure as a validator.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&Value, &ValidationOptions) -> Decoded<Value> + Send + Sync + 'static,
    {
        Self::new(f)
    }

    /// Validate with explicit options.
    ///
    /// A failure is guaranteed to carry at least one error, even when the
    /// wrapped implementation returned an empty `Err`.
    pub fn validate(&self, value: &Value, options: &ValidationOptions) -> Decoded<Value> {
        self.inner
            .validate(value, options)
            .or_reason(|| ValidationError::here("value was rejected without a reason"))
    }

    /// Validate with default options.
    pub fn decode(&self, value: &Value) -> Decoded<Value> {
        self.validate(value, &ValidationOptions::default())
    }

    /// Create a placeholder for a named type whose validator is not built yet.
    ///
    /// Self-referential types embed [`DeferredValidator::validator`] in their
    /// own descriptor and resolve it once that descriptor is compiled.
    pub fn deferred(name: impl Into<String>) -> DeferredValidator {
        DeferredValidator {
            name: name.into(),
            slot: Arc::new(OnceLock::new()),
        }
    }
}

impl Validate for Validator {
    fn validate(&self, value: &Value, options: &ValidationOptions) -> Decoded<Value> {
        Validator::validate(self, value, options)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator").finish_non_exhaustive()
    }
}

/// A validator slot filled after construction.
///
/// Resolving creates a reference cycle for recursive types, so the compiled
/// graph lives as long as any handle to it.
#[derive(Debug, Clone)]
pub struct DeferredValidator {
    name: String,
    slot: Arc<OnceLock<Validator>>,
}

impl DeferredValidator {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// A handle that forwards to the resolved target.
    pub fn validator(&self) -> Validator {
        let name = self.name.clone();
        let slot = Arc::clone(&self.slot);
        Validator::from_fn(move |value, options| match slot.get() {
            Some(target) => target.validate(value, options),
            None => Decoded::error(ValidationError::here(format!(
                "named type {} is used before its definition was resolved",
                name
            ))),
        })
    }

    /// Install the target validator. A slot can be resolved only once.
    pub fn resolve(&self, target: Validator) -> Result<(), SchemaError> {
        self.slot.set(target).map_err(|_| SchemaError::AlreadyResolved {
            name: self.name.clone(),
        })
    }

    pub fn is_resolved(&self) -> bool {
        self.slot.get().is_some()
    }
}
