//! Dispatcher: turns a type descriptor tree into a validator.
//!
//! Compilation is eager. Every malformed part of a descriptor (an invalid
//! pattern, inverted bounds) is reported as a [`SchemaError`] before any value
//! is validated; everything else is checked per call.

use crate::combinators::{IntersectionValidator, NamedValidator, UnionOption, UnionValidator};
use crate::formats::FormatRegistry;
use crate::primitives::{
    BooleanValidator, EnumValidator, NullValidator, NumberValidator, StringValidator,
    UnknownValidator,
};
use crate::structural::{ArrayValidator, ObjectValidator, PropertyValidator};
use conform_core::{AdditionalProperties, SchemaError, TypeDescriptor, Validator};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Compiles descriptors against one format registry.
#[derive(Debug, Clone)]
pub struct Compiler {
    formats: Arc<FormatRegistry>,
}

impl Default for Compiler {
    /// A compiler reading the process-wide format registry.
    fn default() -> Self {
        Self::with_registry(FormatRegistry::global())
    }
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(formats: Arc<FormatRegistry>) -> Self {
        Self { formats }
    }

    pub fn formats(&self) -> &Arc<FormatRegistry> {
        &self.formats
    }

    /// Compile `descriptor` into a reusable validator.
    pub fn compile(&self, descriptor: &TypeDescriptor) -> Result<Validator, SchemaError> {
        tracing::debug!(kind = descriptor.kind(), "compiling type descriptor");
        self.compile_node(descriptor)
    }

    fn compile_node(&self, descriptor: &TypeDescriptor) -> Result<Validator, SchemaError> {
        let validator = match descriptor {
            TypeDescriptor::Named(reference) => {
                Validator::new(NamedValidator::new(&reference.name, reference.maker.clone()))
            }
            TypeDescriptor::Union(options) => {
                let options = options
                    .iter()
                    .map(|option| {
                        Ok(UnionOption {
                            validator: self.compile_node(option)?,
                            named: match option {
                                TypeDescriptor::Named(reference) => Some(reference.name.clone()),
                                _ => None,
                            },
                        })
                    })
                    .collect::<Result<Vec<_>, SchemaError>>()?;
                Validator::new(UnionValidator::new(options))
            }
            TypeDescriptor::Intersection(options) => {
                let options = options
                    .iter()
                    .map(|option| self.compile_node(option))
                    .collect::<Result<Vec<_>, _>>()?;
                Validator::new(IntersectionValidator::new(options))
            }
            TypeDescriptor::String(ty) => {
                Validator::new(StringValidator::new(ty, Arc::clone(&self.formats))?)
            }
            TypeDescriptor::Number(bounds) => Validator::new(NumberValidator::number(*bounds)?),
            TypeDescriptor::Integer(bounds) => Validator::new(NumberValidator::integer(*bounds)?),
            TypeDescriptor::Boolean => Validator::new(BooleanValidator),
            TypeDescriptor::Null => Validator::new(NullValidator),
            TypeDescriptor::Enum(values) => Validator::new(EnumValidator::new(values.clone())),
            TypeDescriptor::Array(array) => Validator::new(ArrayValidator::new(
                self.compile_node(&array.items)?,
                array.min_items,
                array.max_items,
            )?),
            TypeDescriptor::Object(object) => {
                let mut properties = BTreeMap::new();
                for (name, property) in &object.properties {
                    properties.insert(
                        name.clone(),
                        PropertyValidator {
                            validator: self.compile_node(&property.value)?,
                            required: property.required,
                        },
                    );
                }
                let additional = match &object.additional_properties {
                    AdditionalProperties::Forbidden => None,
                    AdditionalProperties::Schema(schema) => Some(self.compile_node(schema)?),
                };
                Validator::new(ObjectValidator::new(properties, additional))
            }
            TypeDescriptor::Unknown => Validator::new(UnknownValidator),
        };
        Ok(validator)
    }
}

/// Compile `descriptor` with the process-wide format registry.
pub fn compile(descriptor: &TypeDescriptor) -> Result<Validator, SchemaError> {
    Compiler::default().compile(descriptor)
}
