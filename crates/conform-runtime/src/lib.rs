//! Conform Runtime
//!
//! Compiles [`TypeDescriptor`] trees into reusable validators and runs them
//! against loosely-typed JSON values:
//!
//! - **Dispatcher**: [`Compiler`] / [`compile`] map each descriptor to its validator
//! - **Formats**: a [`FormatRegistry`] of named string refinements
//! - **Validators**: primitives, arrays and objects, named references, unions, intersections
//! - **Typed decoding**: [`DecodeAs`] validates and deserializes in one step
//!
//! # Example
//!
//! ```rust
//! use conform_runtime::{compile, ObjectType, TypeDescriptor, ValidationOptions};
//! use serde_json::json;
//!
//! let descriptor = TypeDescriptor::Object(
//!     ObjectType::new().required("a", TypeDescriptor::number()),
//! );
//! let validator = compile(&descriptor).expect("descriptor compiles");
//!
//! let decoded = validator.validate(&json!({"a": 1, "extra": true}), &ValidationOptions::drop_unknown());
//! assert_eq!(decoded.success(), json!({"a": 1}));
//! ```

pub mod combinators;
pub mod compile;
pub mod formats;
pub mod merge;
pub mod primitives;
pub mod structural;
pub mod typed;

pub use compile::{compile, Compiler};
pub use formats::{register_format, FormatRegistry, FormatValidator};
pub use merge::Merge;
pub use typed::DecodeAs;

pub use conform_core::{
    AdditionalProperties, ArrayType, Decoded, DeferredValidator, NamedRef, NumberType,
    ObjectType, PathSegment, PropertySpec, SchemaError, StringType, TypeDescriptor,
    UnknownFieldPolicy, Validate, ValidationError, ValidationErrors, ValidationOptions, Validator,
};
