//! Core data model for the conform decoding engine.
//!
//! This crate defines what the engine consumes and produces:
//!
//! - **Type descriptors**: an immutable tree describing an expected shape
//! - **Validators**: the shareable [`Validator`] handle and the [`Validate`] trait
//! - **Decode results**: [`Decoded`] with path-qualified [`ValidationError`]s
//! - **Schema errors**: [`SchemaError`] for descriptors that cannot be compiled
//!
//! Compiling descriptors into validators lives in `conform-runtime`.

pub mod decoded;
pub mod error;
pub mod errors;
pub mod options;
pub mod types;
pub mod validator;

pub use decoded::Decoded;
pub use error::SchemaError;
pub use errors::{format_path, PathSegment, ValidationError, ValidationErrors};
pub use options::{UnknownFieldPolicy, ValidationOptions};
pub use types::{
    AdditionalProperties, ArrayType, IsA, NamedRef, NumberType, ObjectType, PropertySpec,
    StringType, TypeDescriptor,
};
pub use validator::{DeferredValidator, Validate, Validator};
