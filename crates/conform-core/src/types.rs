//! Type descriptors: the declarative description of an expected value shape.

use crate::options::ValidationOptions;
use crate::validator::Validator;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Predicate used by other parts of a system to recognise instances of a named type.
pub type IsA = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Core type representation - one arm per supported shape.
#[derive(Debug, Clone)]
pub enum TypeDescriptor {
    /// Reference to a reusable, possibly self-referential named type
    Named(NamedRef),

    /// Exactly one option must accept the value
    Union(Vec<TypeDescriptor>),

    /// Every option must accept the value; outputs are merged
    Intersection(Vec<TypeDescriptor>),

    String(StringType),
    Number(NumberType),
    Integer(NumberType),
    Boolean,
    Null,

    /// One of a fixed set of literal values
    Enum(Vec<Value>),

    Array(ArrayType),
    Object(ObjectType),

    /// Matches any value
    Unknown,
}

impl TypeDescriptor {
    pub fn string() -> Self {
        TypeDescriptor::String(StringType::default())
    }

    pub fn number() -> Self {
        TypeDescriptor::Number(NumberType::default())
    }

    pub fn integer() -> Self {
        TypeDescriptor::Integer(NumberType::default())
    }

    pub fn array(items: TypeDescriptor) -> Self {
        TypeDescriptor::Array(ArrayType::new(items))
    }

    pub fn named(reference: NamedRef) -> Self {
        TypeDescriptor::Named(reference)
    }

    pub fn union(options: impl IntoIterator<Item = TypeDescriptor>) -> Self {
        TypeDescriptor::Union(options.into_iter().collect())
    }

    pub fn intersection(options: impl IntoIterator<Item = TypeDescriptor>) -> Self {
        TypeDescriptor::Intersection(options.into_iter().collect())
    }

    pub fn enumeration(values: impl IntoIterator<Item = Value>) -> Self {
        TypeDescriptor::Enum(values.into_iter().collect())
    }

    /// Short name of the variant, as used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            TypeDescriptor::Named(_) => "named",
            TypeDescriptor::Union(_) => "union",
            TypeDescriptor::Intersection(_) => "intersection",
            TypeDescriptor::String(_) => "string",
            TypeDescriptor::Number(_) => "number",
            TypeDescriptor::Integer(_) => "integer",
            TypeDescriptor::Boolean => "boolean",
            TypeDescriptor::Null => "null",
            TypeDescriptor::Enum(_) => "enum",
            TypeDescriptor::Array(_) => "array",
            TypeDescriptor::Object(_) => "object",
            TypeDescriptor::Unknown => "unknown",
        }
    }

    pub fn is_named(&self) -> bool {
        matches!(self, TypeDescriptor::Named(_))
    }
}

/// String constraints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringType {
    /// Regular expression the value must contain a match for
    pub pattern: Option<String>,
    /// Name of a registered format refinement
    pub format: Option<String>,
}

impl StringType {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }
}

/// Inclusive numeric bounds, shared by `Number` and `Integer`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NumberType {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
}

impl NumberType {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_minimum(mut self, minimum: f64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    pub fn with_maximum(mut self, maximum: f64) -> Self {
        self.maximum = Some(maximum);
        self
    }
}

#[derive(Debug, Clone)]
pub struct ArrayType {
    pub items: Box<TypeDescriptor>,
    pub min_items: Option<usize>,
    pub max_items: Option<usize>,
}

impl ArrayType {
    pub fn new(items: TypeDescriptor) -> Self {
        Self {
            items: Box::new(items),
            min_items: None,
            max_items: None,
        }
    }

    pub fn with_min_items(mut self, min_items: usize) -> Self {
        self.min_items = Some(min_items);
        self
    }

    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = Some(max_items);
        self
    }
}

/// A declared object property.
#[derive(Debug, Clone)]
pub struct PropertySpec {
    pub value: TypeDescriptor,
    pub required: bool,
}

impl PropertySpec {
    pub fn required(value: TypeDescriptor) -> Self {
        Self {
            value,
            required: true,
        }
    }

    pub fn optional(value: TypeDescriptor) -> Self {
        Self {
            value,
            required: false,
        }
    }
}

/// Policy for object keys that are not declared in `properties`.
#[derive(Debug, Clone, Default)]
pub enum AdditionalProperties {
    /// Undeclared keys are rejected, or dropped under the drop policy
    #[default]
    Forbidden,
    /// Undeclared keys are validated against this descriptor
    Schema(Box<TypeDescriptor>),
}

impl AdditionalProperties {
    /// Admit any undeclared key with any value.
    pub fn any() -> Self {
        AdditionalProperties::Schema(Box::new(TypeDescriptor::Unknown))
    }

    pub fn schema(descriptor: TypeDescriptor) -> Self {
        AdditionalProperties::Schema(Box::new(descriptor))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ObjectType {
    pub properties: BTreeMap<String, PropertySpec>,
    pub additional_properties: AdditionalProperties,
}

impl ObjectType {
    /// A closed object with no declared properties.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property(mut self, name: impl Into<String>, spec: PropertySpec) -> Self {
        self.properties.insert(name.into(), spec);
        self
    }

    pub fn required(self, name: impl Into<String>, value: TypeDescriptor) -> Self {
        self.with_property(name, PropertySpec::required(value))
    }

    pub fn optional(self, name: impl Into<String>, value: TypeDescriptor) -> Self {
        self.with_property(name, PropertySpec::optional(value))
    }

    pub fn with_additional_properties(mut self, additional: AdditionalProperties) -> Self {
        self.additional_properties = additional;
        self
    }
}

/// A named type carrying its own validator.
///
/// Only `maker` is used by the engine; `is_a` and `definition` serve other
/// consumers of the descriptor tree.
#[derive(Clone)]
pub struct NamedRef {
    pub name: String,
    pub maker: Validator,
    is_a: Option<IsA>,
    /// Opaque source definition, e.g. the schema fragment the type came from
    pub definition: Value,
}

impl NamedRef {
    pub fn new(name: impl Into<String>, maker: Validator) -> Self {
        Self {
            name: name.into(),
            maker,
            is_a: None,
            definition: Value::Null,
        }
    }

    pub fn with_is_a<F>(mut self, is_a: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.is_a = Some(Arc::new(is_a));
        self
    }

    pub fn with_definition(mut self, definition: Value) -> Self {
        self.definition = definition;
        self
    }

    /// Whether `value` is an instance of this type.
    ///
    /// Falls back to running `maker` with default options.
    pub fn is_a(&self, value: &Value) -> bool {
        match &self.is_a {
            Some(is_a) => is_a(value),
            None => self
                .maker
                .validate(value, &ValidationOptions::default())
                .is_ok(),
        }
    }
}

impl fmt::Debug for NamedRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedRef")
            .field("name", &self.name)
            .field("definition", &self.definition)
            .finish_non_exhaustive()
    }
}

macro_rules! impl_from_payload {
    ($($payload:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$payload> for TypeDescriptor {
                fn from(payload: $payload) -> Self {
                    TypeDescriptor::$variant(payload)
                }
            }
        )*
    };
}

impl_from_payload! {
    StringType => String,
    ArrayType => Array,
    ObjectType => Object,
    NamedRef => Named,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoded::Decoded;
    use serde_json::json;

    #[test]
    fn test_object_builder() {
        let object = ObjectType::new()
            .required("a", TypeDescriptor::number())
            .optional("b", TypeDescriptor::string())
            .with_additional_properties(AdditionalProperties::any());

        assert!(object.properties["a"].required);
        assert!(!object.properties["b"].required);
        assert!(matches!(
            object.additional_properties,
            AdditionalProperties::Schema(ref d) if matches!(**d, TypeDescriptor::Unknown)
        ));
    }

    #[test]
    fn test_kind_names() {
        let descriptor: TypeDescriptor = StringType::new().with_pattern("a+").into();
        assert_eq!(descriptor.kind(), "string");
        assert_eq!(TypeDescriptor::array(TypeDescriptor::Unknown).kind(), "array");
        assert_eq!(
            TypeDescriptor::union([TypeDescriptor::Null, TypeDescriptor::Boolean]).kind(),
            "union"
        );
    }

    #[test]
    fn test_named_is_a_defaults_to_maker() {
        let maker = Validator::from_fn(|value, _| match value {
            Value::String(_) => Decoded::ok(value.clone()),
            other => Decoded::error(crate::ValidationError::type_mismatch("a string", other)),
        });
        let named = NamedRef::new("Name", maker);
        assert!(named.is_a(&json!("x")));
        assert!(!named.is_a(&json!(1)));

        let overridden = named.with_is_a(|_| true);
        assert!(overridden.is_a(&json!(1)));
    }
}
