//! Decoding straight into Rust types.

use conform_core::{Decoded, PathSegment, ValidationError, ValidationOptions, Validator};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Validate a raw value, then deserialize the sanitized result.
pub trait DecodeAs {
    fn decode_as<T>(&self, value: &Value, options: &ValidationOptions) -> Decoded<T>
    where
        T: DeserializeOwned;
}

impl DecodeAs for Validator {
    fn decode_as<T>(&self, value: &Value, options: &ValidationOptions) -> Decoded<T>
    where
        T: DeserializeOwned,
    {
        self.validate(value, options).and_then(deserialize_with_path)
    }
}

/// Deserialize with the failing path recorded in the error.
pub fn deserialize_with_path<T>(value: Value) -> Decoded<T>
where
    T: DeserializeOwned,
{
    match serde_path_to_error::deserialize::<_, T>(value) {
        Ok(decoded) => Decoded::ok(decoded),
        Err(err) => {
            let path = err
                .path()
                .iter()
                .filter_map(|segment| match segment {
                    serde_path_to_error::Segment::Seq { index } => Some(PathSegment::Index(*index)),
                    serde_path_to_error::Segment::Map { key } => Some(PathSegment::Key(key.clone())),
                    _ => None,
                })
                .collect();
            Decoded::error(ValidationError::new(path, err.into_inner().to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::compile;
    use conform_core::{ObjectType, TypeDescriptor};
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Pet {
        name: String,
        tags: Vec<String>,
    }

    fn pet_validator() -> Validator {
        compile(&TypeDescriptor::Object(
            ObjectType::new()
                .required("name", TypeDescriptor::string())
                .required("tags", TypeDescriptor::array(TypeDescriptor::string())),
        ))
        .unwrap()
    }

    #[test]
    fn test_decode_as_struct() {
        let pet: Pet = pet_validator()
            .decode_as(
                &json!({"name": "rex", "tags": ["dog"], "owner": "x"}),
                &ValidationOptions::drop_unknown(),
            )
            .success();
        assert_eq!(
            pet,
            Pet {
                name: "rex".to_string(),
                tags: vec!["dog".to_string()],
            }
        );
    }

    #[test]
    fn test_validation_errors_come_first() {
        let result = pet_validator()
            .decode_as::<Pet>(&json!({"name": 1, "tags": []}), &ValidationOptions::default());
        assert_eq!(result.errors()[0].path, vec![PathSegment::from("name")]);
    }

    #[test]
    fn test_deserialize_error_carries_path() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Strict {
            tags: Vec<u8>,
        }

        let result = deserialize_with_path::<Strict>(json!({"tags": [1, "x"]}));
        assert_eq!(
            result.errors()[0].path,
            vec![PathSegment::from("tags"), PathSegment::Index(1)]
        );
    }
}
