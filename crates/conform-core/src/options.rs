//! Per-call validation options.

use serde::{Deserialize, Serialize};

/// What to do with object keys that are neither declared nor admitted by
/// `additionalProperties`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownFieldPolicy {
    /// Reject the value with an error naming the key.
    #[default]
    Fail,
    /// Omit the key from the output without validating its value.
    Drop,
}

/// Options for one top-level validation call.
///
/// The same options reach every nested validation performed while
/// processing that call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationOptions {
    pub unknown_field: UnknownFieldPolicy,
}

impl ValidationOptions {
    pub fn fail_unknown() -> Self {
        Self {
            unknown_field: UnknownFieldPolicy::Fail,
        }
    }

    pub fn drop_unknown() -> Self {
        Self {
            unknown_field: UnknownFieldPolicy::Drop,
        }
    }

    pub fn drops_unknown_fields(&self) -> bool {
        self.unknown_field == UnknownFieldPolicy::Drop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fails_unknown_fields() {
        assert_eq!(ValidationOptions::default(), ValidationOptions::fail_unknown());
        assert!(!ValidationOptions::default().drops_unknown_fields());
    }

    #[test]
    fn test_deserialize_wire_names() {
        let options: ValidationOptions =
            serde_json::from_str(r#"{ "unknownField": "drop" }"#).unwrap();
        assert!(options.drops_unknown_fields());

        let options: ValidationOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options.unknown_field, UnknownFieldPolicy::Fail);

        assert!(serde_json::from_str::<ValidationOptions>(r#"{ "unknownField": "keep" }"#).is_err());
    }
}
