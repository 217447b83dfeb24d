use thiserror::Error;

/// Errors raised while turning a type descriptor into a validator.
///
/// These describe a broken descriptor, never bad input data, and are
/// reported before any value is validated.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("pattern for 'type: string' is not valid: Invalid regular expression: /{pattern}/: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("bounds for 'type: {type_name}' are not valid: {detail}")]
    InvalidBounds {
        type_name: &'static str,
        detail: String,
    },

    #[error("deferred validator for named type '{name}' was already resolved")]
    AlreadyResolved { name: String },
}

impl SchemaError {
    pub fn invalid_bounds(type_name: &'static str, detail: impl Into<String>) -> Self {
        SchemaError::InvalidBounds {
            type_name,
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pattern_display() {
        let source = regex::Regex::new("\\").unwrap_err();
        let error = SchemaError::InvalidPattern {
            pattern: "\\".to_string(),
            source,
        };
        let display = error.to_string();
        assert!(display.starts_with(
            "pattern for 'type: string' is not valid: Invalid regular expression: /\\/"
        ));
    }

    #[test]
    fn test_invalid_bounds_display() {
        let error = SchemaError::invalid_bounds("array", "minItems 4 exceeds maxItems 2");
        assert_eq!(
            error.to_string(),
            "bounds for 'type: array' are not valid: minItems 4 exceeds maxItems 2"
        );
    }
}
