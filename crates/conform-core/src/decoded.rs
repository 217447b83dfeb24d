//! The result of decoding a value.

use crate::errors::{PathSegment, ValidationError, ValidationErrors};

/// Outcome of validating a raw value: the sanitized value, or the errors
/// that prevented it from conforming.
///
/// An `Err` always carries at least one [`ValidationError`].
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded<T> {
    Ok(T),
    Err(ValidationErrors),
}

impl<T> Decoded<T> {
    pub fn ok(value: T) -> Self {
        Decoded::Ok(value)
    }

    /// Fail with a single error.
    pub fn error(error: ValidationError) -> Self {
        Decoded::Err(ValidationErrors::from_error(error))
    }

    /// Fail with the collected errors.
    ///
    /// # Panics
    ///
    /// Panics if `errors` is empty: a failure without a reason would break
    /// every consumer that reports errors.
    pub fn errors_from(errors: ValidationErrors) -> Self {
        assert!(
            !errors.is_empty(),
            "a failed decode must carry at least one validation error"
        );
        Decoded::Err(errors)
    }

    /// Succeed with `value` when nothing was collected, fail otherwise.
    pub fn from_parts(value: T, errors: ValidationErrors) -> Self {
        if errors.is_empty() {
            Decoded::Ok(value)
        } else {
            Decoded::Err(errors)
        }
    }

    /// Replace a failure that carries no errors with `reason()`.
    ///
    /// Results built outside the engine can hold an empty `Err`; merged into
    /// an enclosing object or array, such a failure would vanish.
    pub fn or_reason<F>(self, reason: F) -> Self
    where
        F: FnOnce() -> ValidationError,
    {
        match self {
            Decoded::Err(errors) if errors.is_empty() => Decoded::error(reason()),
            other => other,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Decoded::Ok(_))
    }

    pub fn is_err(&self) -> bool {
        matches!(self, Decoded::Err(_))
    }

    /// The validated value.
    ///
    /// # Panics
    ///
    /// Panics with the collected errors when called on a failed result.
    #[track_caller]
    pub fn success(self) -> T {
        match self {
            Decoded::Ok(value) => value,
            Decoded::Err(errors) => panic!("success() called on a failed decode: {}", errors),
        }
    }

    /// Borrow the validated value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Decoded::Ok(value) => Some(value),
            Decoded::Err(_) => None,
        }
    }

    /// The errors of a failed result; empty on success.
    pub fn errors(&self) -> &[ValidationError] {
        match self {
            Decoded::Ok(_) => &[],
            Decoded::Err(errors) => errors.as_slice(),
        }
    }

    pub fn into_ok(self) -> Option<T> {
        match self {
            Decoded::Ok(value) => Some(value),
            Decoded::Err(_) => None,
        }
    }

    pub fn map<U, F>(self, f: F) -> Decoded<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Decoded::Ok(value) => Decoded::Ok(f(value)),
            Decoded::Err(errors) => Decoded::Err(errors),
        }
    }

    pub fn and_then<U, F>(self, f: F) -> Decoded<U>
    where
        F: FnOnce(T) -> Decoded<U>,
    {
        match self {
            Decoded::Ok(value) => f(value),
            Decoded::Err(errors) => Decoded::Err(errors),
        }
    }

    /// Move the errors of a failed result one level down under `segment`.
    pub fn with_path_prefix(self, segment: impl Into<PathSegment>) -> Self {
        match self {
            Decoded::Ok(value) => Decoded::Ok(value),
            Decoded::Err(errors) => Decoded::Err(errors.with_path_prefix(segment)),
        }
    }

    pub fn into_result(self) -> Result<T, ValidationErrors> {
        self.into()
    }
}

impl<T> From<Decoded<T>> for Result<T, ValidationErrors> {
    fn from(decoded: Decoded<T>) -> Self {
        match decoded {
            Decoded::Ok(value) => Ok(value),
            Decoded::Err(errors) => Err(errors),
        }
    }
}
