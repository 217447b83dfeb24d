//! String format registry.
//!
//! A format is a named refinement check for strings, e.g. `uuid` or
//! `date-time`. Formats are gates: a registered check can only accept or
//! reject a string, never replace it.
//!
//! Registration is meant to happen while an application starts up, before
//! validation traffic begins. Lookups are safe from any number of threads;
//! registering while validations are in flight is not guaranteed to be
//! observed consistently by those validations.

use conform_core::Decoded;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// A registered format check.
pub type FormatValidator = Arc<dyn Fn(&str) -> Decoded<()> + Send + Sync>;

/// Map from format name to its check.
#[derive(Default)]
pub struct FormatRegistry {
    formats: RwLock<HashMap<String, FormatValidator>>,
}

impl FormatRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry used by `Compiler::default()`.
    pub fn global() -> Arc<FormatRegistry> {
        static GLOBAL: OnceLock<Arc<FormatRegistry>> = OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(FormatRegistry::new())))
    }

    /// Register `check` under `name`. The last registration for a name wins.
    pub fn register<F>(&self, name: impl Into<String>, check: F)
    where
        F: Fn(&str) -> Decoded<()> + Send + Sync + 'static,
    {
        let name = name.into();
        let mut formats = self.formats.write().unwrap_or_else(PoisonError::into_inner);
        if formats.insert(name.clone(), Arc::new(check)).is_some() {
            tracing::debug!(format_name = %name, "replaced string format");
        } else {
            tracing::debug!(format_name = %name, "registered string format");
        }
    }

    pub fn get(&self, name: &str) -> Option<FormatValidator> {
        self.formats
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.formats
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.formats
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registered format names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .formats
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

impl fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatRegistry")
            .field("formats", &self.names())
            .finish()
    }
}

/// Register a format in the process-wide registry.
pub fn register_format<F>(name: impl Into<String>, check: F)
where
    F: Fn(&str) -> Decoded<()> + Send + Sync + 'static,
{
    FormatRegistry::global().register(name, check);
}

#[cfg(test)]
mod tests {
    use super::*;
    use conform_core::ValidationError;

    #[test]
    fn test_registry_starts_empty() {
        let registry = FormatRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get("uuid").is_none());
    }

    #[test]
    fn test_last_registration_wins() {
        let registry = FormatRegistry::new();
        registry.register("even", |_| Decoded::error(ValidationError::here("first")));
        registry.register("even", |_| Decoded::ok(()));

        assert_eq!(registry.len(), 1);
        let check = registry.get("even").unwrap();
        assert!(check("x").is_ok());
    }

    #[test]
    fn test_global_registry_is_shared() {
        register_format("formats-test-shared", |_| Decoded::ok(()));
        assert!(FormatRegistry::global().contains("formats-test-shared"));
    }

    #[test]
    fn test_names_sorted() {
        let registry = FormatRegistry::new();
        registry.register("uuid", |_| Decoded::ok(()));
        registry.register("email", |_| Decoded::ok(()));
        assert_eq!(registry.names(), vec!["email".to_string(), "uuid".to_string()]);
    }
}
