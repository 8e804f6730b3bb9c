use indexmap::IndexMap;

/// Maps extended string formats to the canonical predicate each generated
/// validator calls. The mapping is an explicit static table — the validator
/// identifier is data, never recovered from function metadata at runtime.
///
/// Temporal formats (`date`, `date-time`) are not registered here; the
/// resolver maps those to the temporal host type before formats are
/// consulted.
#[derive(Debug, Clone)]
pub struct FormatRegistry {
    validators: IndexMap<String, String>,
}

impl FormatRegistry {
    /// An empty registry; every format passes through inertly.
    pub fn empty() -> Self {
        FormatRegistry {
            validators: IndexMap::new(),
        }
    }

    /// The default table, mirroring the common named string formats backed
    /// by `oxgen_support::format`.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        for (format, predicate) in [
            ("email", "is_email"),
            ("uuid", "is_uuid"),
            ("uri", "is_uri"),
            ("url", "is_uri"),
            ("hostname", "is_hostname"),
            ("ipv4", "is_ipv4"),
            ("ipv6", "is_ipv6"),
            ("mac", "is_mac"),
            ("creditcard", "is_credit_card"),
            ("isbn10", "is_isbn10"),
            ("isbn13", "is_isbn13"),
        ] {
            registry.register(format, format!("oxgen_support::format::{predicate}"));
        }
        registry
    }

    pub fn register(&mut self, format: impl Into<String>, predicate_path: impl Into<String>) {
        self.validators.insert(format.into(), predicate_path.into());
    }

    /// Does this format have an extended predicate?
    pub fn contains(&self, format: &str) -> bool {
        self.validators.contains_key(format)
    }

    /// The stable identifier of the predicate for `format`.
    pub fn validator_path(&self, format: &str) -> Option<&str> {
        self.validators.get(format).map(String::as_str)
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let registry = FormatRegistry::with_defaults();
        assert!(registry.contains("email"));
        assert_eq!(
            registry.validator_path("email"),
            Some("oxgen_support::format::is_email")
        );
        assert!(!registry.contains("date-time"));
        assert!(!registry.contains("no-such-format"));
    }

    #[test]
    fn test_custom_registration() {
        let mut registry = FormatRegistry::empty();
        assert!(!registry.contains("email"));
        registry.register("ticker", "myapp::format::is_ticker");
        assert_eq!(
            registry.validator_path("ticker"),
            Some("myapp::format::is_ticker")
        );
    }
}
