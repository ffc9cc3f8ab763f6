//! Quoting configuration.

use crate::buffer::Fallback;

/// Schema used by [`crate::quote_fqident`] when a name has none.
pub const DEFAULT_SCHEMA: &str = "public";

/// Configuration for a [`crate::Quoter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteConfig {
    /// Whether plain `'...'` literals follow `standard_conforming_strings`,
    /// i.e. backslashes in them are not escapes.
    pub standard_conforming_strings: bool,

    /// Schema prepended to unqualified names.
    pub default_schema: String,

    /// Whether values that are neither text nor bytes may be stringified.
    pub fallback: Fallback,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            standard_conforming_strings: false,
            default_schema: DEFAULT_SCHEMA.to_string(),
            fallback: Fallback::Allowed,
        }
    }
}

impl QuoteConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether plain literals use standard string semantics.
    #[must_use]
    pub const fn standard_conforming_strings(mut self, value: bool) -> Self {
        self.standard_conforming_strings = value;
        self
    }

    /// Sets the schema used for unqualified names.
    #[must_use]
    pub fn default_schema(mut self, schema: impl Into<String>) -> Self {
        self.default_schema = schema.into();
        self
    }

    /// Sets whether non-text values may be stringified.
    #[must_use]
    pub const fn fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }
}
