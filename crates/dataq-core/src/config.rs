//! Configuration structures for the explorer.
//!
//! This module provides the configuration handed to a query-form controller
//! at construction time: the request base href, the page the controller is
//! mounted on, format and limit defaults, and typeahead tuning.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{Error, Result};
use crate::page::PageKey;
use crate::types::{OutputFormat, DEFAULT_HTML_LIMIT};

/// Configuration for one mounted query form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExplorerConfig {
    /// Base href the request URL is built from (the form's data target)
    #[validate(length(min = 1))]
    pub base_href: String,

    /// Path of the page the form lives on; namespaces saved queries
    #[validate(length(min = 1))]
    pub page_path: String,

    /// Output format assumed when the reserved field is absent or blank
    #[serde(default)]
    pub default_format: OutputFormat,

    /// Result limit pinned while the html format is selected
    #[validate(range(min = 1, max = 10000))]
    #[serde(default = "default_html_limit")]
    pub html_limit: u32,

    /// Typeahead tuning
    #[validate(nested)]
    #[serde(default)]
    pub typeahead: TypeaheadConfig,
}

const fn default_html_limit() -> u32 {
    DEFAULT_HTML_LIMIT
}

impl ExplorerConfig {
    /// Create a new configuration with required parameters.
    ///
    /// # Arguments
    ///
    /// * `base_href` - Base href of the data endpoint (e.g. `/api/query`)
    /// * `page_path` - Path of the page the form lives on
    ///
    /// # Errors
    ///
    /// Returns an error if the base href is malformed or validation fails.
    pub fn new(base_href: impl Into<String>, page_path: impl Into<String>) -> Result<Self> {
        let config = Self {
            base_href: base_href.into(),
            page_path: page_path.into(),
            default_format: OutputFormat::default(),
            html_limit: default_html_limit(),
            typeahead: TypeaheadConfig::default(),
        };

        config.check_base_href()?;
        config
            .validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))?;

        Ok(config)
    }

    /// Set the default output format.
    #[must_use]
    pub fn with_default_format(mut self, format: OutputFormat) -> Self {
        self.default_format = format;
        self
    }

    /// Set the pinned html result limit.
    #[must_use]
    pub const fn with_html_limit(mut self, limit: u32) -> Self {
        self.html_limit = limit;
        self
    }

    /// Set the typeahead tuning.
    #[must_use]
    pub const fn with_typeahead(mut self, typeahead: TypeaheadConfig) -> Self {
        self.typeahead = typeahead;
        self
    }

    /// Derive the storage key that namespaces this page's saved queries.
    ///
    /// # Errors
    ///
    /// Returns an error when the page path is empty.
    pub fn page_key(&self) -> Result<PageKey> {
        PageKey::from_path(&self.page_path)
    }

    /// Check the base href shape beyond plain length validation.
    ///
    /// The href must be an absolute path and must not already end in a dot,
    /// since the output-format extension is appended with one.
    fn check_base_href(&self) -> Result<()> {
        if !self.base_href.starts_with('/') {
            return Err(Error::InvalidBaseHref(format!(
                "base href must start with '/': {}",
                self.base_href
            )));
        }
        if self.base_href.ends_with('.') {
            return Err(Error::InvalidBaseHref(format!(
                "base href must not end with '.': {}",
                self.base_href
            )));
        }
        Ok(())
    }
}

/// Tuning for the typeahead suggestion policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct TypeaheadConfig {
    /// Minimum input length before suggestions are offered
    #[validate(range(min = 1, max = 16))]
    #[serde(default = "default_min_length")]
    pub min_length: usize,

    /// Maximum number of suggestions offered at once
    #[validate(range(min = 1, max = 50))]
    #[serde(default = "default_max_items")]
    pub max_items: usize,
}

const fn default_min_length() -> usize {
    1
}

const fn default_max_items() -> usize {
    5
}

impl TypeaheadConfig {
    /// Create a new typeahead configuration with defaults.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min_length: default_min_length(),
            max_items: default_max_items(),
        }
    }

    /// Set the minimum input length.
    #[must_use]
    pub const fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// Set the maximum number of suggestions.
    #[must_use]
    pub const fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }
}

impl Default for TypeaheadConfig {
    fn default() -> Self {
        Self::new()
    }
}
