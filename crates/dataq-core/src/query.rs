//! Field-value collection and request-URL synthesis.
//!
//! This module turns the current state of the explorer form into the REST
//! request it stands for: a base href plus output-format extension, followed
//! by the remaining fields serialized as a query string.

use std::str::FromStr;

use crate::types::{OutputFormat, RESERVED_FORMAT_FIELD};

/// Ordered collection of non-empty form field values.
///
/// Field order is preserved as read from the form; writing a name that is
/// already present updates the value in place without moving it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldValues {
    entries: Vec<(String, String)>,
}

impl FieldValues {
    /// Create a new, empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert a field value, overwriting in place when the name exists.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Remove a field by name, returning its value when present.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Look up a field value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if no fields are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of fields present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over the fields in form order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for FieldValues {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut values = Self::new();
        for (name, value) in iter {
            values.insert(name, value);
        }
        values
    }
}

/// Encode a single parameter value for the query string.
///
/// Uses form-urlencoded serialization: spaces become `+` (never `%20`) and
/// reserved characters such as the comma are percent-encoded.
#[must_use]
pub fn encode_component(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// A synthesized request URL: submission action plus serialized parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryUrl {
    action: String,
    params: Vec<String>,
}

impl QueryUrl {
    /// Synthesize the request URL for a set of form field values.
    ///
    /// The reserved format field is extracted (defaulting to `html` when it
    /// is absent or blank) and removed from the set; the remaining fields
    /// are serialized as `name=value` pairs in form order.
    #[must_use]
    pub fn synthesize(base_href: &str, fields: FieldValues) -> Self {
        Self::synthesize_with_default(base_href, fields, OutputFormat::default())
    }

    /// Synthesize with a caller-provided fallback format for an absent or
    /// blank reserved field.
    #[must_use]
    pub fn synthesize_with_default(
        base_href: &str,
        mut fields: FieldValues,
        default_format: OutputFormat,
    ) -> Self {
        let format = fields
            .remove(RESERVED_FORMAT_FIELD)
            .and_then(|raw| OutputFormat::from_str(&raw).ok())
            .unwrap_or(default_format);

        let action = format!("{base_href}.{}", format.extension());
        let params = fields
            .iter()
            .map(|(name, value)| format!("{name}={}", encode_component(value)))
            .collect();

        Self { action, params }
    }

    /// The form submission target: base href plus format extension.
    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Returns true if any query parameters are present.
    #[must_use]
    pub fn has_params(&self) -> bool {
        !self.params.is_empty()
    }

    /// The serialized query string, when any parameters are present.
    #[must_use]
    pub fn query_string(&self) -> Option<String> {
        if self.params.is_empty() {
            None
        } else {
            Some(self.params.join("&"))
        }
    }

    /// The canonical preview string: the action alone when no parameters
    /// are present, otherwise `action?query`.
    ///
    /// This exact string keys the saved-query registry.
    #[must_use]
    pub fn preview(&self) -> String {
        match self.query_string() {
            Some(query) => format!("{}?{}", self.action, query),
            None => self.action.clone(),
        }
    }

    /// Rendering of the preview with a line break after each `&`.
    #[must_use]
    pub fn display(&self) -> String {
        if self.params.is_empty() {
            self.action.clone()
        } else {
            format!("{}?{}", self.action, self.params.join("&\n"))
        }
    }
}
