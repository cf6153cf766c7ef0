//! Typed models for the explorer form.

use serde::{Deserialize, Serialize};

use dataq_core::query::FieldValues;

/// Kind of form control a field value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    /// Free-text input
    Text,
    /// Radio button group (the selected member)
    Radio,
    /// Hidden input
    Hidden,
}

/// One successful form control: name, current value, control kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    /// The control's name attribute; becomes the query parameter key.
    pub name: String,
    /// The control's current value.
    pub value: String,
    /// The control kind.
    pub kind: FieldKind,
}

impl FormField {
    /// Create a text field.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            kind: FieldKind::Text,
        }
    }

    /// Create a selected radio field.
    #[must_use]
    pub fn radio(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            kind: FieldKind::Radio,
        }
    }

    /// Create a hidden field.
    #[must_use]
    pub fn hidden(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            kind: FieldKind::Hidden,
        }
    }
}

/// All successful form controls, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSnapshot {
    /// The controls as read from the form.
    pub fields: Vec<FormField>,
}

impl FormSnapshot {
    /// Create a snapshot from a list of controls.
    #[must_use]
    pub fn new(fields: Vec<FormField>) -> Self {
        Self { fields }
    }

    /// Look up the current text of a named field.
    #[must_use]
    pub fn field_text(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    /// Reduce the snapshot to non-empty field values.
    ///
    /// Values are kept verbatim; a field whose trimmed value is empty is
    /// dropped. A name appearing more than once keeps its first position
    /// with the later value.
    #[must_use]
    pub fn field_values(&self) -> FieldValues {
        self.fields
            .iter()
            .filter(|f| !f.value.trim().is_empty())
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect()
    }
}

/// A qualifying form event that triggers a rebuild of the preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// The page finished loading with the form present.
    Ready,
    /// A text field changed.
    TextChanged(String),
    /// A key was released inside a text field.
    KeyUp(String),
    /// A radio button was clicked.
    RadioClicked(String),
}

/// Enablement policy for the result-limit field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitPolicy {
    /// Field is disabled and pinned to the given value (html format).
    Locked {
        /// The pinned value.
        value: u32,
    },
    /// Field is enabled for user input.
    Unlocked,
}

/// Policy for the jsonp callback field and its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackPolicy {
    /// Container shown, input enabled (jsonp selected).
    Visible,
    /// Container hidden, input disabled and cleared.
    Hidden,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_values_drops_blank_fields() {
        let snapshot = FormSnapshot::new(vec![
            FormField::text("select", "a, b"),
            FormField::text("where", "   "),
            FormField::text("group", ""),
            FormField::radio("$format", "json"),
        ]);

        let values = snapshot.field_values();
        assert_eq!(values.len(), 2);
        assert_eq!(values.get("select"), Some("a, b"));
        assert_eq!(values.get("$format"), Some("json"));
        assert_eq!(values.get("where"), None);
    }

    #[test]
    fn field_values_keeps_values_verbatim() {
        let snapshot = FormSnapshot::new(vec![FormField::text("where", " total > 100 ")]);
        // Trimming decides presence only; the serialized value is untouched.
        assert_eq!(snapshot.field_values().get("where"), Some(" total > 100 "));
    }

    #[test]
    fn field_values_preserves_document_order() {
        let snapshot = FormSnapshot::new(vec![
            FormField::text("where", "b"),
            FormField::text("select", "a"),
        ]);

        let field_values = snapshot.field_values();
        let order: Vec<&str> = field_values.iter().map(|(n, _)| n).collect();
        assert_eq!(order, vec!["where", "select"]);
    }

    #[test]
    fn duplicate_names_keep_first_position_with_later_value() {
        let snapshot = FormSnapshot::new(vec![
            FormField::text("select", "a"),
            FormField::text("where", "w"),
            FormField::text("select", "b"),
        ]);

        let values = snapshot.field_values();
        let collected: Vec<(&str, &str)> = values.iter().collect();
        assert_eq!(collected, vec![("select", "b"), ("where", "w")]);
    }

    #[test]
    fn field_text_finds_named_field() {
        let snapshot = FormSnapshot::new(vec![FormField::text("select", "a")]);
        assert_eq!(snapshot.field_text("select"), Some("a"));
        assert_eq!(snapshot.field_text("missing"), None);
    }

    #[test]
    fn snapshot_serde_round_trip() {
        let snapshot = FormSnapshot::new(vec![
            FormField::text("select", "a"),
            FormField::radio("$format", "json"),
            FormField::hidden("token", "t"),
        ]);

        let json = serde_json::to_string(&snapshot).unwrap();
        let deserialized: FormSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, deserialized);
    }
}
