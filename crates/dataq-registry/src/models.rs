//! Persisted saved-query records and their rendered forms.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One saved query: the user-chosen label plus when it was saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedQueryRecord {
    /// Display name supplied at save time.
    pub name: String,
    /// When the query was saved.
    pub saved_at: DateTime<Utc>,
}

impl SavedQueryRecord {
    /// Create a record stamped with the current time.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            saved_at: Utc::now(),
        }
    }
}

/// The full persisted registry document for one page.
///
/// Keys are exact query strings, including their encoded parameters. The
/// document is loaded lazily with an empty default and rewritten in full on
/// every mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedQueries {
    entries: BTreeMap<String, SavedQueryRecord>,
}

impl SavedQueries {
    /// Create an empty registry document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when no queries are saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of saved queries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the exact query string is saved.
    #[must_use]
    pub fn contains(&self, query: &str) -> bool {
        self.entries.contains_key(query)
    }

    /// Look up the record saved under a query string.
    #[must_use]
    pub fn get(&self, query: &str) -> Option<&SavedQueryRecord> {
        self.entries.get(query)
    }

    /// Save a record under a query string, replacing any previous record.
    pub fn insert(&mut self, query: impl Into<String>, record: SavedQueryRecord) {
        self.entries.insert(query.into(), record);
    }

    /// Remove the record saved under a query string, if any.
    pub fn remove(&mut self, query: &str) -> Option<SavedQueryRecord> {
        self.entries.remove(query)
    }

    /// Render the registry as links, ordered by label then query string.
    #[must_use]
    pub fn links(&self) -> Vec<SavedQueryLink> {
        let mut links: Vec<SavedQueryLink> = self
            .entries
            .iter()
            .map(|(query, record)| SavedQueryLink {
                query: query.clone(),
                label: record.name.clone(),
            })
            .collect();
        links.sort_by(|a, b| a.label.cmp(&b.label).then_with(|| a.query.cmp(&b.query)));
        links
    }
}

/// One registry entry rendered for display: a link to the query string,
/// labeled by its saved name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedQueryLink {
    /// The exact query string the entry was saved under.
    pub query: String,
    /// The display label.
    pub label: String,
}

/// Which of the save/forget affordances the page should show.
///
/// Exactly one of the two is visible at a time: forget when the current
/// preview string is already saved, save otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionVisibility {
    /// Show the save affordance.
    pub show_save: bool,
    /// Show the forget affordance.
    pub show_forget: bool,
}

impl ActionVisibility {
    /// Visibility for a query that is already saved.
    #[must_use]
    pub const fn saved() -> Self {
        Self {
            show_save: false,
            show_forget: true,
        }
    }

    /// Visibility for a query that is not saved.
    #[must_use]
    pub const fn unsaved() -> Self {
        Self {
            show_save: true,
            show_forget: false,
        }
    }

    /// Visibility for a given saved state.
    #[must_use]
    pub const fn for_saved_state(saved: bool) -> Self {
        if saved {
            Self::saved()
        } else {
            Self::unsaved()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_contains_use_exact_query_strings() {
        let mut queries = SavedQueries::new();
        queries.insert(
            "/api/query.json?select=a%2C+b",
            SavedQueryRecord::new("Revenue"),
        );

        assert!(queries.contains("/api/query.json?select=a%2C+b"));
        assert!(!queries.contains("/api/query.json?select=a,+b"));
        assert_eq!(queries.len(), 1);
    }

    #[test]
    fn insert_replaces_previous_record() {
        let mut queries = SavedQueries::new();
        queries.insert("/x.html", SavedQueryRecord::new("First"));
        queries.insert("/x.html", SavedQueryRecord::new("Second"));

        assert_eq!(queries.len(), 1);
        assert_eq!(queries.get("/x.html").unwrap().name, "Second");
    }

    #[test]
    fn remove_unknown_query_is_none() {
        let mut queries = SavedQueries::new();
        assert!(queries.remove("/missing.html").is_none());
    }

    #[test]
    fn links_are_ordered_by_label() {
        let mut queries = SavedQueries::new();
        queries.insert("/b.html", SavedQueryRecord::new("Zulu"));
        queries.insert("/a.html", SavedQueryRecord::new("Alpha"));
        queries.insert("/c.html", SavedQueryRecord::new("Mike"));

        let links = queries.links();
        let labels: Vec<&str> = links.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["Alpha", "Mike", "Zulu"]);
    }

    #[test]
    fn links_tie_break_on_query_string() {
        let mut queries = SavedQueries::new();
        queries.insert("/b.html", SavedQueryRecord::new("Same"));
        queries.insert("/a.html", SavedQueryRecord::new("Same"));

        let links = queries.links();
        let order: Vec<&str> = links.iter().map(|l| l.query.as_str()).collect();
        assert_eq!(order, vec!["/a.html", "/b.html"]);
    }

    #[test]
    fn action_visibility_is_inverse() {
        let saved = ActionVisibility::saved();
        assert!(!saved.show_save);
        assert!(saved.show_forget);

        let unsaved = ActionVisibility::unsaved();
        assert!(unsaved.show_save);
        assert!(!unsaved.show_forget);

        assert_eq!(ActionVisibility::for_saved_state(true), saved);
        assert_eq!(ActionVisibility::for_saved_state(false), unsaved);
    }

    #[test]
    fn serde_document_shape_is_a_plain_map() {
        let mut queries = SavedQueries::new();
        queries.insert("/x.html", SavedQueryRecord::new("N"));

        let value = serde_json::to_value(&queries).unwrap();
        assert!(value.is_object());
        assert!(value.get("/x.html").is_some());

        let round_tripped: SavedQueries = serde_json::from_value(value).unwrap();
        assert_eq!(round_tripped, queries);
    }
}
