//! The per-page saved-query registry.

use tracing::{debug, info};

use dataq_core::page::PageKey;
use dataq_core::Result;

use crate::models::{ActionVisibility, SavedQueries, SavedQueryLink, SavedQueryRecord};
use crate::store::KeyValueStore;

/// Registry of named queries for one explorer page.
///
/// Each operation loads the page's full document from the store (an absent
/// document reads as empty) and, for mutations, rewrites it in full.
#[derive(Debug)]
pub struct SavedQueryRegistry<K: KeyValueStore> {
    store: K,
    page_key: PageKey,
}

impl<K: KeyValueStore> SavedQueryRegistry<K> {
    /// Create a registry scoped to a page.
    pub fn new(store: K, page_key: PageKey) -> Self {
        Self { store, page_key }
    }

    /// The storage key this registry is scoped by.
    #[must_use]
    pub fn page_key(&self) -> &PageKey {
        &self.page_key
    }

    /// Load the page's registry document, defaulting to empty.
    ///
    /// # Errors
    ///
    /// Returns an error when the store cannot be read or the stored
    /// document does not deserialize.
    pub async fn load(&self) -> Result<SavedQueries> {
        match self.store.get_item(self.page_key.as_str()).await? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(SavedQueries::new()),
        }
    }

    /// List the saved queries as display links, ordered by label.
    ///
    /// # Errors
    ///
    /// Returns an error when the registry cannot be loaded.
    pub async fn list(&self) -> Result<Vec<SavedQueryLink>> {
        let queries = self.load().await?;
        debug!(page = %self.page_key, count = queries.len(), "listing saved queries");
        Ok(queries.links())
    }

    /// Returns true when the exact query string is saved on this page.
    ///
    /// # Errors
    ///
    /// Returns an error when the registry cannot be loaded.
    pub async fn contains(&self, query: &str) -> Result<bool> {
        Ok(self.load().await?.contains(query))
    }

    /// Which save/forget affordances apply to the given query string.
    ///
    /// # Errors
    ///
    /// Returns an error when the registry cannot be loaded.
    pub async fn action_visibility(&self, query: &str) -> Result<ActionVisibility> {
        let saved = self.contains(query).await?;
        Ok(ActionVisibility::for_saved_state(saved))
    }

    /// Save a query under a display name, replacing any previous record.
    ///
    /// # Errors
    ///
    /// Returns an error when the registry cannot be loaded or persisted.
    pub async fn save(&self, query: &str, name: &str) -> Result<()> {
        let mut queries = self.load().await?;
        queries.insert(query, SavedQueryRecord::new(name));
        self.persist(&queries).await?;
        info!(page = %self.page_key, name, "saved query");
        Ok(())
    }

    /// Forget the record saved under a query string.
    ///
    /// Forgetting an unknown query string is tolerated; the document is
    /// still rewritten.
    ///
    /// # Errors
    ///
    /// Returns an error when the registry cannot be loaded or persisted.
    pub async fn forget(&self, query: &str) -> Result<()> {
        let mut queries = self.load().await?;
        let removed = queries.remove(query).is_some();
        self.persist(&queries).await?;
        info!(page = %self.page_key, removed, "forgot query");
        Ok(())
    }

    async fn persist(&self, queries: &SavedQueries) -> Result<()> {
        let value = serde_json::to_value(queries)?;
        self.store.set_item(self.page_key.as_str(), value).await
    }
}
