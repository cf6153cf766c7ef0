//! The query-form controller.
//!
//! One controller is constructed per mounted form, holding its surface, its
//! configuration, and the saved-query registry for its page. The host wires
//! form events to [`QueryFormController::handle_event`] and the save/forget
//! affordances to the async registry operations.

use tracing::{debug, info};

use dataq_core::config::ExplorerConfig;
use dataq_core::query::{FieldValues, QueryUrl};
use dataq_core::types::{OutputFormat, RESERVED_FORMAT_FIELD};
use dataq_core::Result;
use dataq_registry::{KeyValueStore, SavedQueryRegistry};

use crate::models::{CallbackPolicy, FormEvent, LimitPolicy};
use crate::surface::FormSurface;
use crate::typeahead::{self, Completion};

/// Builder for [`QueryFormController`].
pub struct QueryFormControllerBuilder<S, K> {
    config: ExplorerConfig,
    surface: S,
    store: K,
}

impl<S: FormSurface, K: KeyValueStore> QueryFormControllerBuilder<S, K> {
    /// Create a builder from the controller's three collaborators.
    pub fn new(config: ExplorerConfig, surface: S, store: K) -> Self {
        Self {
            config,
            surface,
            store,
        }
    }

    /// Build the controller.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured page path yields no storage key.
    pub fn build(self) -> Result<QueryFormController<S, K>> {
        let page_key = self.config.page_key()?;
        let registry = SavedQueryRegistry::new(self.store, page_key);
        Ok(QueryFormController {
            config: self.config,
            surface: self.surface,
            registry,
            candidates: Vec::new(),
            current_preview: None,
        })
    }
}

/// Keeps the request preview and the saved-query panel synchronized with
/// form state.
pub struct QueryFormController<S: FormSurface, K: KeyValueStore> {
    config: ExplorerConfig,
    surface: S,
    registry: SavedQueryRegistry<K>,
    candidates: Vec<String>,
    current_preview: Option<String>,
}

impl<S: FormSurface, K: KeyValueStore> QueryFormController<S, K> {
    /// Construct a controller directly from its collaborators.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured page path yields no storage key.
    pub fn new(config: ExplorerConfig, surface: S, store: K) -> Result<Self> {
        QueryFormControllerBuilder::new(config, surface, store).build()
    }

    /// The controller's configuration.
    #[must_use]
    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// The canonical preview string of the last rebuild, if any.
    #[must_use]
    pub fn current_preview(&self) -> Option<&str> {
        self.current_preview.as_deref()
    }

    /// The typeahead candidates read from the surface at initialization.
    #[must_use]
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// One-time entry point once the page is ready: read the typeahead
    /// candidate list, perform the on-load rebuild, and render the
    /// saved-query panel.
    ///
    /// Does nothing when the surface reports the form absent.
    ///
    /// # Errors
    ///
    /// Returns an error when the saved-query registry cannot be read.
    pub async fn initialize(&mut self) -> Result<()> {
        if !self.surface.is_present() {
            debug!("form absent, skipping initialization");
            return Ok(());
        }

        self.candidates = self
            .surface
            .candidate_source()
            .map(|raw| {
                raw.split(',')
                    .map(str::to_string)
                    .filter(|candidate| !candidate.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        info!(candidates = self.candidates.len(), "initializing query form");

        self.handle_event(FormEvent::Ready);
        self.refresh_saved_queries().await?;
        self.toggle_actions().await?;
        Ok(())
    }

    /// Read the form and reduce it to non-empty field values.
    #[must_use]
    pub fn compute_form_values(&self) -> FieldValues {
        self.surface.snapshot().field_values()
    }

    /// Apply the field-enablement policies for the selected format.
    ///
    /// The html format pins the result limit to its configured default;
    /// every other format unlocks it. When the page has a callback field,
    /// it is visible and enabled only for jsonp.
    pub fn set_form_options(&mut self) {
        let values = self.compute_form_values();
        let format = self.selected_format(&values);

        let limit = if format.is_html() {
            LimitPolicy::Locked {
                value: self.config.html_limit,
            }
        } else {
            LimitPolicy::Unlocked
        };
        self.surface.apply_limit_policy(limit);

        if self.surface.has_callback_field() {
            let callback = if format.is_jsonp() {
                CallbackPolicy::Visible
            } else {
                CallbackPolicy::Hidden
            };
            self.surface.apply_callback_policy(callback);
        }
    }

    /// Synthesize the request URL, point the form at it, and render the
    /// preview. Remembers the canonical preview string for the registry
    /// operations.
    pub fn build_query_url(&mut self) -> QueryUrl {
        let values = self.compute_form_values();
        let url = QueryUrl::synthesize_with_default(
            &self.config.base_href,
            values,
            self.config.default_format.clone(),
        );

        self.surface.set_action(url.action());
        self.surface.render_preview(&url);
        self.current_preview = Some(url.preview());
        debug!(action = url.action(), has_params = url.has_params(), "rebuilt request preview");
        url
    }

    /// Re-derive everything that depends on form state.
    ///
    /// Returns `None` (and does nothing) when the form is absent.
    pub fn rebuild_query(&mut self) -> Option<QueryUrl> {
        if !self.surface.is_present() {
            return None;
        }
        self.set_form_options();
        Some(self.build_query_url())
    }

    /// Handle a qualifying form event by rebuilding.
    pub fn handle_event(&mut self, event: FormEvent) -> Option<QueryUrl> {
        debug!(?event, "form event");
        self.rebuild_query()
    }

    /// Offer typeahead suggestions for the current text of a field.
    #[must_use]
    pub fn suggest(&self, input: &str) -> Vec<String> {
        typeahead::suggest(&self.candidates, input, &self.config.typeahead)
    }

    /// Apply a chosen suggestion to a field, updating the surface text and
    /// cursor. Returns `None` when the field is not on the form.
    pub fn complete(&mut self, field: &str, item: &str) -> Option<Completion> {
        let snapshot = self.surface.snapshot();
        let current = snapshot.field_text(field)?;
        let completion = typeahead::complete(current, item);

        self.surface.set_field_text(field, &completion.text);
        if let Some(position) = completion.cursor {
            self.surface.set_field_cursor(field, position);
        }
        Some(completion)
    }

    /// Load the page's saved queries and render them.
    ///
    /// # Errors
    ///
    /// Returns an error when the registry cannot be read.
    pub async fn refresh_saved_queries(&mut self) -> Result<()> {
        let links = self.registry.list().await?;
        self.surface.render_saved_queries(&links);
        Ok(())
    }

    /// Show the affordance that applies to the current preview string:
    /// forget when it is already saved, save otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error when the registry cannot be read.
    pub async fn toggle_actions(&mut self) -> Result<()> {
        let preview = self.current_preview.clone().unwrap_or_default();
        let visibility = self.registry.action_visibility(&preview).await?;
        self.surface.apply_action_visibility(visibility);
        Ok(())
    }

    /// Save the current preview string under a user-supplied name.
    ///
    /// Prompts through the surface; a declined prompt or blank name skips
    /// the save. Returns whether a save happened.
    ///
    /// # Errors
    ///
    /// Returns an error when the registry cannot be read or written.
    pub async fn save_current(&mut self) -> Result<bool> {
        let Some(preview) = self.current_preview.clone() else {
            return Ok(false);
        };
        let Some(name) = self.surface.prompt_query_name() else {
            debug!("save prompt declined");
            return Ok(false);
        };
        let name = name.trim().to_string();
        if name.is_empty() {
            debug!("save prompt returned a blank name");
            return Ok(false);
        }

        self.registry.save(&preview, &name).await?;
        self.refresh_saved_queries().await?;
        self.toggle_actions().await?;
        Ok(true)
    }

    /// Forget the registry entry for the current preview string.
    ///
    /// Returns whether a forget was issued.
    ///
    /// # Errors
    ///
    /// Returns an error when the registry cannot be read or written.
    pub async fn forget_current(&mut self) -> Result<bool> {
        let Some(preview) = self.current_preview.clone() else {
            return Ok(false);
        };

        self.registry.forget(&preview).await?;
        self.refresh_saved_queries().await?;
        self.toggle_actions().await?;
        Ok(true)
    }

    fn selected_format(&self, values: &FieldValues) -> OutputFormat {
        values
            .get(RESERVED_FORMAT_FIELD)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_else(|| self.config.default_format.clone())
    }
}
