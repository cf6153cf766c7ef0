//! Abstraction over the rendered explorer page.
//!
//! The controller never touches the page directly; it reads form state and
//! applies updates through [`FormSurface`]. A host embedding the engine
//! implements this trait over its widget toolkit; tests implement it over
//! plain structs. Surfaces whose page lacks one of the optional elements
//! (limit field, callback field, saved-queries panel) simply ignore the
//! corresponding apply calls.

use dataq_core::query::QueryUrl;
use dataq_registry::{ActionVisibility, SavedQueryLink};

use crate::models::{CallbackPolicy, FormSnapshot, LimitPolicy};

/// The controller's view of the rendered page.
#[cfg_attr(test, mockall::automock)]
pub trait FormSurface: Send {
    /// Whether the query form is present on the page at all.
    fn is_present(&self) -> bool;

    /// Read all successful form controls.
    fn snapshot(&self) -> FormSnapshot;

    /// The comma-separated typeahead candidate list, when the page
    /// carries one.
    fn candidate_source(&self) -> Option<String>;

    /// Whether the page has a jsonp callback field.
    fn has_callback_field(&self) -> bool;

    /// Set the form's submission target.
    fn set_action(&mut self, action: &str);

    /// Render the request preview.
    fn render_preview(&mut self, url: &QueryUrl);

    /// Apply the result-limit enablement policy.
    fn apply_limit_policy(&mut self, policy: LimitPolicy);

    /// Apply the callback-field policy.
    fn apply_callback_policy(&mut self, policy: CallbackPolicy);

    /// Replace the text of a named field.
    fn set_field_text(&mut self, field: &str, text: &str);

    /// Move the text cursor within a named field.
    fn set_field_cursor(&mut self, field: &str, position: usize);

    /// Render the saved-query links; an empty slice means the surface
    /// should show its placeholder message instead.
    fn render_saved_queries(&mut self, links: &[SavedQueryLink]);

    /// Show or hide the save/forget affordances.
    fn apply_action_visibility(&mut self, visibility: ActionVisibility);

    /// Ask the user to name the query being saved; `None` when declined.
    fn prompt_query_name(&mut self) -> Option<String>;
}
