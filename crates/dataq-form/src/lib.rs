//! Query-form engine for the DataQ explorer.
//!
//! This crate provides typed models for the explorer form, the
//! [`FormSurface`] abstraction over the rendered page, the typeahead
//! suggestion and completion policies, and the [`QueryFormController`]
//! that keeps the request preview and the saved-query panel in sync with
//! form state.

#![deny(missing_docs)]

pub mod controller;
pub mod models;
pub mod surface;
pub mod typeahead;

pub use controller::{QueryFormController, QueryFormControllerBuilder};
pub use models::{CallbackPolicy, FieldKind, FormEvent, FormField, FormSnapshot, LimitPolicy};
pub use surface::FormSurface;
pub use typeahead::Completion;

/// Convenient result alias that reuses the core error type.
pub type Result<T> = dataq_core::Result<T>;
