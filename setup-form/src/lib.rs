//! # setup-form
//!
//! Interactive setup forms whose pickers may depend on earlier answers.
//! Backend-agnostic.
//!
//! A form is a [`FormDefinition`]: an ordered list of fields. Picker fields
//! take their options from an [`OptionSource`], either a fixed list or a list
//! derived from another field's answer. The [`OptionResolver`] implements the
//! dependency rule: whenever the parent answer changes, the dependent option
//! list is invalidated and looked up again through an [`OptionProvider`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use setup_form::{Choice, Field, FieldKind, FormDefinition, OptionResolver, SelectField, fill};
//!
//! let form = FormDefinition::new(vec![
//!     Field::new("guildId", "Guild", FieldKind::Select(SelectField::new(guilds))),
//!     Field::new("channelId", "Channel", FieldKind::Select(SelectField::dependent("guildId"))),
//! ]);
//!
//! let resolver = OptionResolver::new(|_field: &FieldPath, guild: &str| lookup_channels(guild));
//! let answers = fill(&backend, &form, &resolver, &|_, _, _| Ok(()))?;
//! ```
//!
//! ## Backends
//!
//! Backends are separate crates that implement `FormBackend`:
//! - `setup-form-dialoguer` - CLI prompts via dialoguer
//!
//! [`TestBackend`] fills forms from scripted answers for tests.

// Re-export all types from setup-form-types
pub use setup_form_types::*;

mod resolver;
pub use resolver::{OptionProvider, OptionResolver, StaticOptions};

// Test backend for filling forms without user interaction
mod test_backend;
pub use test_backend::{Rendered, TestBackend, TestBackendError};

/// Collect answers for `definition` with `backend`.
///
/// Backend errors are converted into [`FormError`], keeping cancellation
/// separate from other failures.
pub fn fill<B: FormBackend>(
    backend: &B,
    definition: &FormDefinition,
    options: &dyn ResolveOptions,
    validate: &Validator<'_>,
) -> Result<Answers, FormError> {
    backend
        .collect(definition, options, validate)
        .map_err(Into::into)
}
