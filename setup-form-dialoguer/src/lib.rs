//! # setup-form-dialoguer
//!
//! Dialoguer backend for setup-form.
//!
//! This crate provides a command-line wizard interface for filling setup forms
//! using the `dialoguer` library. Fields are presented step-by-step; pickers
//! ask the resolver for their options right before they are shown, so
//! dependent pickers always reflect the current answer of their parent.
//!
//! ## Example
//!
//! ```rust,ignore
//! use setup_form::{Field, FieldKind, FormDefinition, InputField, StaticOptions, fill};
//! use setup_form_dialoguer::{DialoguerBackend, Spinner};
//!
//! let form = FormDefinition::new(vec![Field::new(
//!     "token",
//!     "Token",
//!     FieldKind::Input(InputField::new()),
//! )]);
//!
//! let backend = DialoguerBackend::new();
//! let answers = fill(&backend, &form, &StaticOptions, &|_, _, _| Ok(()))?;
//! let servers = Spinner::new("Logging in...").run(|| fetch_servers(&answers));
//! ```

mod backend;
mod palette;
mod spinner;

pub use backend::{DialoguerBackend, DialoguerError};
pub use palette::Palette;
pub use spinner::Spinner;
