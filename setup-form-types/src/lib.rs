//! Core types for the setup-form crate.
//!
//! This crate provides the foundational types for defining setup forms:
//! - `FormDefinition` - One group of fields rendered together
//! - `Field` and `FieldKind` - Individual fields and their input types
//! - `OptionSource` - Where a picker gets its choices (fixed or dependent on another field)
//! - `Answers` and `FieldPath` - Collected data and path-based keys
//! - `FormBackend` and `ResolveOptions` traits - For implementing backends

mod field_path;
pub use field_path::FieldPath;

mod answer_value;
pub use answer_value::AnswerValue;

mod answers;
pub use answers::{AnswerError, Answers};

mod field;
pub use field::{
    Choice, ConfirmField, Field, FieldKind, InputField, MultiSelectField, OptionSource,
    SelectField, ToggleField,
};

mod form_definition;
pub use form_definition::FormDefinition;

mod error;
pub use error::FormError;

mod traits;
pub use traits::{FormBackend, ResolveOptions, Validator};
