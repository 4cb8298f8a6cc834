use crate::{AnswerValue, Answers, Choice, Field, FieldPath, FormDefinition, FormError};

/// Field validator handed to backends.
///
/// Receives the path of the field being answered, the candidate value and
/// all answers collected so far. Returns an error message to show inline.
pub type Validator<'a> = dyn Fn(&FieldPath, &AnswerValue, &Answers) -> Result<(), String> + 'a;

/// Resolves the options a picker shows, given the answers so far.
///
/// Backends call this every time they render a picker, so dependent option
/// lists follow the current answer of their parent field.
pub trait ResolveOptions {
    fn options(&self, field: &Field, answers: &Answers) -> anyhow::Result<Vec<Choice>>;
}

/// Trait for backend implementations that collect form answers.
///
/// Backends receive a `FormDefinition` and return `Answers`.
/// They decide how to present the form and handle validation internally in
/// retry loops.
pub trait FormBackend {
    /// The error type for this backend.
    ///
    /// Converting into `FormError` keeps user cancellation distinguishable
    /// from backend failures.
    type Error: Into<FormError>;

    /// Collect answers for a form.
    ///
    /// # Arguments
    /// * `definition` - The fields to collect answers for
    /// * `options` - Resolves picker options from the answers so far
    /// * `validate` - Validates a candidate value before it is accepted
    ///
    /// # Returns
    /// * `Ok(answers)` once every field holds a valid answer
    /// * `Err` on cancellation or backend failure
    fn collect(
        &self,
        definition: &FormDefinition,
        options: &dyn ResolveOptions,
        validate: &Validator<'_>,
    ) -> Result<Answers, Self::Error>;
}
