//! Test backend for filling forms without user interaction.
//!
//! `TestBackend` fills a form from pre-defined answers. Fields without a
//! scripted answer take their pre-filled value, as if the user pressed Enter.
//!
//! # Example
//!
//! ```rust,ignore
//! use setup_form::{StaticOptions, TestBackend, fill};
//!
//! let backend = TestBackend::new()
//!     .with_string("discordToken", "abc")
//!     .with_bool("confirm", true);
//!
//! let answers = fill(&backend, &form, &StaticOptions, &|_, _, _| Ok(()))?;
//! ```

use std::cell::RefCell;
use std::collections::HashMap;

use crate::{
    AnswerValue, Answers, Choice, Field, FieldKind, FieldPath, FormBackend, FormDefinition,
    FormError, ResolveOptions, Validator,
};

/// The options a picker showed while a form was filled.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub path: FieldPath,
    pub options: Vec<Choice>,
}

/// A test backend that answers from pre-configured values.
///
/// Every picker it renders is recorded, so tests can inspect option labels.
#[derive(Debug, Clone, Default)]
pub struct TestBackend {
    answers: HashMap<String, AnswerValue>,
    rendered: RefCell<Vec<Rendered>>,
}

/// Error type for TestBackend.
#[derive(Debug, thiserror::Error)]
pub enum TestBackendError {
    #[error("Missing answer for path: {0}")]
    MissingAnswer(String),

    #[error("Answer for '{path}' should be {expected}, got {actual}")]
    WrongType {
        path: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("'{value}' is not an option of '{path}'")]
    InvalidChoice { path: String, value: String },

    #[error("Validation failed for '{path}': {message}")]
    ValidationFailed { path: String, message: String },

    #[error("Could not resolve options for '{path}': {source}")]
    Options {
        path: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<TestBackendError> for FormError {
    fn from(err: TestBackendError) -> Self {
        FormError::backend(err)
    }
}

impl TestBackend {
    /// Create a new empty test backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an answer for a given path.
    pub fn with_answer(mut self, path: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        self.answers.insert(path.into(), value.into());
        self
    }

    /// Add a free-text answer.
    pub fn with_string(self, path: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_answer(path, AnswerValue::String(value.into()))
    }

    /// Add a yes/no answer (Confirm and Toggle fields).
    pub fn with_bool(self, path: impl Into<String>, value: bool) -> Self {
        self.with_answer(path, AnswerValue::Bool(value))
    }

    /// Pick the option with the given value (Select fields).
    pub fn with_choice(self, path: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_answer(path, AnswerValue::Choice(value.into()))
    }

    /// Pick the options with the given values (MultiSelect fields).
    pub fn with_choices<I, S>(self, path: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect::<Vec<String>>();
        self.with_answer(path, AnswerValue::Choices(values))
    }

    /// Every picker rendered so far, in order.
    pub fn rendered(&self) -> Vec<Rendered> {
        self.rendered.borrow().clone()
    }

    /// The options shown the last time the picker at `path` was rendered.
    pub fn last_rendered(&self, path: &str) -> Option<Vec<Choice>> {
        self.rendered
            .borrow()
            .iter()
            .rev()
            .find(|rendered| rendered.path.as_str() == path)
            .map(|rendered| rendered.options.clone())
    }

    fn answer_field(
        &self,
        field: &Field,
        answers: &Answers,
        options: &dyn ResolveOptions,
    ) -> Result<AnswerValue, TestBackendError> {
        let path = field.path().as_str();
        let scripted = self.answers.get(path);

        match field.kind() {
            FieldKind::Input(input) => match scripted {
                Some(AnswerValue::String(text)) => Ok(AnswerValue::String(text.clone())),
                Some(other) => Err(wrong_type(path, "String", other)),
                None => input
                    .default
                    .clone()
                    .map(AnswerValue::String)
                    .ok_or_else(|| TestBackendError::MissingAnswer(path.to_string())),
            },

            FieldKind::Select(select) => {
                let choices = self.render(field, answers, options)?;
                let value = match scripted {
                    Some(AnswerValue::Choice(value)) => value.clone(),
                    Some(other) => return Err(wrong_type(path, "Choice", other)),
                    None if choices.is_empty() => String::new(),
                    None => select
                        .default
                        .clone()
                        .filter(|default| choices.iter().any(|c| &c.value == default))
                        .ok_or_else(|| TestBackendError::MissingAnswer(path.to_string()))?,
                };
                if !(choices.is_empty() && value.is_empty())
                    && !choices.iter().any(|c| c.value == value)
                {
                    return Err(TestBackendError::InvalidChoice {
                        path: path.to_string(),
                        value,
                    });
                }
                Ok(AnswerValue::Choice(value))
            }

            FieldKind::MultiSelect(multi) => {
                let choices = self.render(field, answers, options)?;
                let picked: Vec<String> = match scripted {
                    Some(AnswerValue::Choices(values)) => values.clone(),
                    Some(other) => return Err(wrong_type(path, "Choices", other)),
                    None => multi.defaults.clone(),
                };
                // Pre-selected values that are no longer offered are dropped.
                if scripted.is_some()
                    && let Some(unknown) = picked
                        .iter()
                        .find(|value| !choices.iter().any(|c| &c.value == *value))
                {
                    return Err(TestBackendError::InvalidChoice {
                        path: path.to_string(),
                        value: unknown.clone(),
                    });
                }
                // Report in option order, the way interactive backends do.
                let ordered = choices
                    .iter()
                    .filter(|c| picked.contains(&c.value))
                    .map(|c| c.value.clone())
                    .collect();
                Ok(AnswerValue::Choices(ordered))
            }

            FieldKind::Toggle(toggle) => match scripted {
                Some(AnswerValue::Bool(b)) => Ok(AnswerValue::Bool(*b)),
                Some(other) => Err(wrong_type(path, "Bool", other)),
                None => Ok(AnswerValue::Bool(toggle.default)),
            },

            FieldKind::Confirm(confirm) => match scripted {
                Some(AnswerValue::Bool(b)) => Ok(AnswerValue::Bool(*b)),
                Some(other) => Err(wrong_type(path, "Bool", other)),
                None => Ok(AnswerValue::Bool(confirm.default)),
            },
        }
    }

    fn render(
        &self,
        field: &Field,
        answers: &Answers,
        options: &dyn ResolveOptions,
    ) -> Result<Vec<Choice>, TestBackendError> {
        let choices =
            options
                .options(field, answers)
                .map_err(|source| TestBackendError::Options {
                    path: field.path().to_string(),
                    source,
                })?;
        self.rendered.borrow_mut().push(Rendered {
            path: field.path().clone(),
            options: choices.clone(),
        });
        Ok(choices)
    }
}

fn wrong_type(path: &str, expected: &'static str, actual: &AnswerValue) -> TestBackendError {
    TestBackendError::WrongType {
        path: path.to_string(),
        expected,
        actual: actual.type_name(),
    }
}

impl FormBackend for TestBackend {
    type Error = TestBackendError;

    fn collect(
        &self,
        definition: &FormDefinition,
        options: &dyn ResolveOptions,
        validate: &Validator<'_>,
    ) -> Result<Answers, Self::Error> {
        let mut answers = Answers::new();

        for field in definition.fields() {
            let value = self.answer_field(field, &answers, options)?;

            // Validate before inserting
            if let Err(message) = validate(field.path(), &value, &answers) {
                return Err(TestBackendError::ValidationFailed {
                    path: field.path().to_string(),
                    message,
                });
            }
            answers.insert(field.path().clone(), value);
        }

        Ok(answers)
    }
}
