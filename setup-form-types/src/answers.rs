use std::collections::HashMap;

use crate::{AnswerValue, FieldPath};

/// Error type for answer access operations.
#[derive(Debug, thiserror::Error)]
pub enum AnswerError {
    #[error("Missing answer for path: {0}")]
    MissingPath(FieldPath),

    #[error("Type mismatch at path '{path}': expected {expected}, got {actual}")]
    TypeMismatch {
        path: FieldPath,
        expected: &'static str,
        actual: &'static str,
    },
}

/// Collected answers from a form.
///
/// Uses `FieldPath` as keys. Paths are flat: a grouped field like
/// `limits.user` is stored with the key `FieldPath::from("limits.user")`.
#[derive(Debug, Clone, Default)]
pub struct Answers {
    values: HashMap<FieldPath, AnswerValue>,
}

impl Answers {
    /// Create a new empty answers collection.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Insert an answer at the given path, returning the previous one.
    pub fn insert(
        &mut self,
        path: impl Into<FieldPath>,
        value: impl Into<AnswerValue>,
    ) -> Option<AnswerValue> {
        self.values.insert(path.into(), value.into())
    }

    /// Get an answer at the given path.
    pub fn get(&self, path: &FieldPath) -> Option<&AnswerValue> {
        self.values.get(path)
    }

    /// Get the number of answers.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no answers.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    // === Convenience accessors ===

    /// Get a free-text answer at the given path.
    pub fn get_string(&self, path: &FieldPath) -> Result<&str, AnswerError> {
        match self.get(path) {
            Some(AnswerValue::String(s)) => Ok(s),
            Some(other) => Err(AnswerError::TypeMismatch {
                path: path.clone(),
                expected: "String",
                actual: other.type_name(),
            }),
            None => Err(AnswerError::MissingPath(path.clone())),
        }
    }

    /// Get a boolean answer at the given path.
    pub fn get_bool(&self, path: &FieldPath) -> Result<bool, AnswerError> {
        match self.get(path) {
            Some(AnswerValue::Bool(b)) => Ok(*b),
            Some(other) => Err(AnswerError::TypeMismatch {
                path: path.clone(),
                expected: "Bool",
                actual: other.type_name(),
            }),
            None => Err(AnswerError::MissingPath(path.clone())),
        }
    }

    /// Get the chosen option value of a Select field.
    pub fn get_choice(&self, path: &FieldPath) -> Result<&str, AnswerError> {
        match self.get(path) {
            Some(AnswerValue::Choice(s)) => Ok(s),
            Some(other) => Err(AnswerError::TypeMismatch {
                path: path.clone(),
                expected: "Choice",
                actual: other.type_name(),
            }),
            None => Err(AnswerError::MissingPath(path.clone())),
        }
    }

    /// Get the chosen option values of a MultiSelect field.
    pub fn get_choices(&self, path: &FieldPath) -> Result<&[String], AnswerError> {
        match self.get(path) {
            Some(AnswerValue::Choices(values)) => Ok(values),
            Some(other) => Err(AnswerError::TypeMismatch {
                path: path.clone(),
                expected: "Choices",
                actual: other.type_name(),
            }),
            None => Err(AnswerError::MissingPath(path.clone())),
        }
    }
}
