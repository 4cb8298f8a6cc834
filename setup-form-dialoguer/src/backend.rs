//! Dialoguer backend implementation for FormBackend trait.

use dialoguer::theme::{SimpleTheme, Theme};
use dialoguer::{Confirm, Input, MultiSelect, Select};
use setup_form::{
    AnswerValue, Answers, Choice, ConfirmField, Field, FieldKind, FieldPath, FormBackend,
    FormDefinition, FormError, InputField, MultiSelectField, ResolveOptions, SelectField,
    ToggleField, Validator,
};
use thiserror::Error;
use tracing::debug;

use crate::Palette;

/// Error type for the Dialoguer backend.
#[derive(Debug, Error)]
pub enum DialoguerError {
    /// User cancelled the form (e.g., pressed Ctrl+C or Escape).
    #[error("Form cancelled by user")]
    Cancelled,

    /// An I/O error occurred during prompting.
    #[error("Dialoguer error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    /// The options of a picker could not be resolved.
    #[error("Could not load options for '{path}': {source}")]
    Options {
        path: FieldPath,
        #[source]
        source: anyhow::Error,
    },
}

impl From<DialoguerError> for FormError {
    fn from(err: DialoguerError) -> Self {
        match err {
            DialoguerError::Cancelled => FormError::Cancelled,
            other => FormError::backend(other),
        }
    }
}

/// Helper to check if a dialoguer error is a cancellation (Ctrl+C / Escape)
fn is_cancelled(err: &dialoguer::Error) -> bool {
    matches!(err, dialoguer::Error::IO(io_err) if io_err.kind() == std::io::ErrorKind::Interrupted)
}

fn prompt_error(err: dialoguer::Error) -> DialoguerError {
    if is_cancelled(&err) {
        DialoguerError::Cancelled
    } else {
        DialoguerError::Dialoguer(err)
    }
}

/// The answer recorded for a picker that has nothing to pick from.
///
/// `None` when there are choices to show or the kind is not a picker.
fn empty_pick(kind: &FieldKind, choices: &[Choice]) -> Option<AnswerValue> {
    if !choices.is_empty() {
        return None;
    }
    match kind {
        FieldKind::Select(_) => Some(AnswerValue::Choice(String::new())),
        FieldKind::MultiSelect(_) => Some(AnswerValue::Choices(Vec::new())),
        _ => None,
    }
}

/// Cursor position for a select: the default's row, else the first row.
fn default_index(choices: &[Choice], default: Option<&str>) -> usize {
    default
        .and_then(|value| choices.iter().position(|c| c.value == value))
        .unwrap_or(0)
}

/// Pre-checked rows for a multi-select.
fn default_flags(choices: &[Choice], defaults: &[String]) -> Vec<bool> {
    choices
        .iter()
        .map(|c| defaults.contains(&c.value))
        .collect()
}

/// Prompt until the validator accepts, reporting each rejection.
fn until_valid<E>(
    field: &Field,
    answers: &Answers,
    validate: &Validator<'_>,
    mut prompt: impl FnMut() -> Result<AnswerValue, E>,
    mut rejected: impl FnMut(&str),
) -> Result<AnswerValue, E> {
    loop {
        let answer = prompt()?;
        match validate(field.path(), &answer, answers) {
            Ok(()) => return Ok(answer),
            Err(msg) => rejected(&msg),
        }
    }
}

fn report(msg: &str) {
    eprintln!("Error: {msg}");
}

/// Dialoguer backend for interactive CLI prompts.
///
/// Fields are asked one at a time in definition order. Descriptions are
/// printed above each prompt.
#[derive(Debug, Clone)]
pub struct DialoguerBackend {
    /// Colours for prompts; `None` renders plain text.
    palette: Option<Palette>,
}

impl Default for DialoguerBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl DialoguerBackend {
    /// Create a new Dialoguer backend with the default palette.
    pub fn new() -> Self {
        Self {
            palette: Some(Palette::default()),
        }
    }

    /// Create a backend with plain (no color) theme.
    pub fn plain() -> Self {
        Self { palette: None }
    }

    /// Create a backend with a custom palette.
    pub fn with_palette(palette: Palette) -> Self {
        Self {
            palette: Some(palette),
        }
    }

    fn theme(&self) -> Box<dyn Theme> {
        match &self.palette {
            Some(palette) => Box::new(palette.theme()),
            None => Box::new(SimpleTheme),
        }
    }

    fn describe(&self, field: &Field) {
        let Some(description) = field.description() else {
            return;
        };
        match &self.palette {
            Some(palette) => eprintln!("{}", palette.description(description)),
            None => eprintln!("{description}"),
        }
    }

    /// Ask a single field and store the answer.
    fn ask_field(
        &self,
        field: &Field,
        answers: &mut Answers,
        options: &dyn ResolveOptions,
        validate: &Validator<'_>,
    ) -> Result<(), DialoguerError> {
        self.describe(field);

        let value = match field.kind() {
            FieldKind::Input(input) => self.ask_input(field, input, answers, validate)?,
            FieldKind::Select(select) => {
                let choices = self.resolve(field, answers, options)?;
                self.ask_select(field, select, &choices, answers, validate)?
            }
            FieldKind::MultiSelect(multi) => {
                let choices = self.resolve(field, answers, options)?;
                self.ask_multi_select(field, multi, &choices, answers, validate)?
            }
            FieldKind::Toggle(toggle) => self.ask_toggle(field, toggle)?,
            FieldKind::Confirm(confirm) => self.ask_confirm(field, confirm)?,
        };

        answers.insert(field.path().clone(), value);
        Ok(())
    }

    fn resolve(
        &self,
        field: &Field,
        answers: &Answers,
        options: &dyn ResolveOptions,
    ) -> Result<Vec<Choice>, DialoguerError> {
        let choices = options
            .options(field, answers)
            .map_err(|source| DialoguerError::Options {
                path: field.path().clone(),
                source,
            })?;
        debug!(field = %field.path(), count = choices.len(), "resolved options");
        Ok(choices)
    }

    fn ask_input(
        &self,
        field: &Field,
        input: &InputField,
        answers: &Answers,
        validate: &Validator<'_>,
    ) -> Result<AnswerValue, DialoguerError> {
        let theme = self.theme();
        let prompt = || -> Result<AnswerValue, DialoguerError> {
            let mut builder = Input::<String>::with_theme(theme.as_ref())
                .with_prompt(field.title())
                .allow_empty(input.allow_empty);

            // Apply default value
            if let Some(default) = input.default.as_ref().filter(|d| !d.is_empty()) {
                builder = builder.default(default.clone());
            }

            let value = builder.interact_text().map_err(prompt_error)?;
            Ok(AnswerValue::String(value))
        };
        until_valid(field, answers, validate, prompt, report)
    }

    fn ask_select(
        &self,
        field: &Field,
        select: &SelectField,
        choices: &[Choice],
        answers: &Answers,
        validate: &Validator<'_>,
    ) -> Result<AnswerValue, DialoguerError> {
        if let Some(answer) = empty_pick(field.kind(), choices) {
            eprintln!("{}: (no options available)", field.title());
            return Ok(answer);
        }

        let labels: Vec<&str> = choices.iter().map(|c| c.label.as_str()).collect();
        let default = default_index(choices, select.default.as_deref());

        let theme = self.theme();
        let prompt = || -> Result<AnswerValue, DialoguerError> {
            let index = Select::with_theme(theme.as_ref())
                .with_prompt(field.title())
                .items(&labels)
                .default(default)
                .interact()
                .map_err(prompt_error)?;
            Ok(AnswerValue::Choice(choices[index].value.clone()))
        };
        until_valid(field, answers, validate, prompt, report)
    }

    fn ask_multi_select(
        &self,
        field: &Field,
        multi: &MultiSelectField,
        choices: &[Choice],
        answers: &Answers,
        validate: &Validator<'_>,
    ) -> Result<AnswerValue, DialoguerError> {
        if let Some(answer) = empty_pick(field.kind(), choices) {
            eprintln!("{}: (no options available)", field.title());
            return Ok(answer);
        }

        let labels: Vec<&str> = choices.iter().map(|c| c.label.as_str()).collect();
        let defaults = default_flags(choices, &multi.defaults);

        let theme = self.theme();
        let prompt = || -> Result<AnswerValue, DialoguerError> {
            let indices = MultiSelect::with_theme(theme.as_ref())
                .with_prompt(field.title())
                .items(&labels)
                .defaults(&defaults)
                .interact()
                .map_err(prompt_error)?;

            let picked = indices
                .into_iter()
                .map(|index| choices[index].value.clone())
                .collect();
            Ok(AnswerValue::Choices(picked))
        };
        until_valid(field, answers, validate, prompt, report)
    }

    fn ask_toggle(&self, field: &Field, toggle: &ToggleField) -> Result<AnswerValue, DialoguerError> {
        let theme = self.theme();
        let index = Select::with_theme(theme.as_ref())
            .with_prompt(field.title())
            .items(&toggle.labels())
            .default(if toggle.default { 0 } else { 1 })
            .interact()
            .map_err(prompt_error)?;

        Ok(AnswerValue::Bool(index == 0))
    }

    fn ask_confirm(
        &self,
        field: &Field,
        confirm: &ConfirmField,
    ) -> Result<AnswerValue, DialoguerError> {
        let theme = self.theme();
        let value = Confirm::with_theme(theme.as_ref())
            .with_prompt(field.title())
            .default(confirm.default)
            .interact()
            .map_err(prompt_error)?;

        Ok(AnswerValue::Bool(value))
    }
}

impl FormBackend for DialoguerBackend {
    type Error = DialoguerError;

    fn collect(
        &self,
        definition: &FormDefinition,
        options: &dyn ResolveOptions,
        validate: &Validator<'_>,
    ) -> Result<Answers, Self::Error> {
        let mut answers = Answers::new();
        for field in definition.fields() {
            self.ask_field(field, &mut answers, options, validate)?;
        }
        Ok(answers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_creation() {
        let _backend = DialoguerBackend::new();
        let _plain = DialoguerBackend::plain();
        let _custom = DialoguerBackend::with_palette(Palette::JUKEBOX);
    }

    #[test]
    fn error_types() {
        let err = DialoguerError::Cancelled;
        assert_eq!(err.to_string(), "Form cancelled by user");

        let err = DialoguerError::Options {
            path: FieldPath::new("channelId"),
            source: anyhow::anyhow!("401 Unauthorized"),
        };
        assert_eq!(
            err.to_string(),
            "Could not load options for 'channelId': 401 Unauthorized"
        );
    }

    fn rows() -> Vec<Choice> {
        vec![
            Choice::new("general", "101"),
            Choice::new("requests", "102"),
            Choice::new("music", "103"),
        ]
    }

    #[test]
    fn empty_pickers_record_an_empty_answer() {
        let select = FieldKind::Select(SelectField::dependent("guildId"));
        let multi = FieldKind::MultiSelect(MultiSelectField::dependent("guildId"));
        let input = FieldKind::Input(InputField::new());

        assert_eq!(
            empty_pick(&select, &[]),
            Some(AnswerValue::Choice(String::new()))
        );
        assert_eq!(
            empty_pick(&multi, &[]),
            Some(AnswerValue::Choices(Vec::new()))
        );
        assert_eq!(empty_pick(&input, &[]), None);
        assert_eq!(empty_pick(&select, &rows()), None);
    }

    #[test]
    fn select_starts_on_the_default_row() {
        assert_eq!(default_index(&rows(), Some("103")), 2);
        assert_eq!(default_index(&rows(), Some("101")), 0);
    }

    #[test]
    fn select_falls_back_to_the_first_row() {
        assert_eq!(default_index(&rows(), None), 0);
        assert_eq!(default_index(&rows(), Some("")), 0);
        assert_eq!(default_index(&rows(), Some("999")), 0);
    }

    #[test]
    fn multi_select_checks_only_known_defaults() {
        let defaults = vec!["103".to_string(), "gone".to_string(), "101".to_string()];
        assert_eq!(default_flags(&rows(), &defaults), vec![true, false, true]);
        assert_eq!(default_flags(&rows(), &[]), vec![false, false, false]);
    }

    #[test]
    fn rejected_answers_are_asked_again() {
        let field = Field::new("userLimit", "User limit", FieldKind::Input(InputField::new()));
        let validate = |_: &FieldPath, value: &AnswerValue, _: &Answers| -> Result<(), String> {
            match value.as_str() {
                Some(text) if text.parse::<i64>().is_ok() => Ok(()),
                _ => Err("must be a number".to_string()),
            }
        };
        let mut typed = vec!["3", "", "many"];
        let mut rejections = Vec::new();

        let answer = until_valid(
            &field,
            &Answers::new(),
            &validate,
            || Ok::<_, DialoguerError>(AnswerValue::String(typed.pop().unwrap().into())),
            |msg| rejections.push(msg.to_string()),
        )
        .unwrap();

        assert_eq!(answer, AnswerValue::String("3".into()));
        assert_eq!(rejections, vec!["must be a number", "must be a number"]);
    }

    #[test]
    fn prompt_errors_end_the_loop() {
        let field = Field::new("userLimit", "User limit", FieldKind::Input(InputField::new()));
        let validate =
            |_: &FieldPath, _: &AnswerValue, _: &Answers| -> Result<(), String> { Err("never".into()) };

        let result = until_valid(
            &field,
            &Answers::new(),
            &validate,
            || Err(DialoguerError::Cancelled),
            |_| panic!("nothing to reject"),
        );

        assert!(matches!(result, Err(DialoguerError::Cancelled)));
    }

    #[test]
    fn cancellation_maps_to_form_error() {
        let interrupted = dialoguer::Error::IO(std::io::Error::from(std::io::ErrorKind::Interrupted));
        let err: FormError = prompt_error(interrupted).into();
        assert!(err.is_cancelled());

        let broken = dialoguer::Error::IO(std::io::Error::from(std::io::ErrorKind::BrokenPipe));
        let err: FormError = prompt_error(broken).into();
        assert!(!err.is_cancelled());
    }
}
