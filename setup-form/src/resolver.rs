//! Option resolution for pickers, including the dependent-picker rule.

use std::cell::RefCell;
use std::collections::HashMap;

use setup_form_types::{Answers, Choice, Field, FieldPath, OptionSource, ResolveOptions};
use tracing::debug;

/// Looks up the options of a dependent picker for one parent value.
pub trait OptionProvider {
    /// Options for the field at `field` when its parent is answered with `parent`.
    fn provide(&self, field: &FieldPath, parent: &str) -> anyhow::Result<Vec<Choice>>;
}

impl<F> OptionProvider for F
where
    F: Fn(&FieldPath, &str) -> anyhow::Result<Vec<Choice>>,
{
    fn provide(&self, field: &FieldPath, parent: &str) -> anyhow::Result<Vec<Choice>> {
        self(field, parent)
    }
}

/// The options of one dependent field, and the parent value they belong to.
#[derive(Debug, Clone)]
struct CachedOptions {
    parent: String,
    choices: Vec<Choice>,
}

/// Resolves picker options and keeps dependent lists in step with their parent.
///
/// - Static sources return their fixed list.
/// - Dependent sources return an empty list while the parent is unanswered.
/// - When the parent answer differs from the one the cached list was built
///   for, the list is dropped and requested again from the provider.
pub struct OptionResolver<P> {
    provider: P,
    cache: RefCell<HashMap<FieldPath, CachedOptions>>,
}

impl<P: OptionProvider> OptionResolver<P> {
    /// Create a resolver over the given provider.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// The options `field` offers given the answers so far.
    pub fn resolve(&self, field: &Field, answers: &Answers) -> anyhow::Result<Vec<Choice>> {
        match field.option_source() {
            None => Ok(Vec::new()),
            Some(OptionSource::Static(choices)) => Ok(choices.clone()),
            Some(OptionSource::Dependent { on }) => self.dependent(field.path(), on, answers),
        }
    }

    fn dependent(
        &self,
        field: &FieldPath,
        on: &FieldPath,
        answers: &Answers,
    ) -> anyhow::Result<Vec<Choice>> {
        let Some(parent) = answers
            .get(on)
            .and_then(|value| value.as_str())
            .filter(|value| !value.is_empty())
        else {
            debug!(field = %field, parent = %on, "parent unanswered, no options");
            return Ok(Vec::new());
        };

        if let Some(cached) = self.cache.borrow().get(field)
            && cached.parent == parent
        {
            return Ok(cached.choices.clone());
        }

        debug!(field = %field, parent = %on, value = parent, "resolving dependent options");
        let choices = self.provider.provide(field, parent)?;
        self.cache.borrow_mut().insert(
            field.clone(),
            CachedOptions {
                parent: parent.to_string(),
                choices: choices.clone(),
            },
        );
        Ok(choices)
    }
}

impl<P: OptionProvider> ResolveOptions for OptionResolver<P> {
    fn options(&self, field: &Field, answers: &Answers) -> anyhow::Result<Vec<Choice>> {
        self.resolve(field, answers)
    }
}

/// Resolver for forms without dependent pickers.
///
/// Dependent sources resolve to an empty list.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticOptions;

impl ResolveOptions for StaticOptions {
    fn options(&self, field: &Field, _answers: &Answers) -> anyhow::Result<Vec<Choice>> {
        match field.option_source() {
            Some(OptionSource::Static(choices)) => Ok(choices.clone()),
            _ => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use setup_form_types::{AnswerValue, FieldKind, SelectField};

    use super::*;

    fn channel_field() -> Field {
        Field::new(
            "channelId",
            "Channel",
            FieldKind::Select(SelectField::dependent("guildId")),
        )
    }

    #[test]
    fn unanswered_parent_yields_no_options_without_lookup() {
        let calls = Cell::new(0);
        let resolver = OptionResolver::new(|_: &FieldPath, _: &str| -> anyhow::Result<Vec<Choice>> {
            calls.set(calls.get() + 1);
            Ok(vec![Choice::new("general", "1")])
        });

        let options = resolver.resolve(&channel_field(), &Answers::new()).unwrap();
        assert!(options.is_empty());

        let mut answers = Answers::new();
        answers.insert("guildId", AnswerValue::Choice(String::new()));
        let options = resolver.resolve(&channel_field(), &answers).unwrap();
        assert!(options.is_empty());

        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn parent_change_invalidates_options() {
        let calls = Cell::new(0);
        let resolver = OptionResolver::new(|_: &FieldPath, guild: &str| -> anyhow::Result<Vec<Choice>> {
            calls.set(calls.get() + 1);
            Ok(vec![Choice::new(format!("general-{guild}"), format!("{guild}-1"))])
        });
        let field = channel_field();

        let mut answers = Answers::new();
        answers.insert("guildId", AnswerValue::Choice("a".into()));
        let first = resolver.resolve(&field, &answers).unwrap();
        let again = resolver.resolve(&field, &answers).unwrap();
        assert_eq!(first, again);
        assert_eq!(calls.get(), 1);

        answers.insert("guildId", AnswerValue::Choice("b".into()));
        let changed = resolver.resolve(&field, &answers).unwrap();
        assert_eq!(changed, vec![Choice::new("general-b", "b-1")]);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn provider_errors_propagate() {
        let resolver = OptionResolver::new(|_: &FieldPath, _: &str| -> anyhow::Result<Vec<Choice>> {
            anyhow::bail!("lookup failed")
        });
        let mut answers = Answers::new();
        answers.insert("guildId", AnswerValue::Choice("a".into()));

        let err = resolver.resolve(&channel_field(), &answers).unwrap_err();
        assert_eq!(err.to_string(), "lookup failed");
    }

    #[test]
    fn static_options_pass_through() {
        let field = Field::new(
            "guildId",
            "Guild",
            FieldKind::Select(SelectField::new(vec![Choice::new("Home", "1")])),
        );
        let options = StaticOptions.options(&field, &Answers::new()).unwrap();
        assert_eq!(options, vec![Choice::new("Home", "1")]);

        assert!(StaticOptions.options(&channel_field(), &Answers::new()).unwrap().is_empty());
    }
}
