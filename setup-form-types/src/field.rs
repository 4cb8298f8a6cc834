use crate::FieldPath;

/// A single field in a form.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// The path to this field's answer in the Answers map.
    path: FieldPath,

    /// The title shown to the user.
    title: String,

    /// Optional longer explanation shown under the title.
    description: Option<String>,

    /// The kind of field (determines input type).
    kind: FieldKind,
}

impl Field {
    /// Create a new field.
    pub fn new(path: impl Into<FieldPath>, title: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            description: None,
            kind,
        }
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Get the answer path for this field.
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Get the title text.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get the description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Get the field kind.
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Where this field's options come from, for pickers.
    pub fn option_source(&self) -> Option<&OptionSource> {
        match &self.kind {
            FieldKind::Select(select) => Some(&select.options),
            FieldKind::MultiSelect(multi) => Some(&multi.options),
            _ => None,
        }
    }
}

/// The kind of field, determining input type.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Single-line text input.
    Input(InputField),

    /// Pick exactly one option.
    Select(SelectField),

    /// Pick any number of options.
    MultiSelect(MultiSelectField),

    /// A two-way choice between labelled yes and no options.
    Toggle(ToggleField),

    /// Yes/no confirmation.
    Confirm(ConfirmField),
}

/// One selectable option: a label for display and a value for the answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub value: String,
}

impl Choice {
    /// Create a new choice.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Where a picker's options come from.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionSource {
    /// A fixed list known when the form is built.
    Static(Vec<Choice>),

    /// A list derived from the answer of another field.
    ///
    /// Whenever the answer at `on` changes the list is invalidated and
    /// resolved again. Without an answer at `on` the list is empty.
    Dependent { on: FieldPath },
}

impl OptionSource {
    /// The parent field, for dependent sources.
    pub fn parent(&self) -> Option<&FieldPath> {
        match self {
            Self::Static(_) => None,
            Self::Dependent { on } => Some(on),
        }
    }
}

/// Configuration for a text input field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputField {
    /// Text pre-filled for the user to accept or edit.
    pub default: Option<String>,

    /// Whether an empty answer is accepted.
    pub allow_empty: bool,
}

impl InputField {
    /// Create a new input field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a pre-filled value.
    pub fn with_default(default: impl Into<String>) -> Self {
        Self {
            default: Some(default.into()),
            allow_empty: false,
        }
    }

    /// Accept an empty answer.
    pub fn allowing_empty(mut self) -> Self {
        self.allow_empty = true;
        self
    }
}

/// Configuration for a single-select field.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectField {
    /// The options to choose from.
    pub options: OptionSource,

    /// Value of the option selected initially (if present among the options).
    pub default: Option<String>,
}

impl SelectField {
    /// Create a select over a fixed option list.
    pub fn new(options: Vec<Choice>) -> Self {
        Self {
            options: OptionSource::Static(options),
            default: None,
        }
    }

    /// Create a select whose options depend on another field.
    pub fn dependent(on: impl Into<FieldPath>) -> Self {
        Self {
            options: OptionSource::Dependent { on: on.into() },
            default: None,
        }
    }

    /// Set the initially selected value.
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// Configuration for a multi-select field.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiSelectField {
    /// The options to choose from.
    pub options: OptionSource,

    /// Values of the options selected initially.
    pub defaults: Vec<String>,
}

impl MultiSelectField {
    /// Create a multi-select over a fixed option list.
    pub fn new(options: Vec<Choice>) -> Self {
        Self {
            options: OptionSource::Static(options),
            defaults: Vec::new(),
        }
    }

    /// Create a multi-select whose options depend on another field.
    pub fn dependent(on: impl Into<FieldPath>) -> Self {
        Self {
            options: OptionSource::Dependent { on: on.into() },
            defaults: Vec::new(),
        }
    }

    /// Set the initially selected values.
    pub fn with_defaults(mut self, values: Vec<String>) -> Self {
        self.defaults = values;
        self
    }
}

/// Configuration for a two-way labelled choice producing a bool.
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleField {
    pub yes_label: String,
    pub no_label: String,
    pub default: bool,
}

impl ToggleField {
    /// Create a Yes/No toggle.
    pub fn new(default: bool) -> Self {
        Self {
            yes_label: "Yes".to_string(),
            no_label: "No".to_string(),
            default,
        }
    }

    /// The options in display order (yes first).
    pub fn labels(&self) -> [&str; 2] {
        [&self.yes_label, &self.no_label]
    }
}

/// Configuration for a yes/no confirmation field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfirmField {
    /// Default value (true for yes, false for no).
    pub default: bool,
}

impl ConfirmField {
    /// Create a new confirm field with default false.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dependent_select_names_parent() {
        let field = Field::new(
            "channelId",
            "Channel",
            FieldKind::Select(SelectField::dependent("guildId")),
        );

        assert_eq!(
            field.option_source().and_then(OptionSource::parent),
            Some(&FieldPath::new("guildId"))
        );
    }

    #[test]
    fn inputs_have_no_option_source() {
        let field = Field::new("userLimit", "User Limit", FieldKind::Input(InputField::new()));
        assert!(field.option_source().is_none());
    }

    #[test]
    fn toggle_labels_put_yes_first() {
        assert_eq!(ToggleField::new(false).labels(), ["Yes", "No"]);
    }
}
