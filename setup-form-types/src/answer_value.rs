/// A single answer collected from a form.
///
/// This is the value stored in `Answers` for each answered field.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerValue {
    /// Free text (from Input fields).
    String(String),

    /// A yes/no value (from Confirm and Toggle fields).
    Bool(bool),

    /// The value of the chosen option in a Select field.
    Choice(String),

    /// The values of the chosen options in a MultiSelect field, in option order.
    Choices(Vec<String>),
}

impl AnswerValue {
    /// Try to get this value as a string reference.
    ///
    /// Both free text and a single choice count as strings.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Choice(s) => Some(s),
            _ => None,
        }
    }

    /// Get the type name of this value for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "String",
            Self::Bool(_) => "Bool",
            Self::Choice(_) => "Choice",
            Self::Choices(_) => "Choices",
        }
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<bool> for AnswerValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(values: Vec<String>) -> Self {
        Self::Choices(values)
    }
}
