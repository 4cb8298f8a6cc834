use crate::{Field, FieldPath};

/// One group of fields rendered together.
///
/// A definition is presentation-agnostic: it can be rendered as a sequence of
/// prompts or filled in programmatically.
#[derive(Debug, Clone, Default)]
pub struct FormDefinition {
    /// All fields, in render order. Dependent pickers come after their parent.
    pub fields: Vec<Field>,
}

impl FormDefinition {
    /// Create a new form definition with the given fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Get the fields.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Find a field by path.
    pub fn field(&self, path: &FieldPath) -> Option<&Field> {
        self.fields.iter().find(|field| field.path() == path)
    }

    /// Fields whose options depend on the field at `parent`.
    pub fn dependents_of<'a, 'p>(
        &'a self,
        parent: &'p FieldPath,
    ) -> impl Iterator<Item = &'a Field> + use<'a, 'p> {
        self.fields.iter().filter(move |field| {
            field
                .option_source()
                .and_then(|source| source.parent())
                .is_some_and(|on| on == parent)
        })
    }

    /// Check if the form has any fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Get the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldKind, InputField, MultiSelectField, SelectField};

    #[test]
    fn dependents_of_parent() {
        let form = FormDefinition::new(vec![
            Field::new("guildId", "Guild", FieldKind::Select(SelectField::new(vec![]))),
            Field::new(
                "channelId",
                "Channel",
                FieldKind::Select(SelectField::dependent("guildId")),
            ),
            Field::new(
                "adminRoles",
                "Admin Roles",
                FieldKind::MultiSelect(MultiSelectField::dependent("guildId")),
            ),
            Field::new("userLimit", "User Limit", FieldKind::Input(InputField::new())),
        ]);

        let parent = FieldPath::new("guildId");
        let dependents: Vec<_> = form
            .dependents_of(&parent)
            .map(|field| field.path().as_str())
            .collect();
        assert_eq!(dependents, vec!["channelId", "adminRoles"]);
    }

    #[test]
    fn dependents_outlive_a_temporary_parent() {
        let form = FormDefinition::new(vec![
            Field::new("guildId", "Guild", FieldKind::Select(SelectField::new(vec![]))),
            Field::new(
                "channelId",
                "Channel",
                FieldKind::Select(SelectField::dependent("guildId")),
            ),
        ]);

        let dependents: Vec<&Field> = form.dependents_of(&FieldPath::new("guildId")).collect();
        assert_eq!(dependents.len(), 1);
        assert_eq!(dependents[0].path().as_str(), "channelId");
        assert_eq!(form.dependents_of(&"userLimit".into()).count(), 0);
    }
}
