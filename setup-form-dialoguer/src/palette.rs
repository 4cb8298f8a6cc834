//! Colour palette for prompts.

use console::{Style, StyledObject, style};
use dialoguer::theme::ColorfulTheme;

/// 256-colour palette applied on top of dialoguer's colourful theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Titles, selected items and the active cursor.
    pub primary: u8,
    /// Prompt markers and checkboxes.
    pub secondary: u8,
    /// Validation errors.
    pub error: u8,
    /// Option text.
    pub text: u8,
    /// Descriptions and hints.
    pub muted: u8,
}

impl Palette {
    /// Pastel pink and teal on the Dracula greys.
    pub const JUKEBOX: Palette = Palette {
        primary: 218,
        secondary: 152,
        error: 203,
        text: 146,
        muted: 61,
    };

    /// Build a dialoguer theme using this palette.
    pub fn theme(&self) -> ColorfulTheme {
        ColorfulTheme {
            defaults_style: Style::new().for_stderr().color256(self.muted),
            prompt_style: Style::new().for_stderr().bold().color256(self.primary),
            prompt_prefix: self.marker("?", self.secondary),
            success_prefix: self.marker("✔", self.secondary),
            error_prefix: self.marker("✘", self.error),
            error_style: Style::new().for_stderr().color256(self.error),
            hint_style: Style::new().for_stderr().color256(self.muted),
            values_style: Style::new().for_stderr().color256(self.primary),
            active_item_style: Style::new().for_stderr().color256(self.primary),
            inactive_item_style: Style::new().for_stderr().color256(self.text),
            active_item_prefix: self.marker("❯", self.secondary),
            checked_item_prefix: self.marker("✔", self.primary),
            unchecked_item_prefix: self.marker("⬚", self.text),
            ..ColorfulTheme::default()
        }
    }

    /// Style a field description.
    pub fn description<'a>(&self, text: &'a str) -> StyledObject<&'a str> {
        style(text).for_stderr().color256(self.muted)
    }

    fn marker(&self, symbol: &str, color: u8) -> StyledObject<String> {
        style(symbol.to_string()).for_stderr().color256(color)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::JUKEBOX
    }
}
