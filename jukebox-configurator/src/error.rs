use std::path::PathBuf;

use setup_form::FormError;
use thiserror::Error;

use crate::discord::DiscordError;

/// Errors that end a configurator run.
#[derive(Debug, Error)]
pub enum SetupError {
    /// The config file exists but is not valid JSON for the record.
    #[error("Could not read config file {}: {source}", path.display())]
    ConfigDecode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not write config file {}: {source}", path.display())]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not encode config: {0}")]
    ConfigEncode(#[source] serde_json::Error),

    #[error(transparent)]
    Platform(#[from] DiscordError),

    #[error("No servers found! Add the bot to a server first.")]
    NoGuilds,

    #[error(transparent)]
    Form(#[from] FormError),
}

impl SetupError {
    /// Whether the operator interrupted a prompt.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SetupError::Form(err) if err.is_cancelled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_guilds_message() {
        assert_eq!(
            SetupError::NoGuilds.to_string(),
            "No servers found! Add the bot to a server first."
        );
    }

    #[test]
    fn cancellation_is_recognised() {
        assert!(SetupError::Form(FormError::Cancelled).is_cancelled());
        assert!(!SetupError::NoGuilds.is_cancelled());
    }
}
