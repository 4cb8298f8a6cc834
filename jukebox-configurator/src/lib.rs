//! # jukebox-configurator
//!
//! Interactive setup for the jukebox bot. Reads the bot's JSON config, asks
//! for a Discord token, then lets the operator pick a server, channel and
//! admin roles from live API data and edit the remaining settings. The
//! record is written back only if the operator confirms.
//!
//! The wizard runs on any `setup_form::FormBackend`; the binary uses
//! `setup_form_dialoguer::DialoguerBackend`.

pub mod cli;
pub mod config;
pub mod discord;
pub mod error;
pub mod logging;
pub mod validate;
pub mod wizard;

pub use config::Config;
pub use discord::{ChatPlatform, DiscordClient, DiscordError};
pub use error::SetupError;
pub use wizard::{GUILD_LIST_LIMIT, Outcome};
