//! Read-only access to the Discord REST API.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

pub const API_BASE: &str = "https://discord.com/api/v10";

/// Channel type of a guild text channel.
pub const GUILD_TEXT: u8 = 0;

#[derive(Debug, Error)]
pub enum DiscordError {
    #[error("Discord request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Discord returned {status} for {endpoint}: {body}")]
    Status {
        endpoint: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Invalid bot token: {0}")]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Guild {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Channel {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: u8,
}

impl Channel {
    pub fn is_text(&self) -> bool {
        self.kind == GUILD_TEXT
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: String,
}

/// The chat platform queries the wizard needs.
pub trait ChatPlatform {
    /// Servers the bot belongs to, at most `limit` of them.
    fn user_guilds(&self, limit: usize) -> Result<Vec<Guild>, DiscordError>;

    fn guild_channels(&self, guild_id: &str) -> Result<Vec<Channel>, DiscordError>;

    fn guild_roles(&self, guild_id: &str) -> Result<Vec<Role>, DiscordError>;
}

/// Blocking Discord client authenticated with a bot token.
#[derive(Debug, Clone)]
pub struct DiscordClient {
    http: Client,
    base: String,
}

impl DiscordClient {
    pub fn new(token: &str) -> Result<Self, DiscordError> {
        Self::with_base(token, API_BASE)
    }

    /// Client against another API root, e.g. a local mock server.
    pub fn with_base(token: &str, base: impl Into<String>) -> Result<Self, DiscordError> {
        let mut auth = HeaderValue::from_str(&format!("Bot {token}"))?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        // Requests never time out.
        let http = Client::builder()
            .default_headers(headers)
            .timeout(None::<Duration>)
            .build()?;

        Ok(Self {
            http,
            base: base.into().trim_end_matches('/').to_string(),
        })
    }

    fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, DiscordError> {
        let url = format!("{}{endpoint}", self.base);
        debug!(%endpoint, "discord request");
        let response = self.http.get(&url).send()?;
        Ok(check(endpoint, response)?.json()?)
    }
}

fn check(endpoint: &str, response: Response) -> Result<Response, DiscordError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(DiscordError::Status {
        endpoint: endpoint.to_string(),
        status,
        body,
    })
}

impl ChatPlatform for DiscordClient {
    fn user_guilds(&self, limit: usize) -> Result<Vec<Guild>, DiscordError> {
        self.get(&format!("/users/@me/guilds?limit={limit}"))
    }

    fn guild_channels(&self, guild_id: &str) -> Result<Vec<Channel>, DiscordError> {
        self.get(&format!("/guilds/{guild_id}/channels"))
    }

    fn guild_roles(&self, guild_id: &str) -> Result<Vec<Role>, DiscordError> {
        self.get(&format!("/guilds/{guild_id}/roles"))
    }
}
