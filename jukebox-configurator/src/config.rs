//! The bot's configuration record and its JSON file.

use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::SetupError;

pub const DEFAULT_PLAYBACK_TIMEOUT: i64 = 45;
pub const DEFAULT_SCREEN_NUMBER: i64 = 0;
pub const DEFAULT_USER_LIMIT: i64 = 1;

/// Settings read by the jukebox bot.
///
/// Absent keys decode to their zero value. Defaults only apply when no file
/// exists, see [`Config::first_run`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub discord_token: String,
    pub guild_id: String,
    pub channel_id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub admin_roles: Vec<String>,
    /// Managed by the bot itself.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub admin_users: Vec<String>,
    pub playback_timeout: i64,
    pub screen_number: i64,
    pub allow_self_swap: bool,
    pub user_limit: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mpv_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yt_dlp_path: Option<String>,
}

impl Config {
    /// The record used when no config file exists yet.
    pub fn first_run() -> Self {
        Self {
            playback_timeout: DEFAULT_PLAYBACK_TIMEOUT,
            screen_number: DEFAULT_SCREEN_NUMBER,
            user_limit: DEFAULT_USER_LIMIT,
            ..Self::default()
        }
    }

    /// Load the record at `path`.
    ///
    /// A file that cannot be opened yields [`Config::first_run`]. A file that
    /// opens but does not decode is an error.
    pub fn load(path: &Path) -> Result<Self, SetupError> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "config not readable, using defaults");
                return Ok(Self::first_run());
            }
        };

        let config: Config = serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            SetupError::ConfigDecode {
                path: path.to_path_buf(),
                source,
            }
        })?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Encode as two-space indented JSON with a trailing newline.
    pub fn to_json(&self) -> Result<String, SetupError> {
        let mut json = serde_json::to_string_pretty(self).map_err(SetupError::ConfigEncode)?;
        json.push('\n');
        Ok(json)
    }

    /// Replace the file at `path` with this record.
    ///
    /// The JSON goes to a temporary file next to the target which is then
    /// renamed over it, so the target is either fully replaced or left alone.
    /// A symlinked `path` updates the file it points at. An existing file
    /// keeps its permissions; a new one gets the usual umask-derived mode.
    pub fn save(&self, path: &Path) -> Result<(), SetupError> {
        let json = self.to_json()?;
        let write_err = |source| SetupError::ConfigWrite {
            path: path.to_path_buf(),
            source,
        };

        let target = resolve_link(path);
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let existing = fs::metadata(&target).ok().map(|meta| meta.permissions());

        let mut builder = tempfile::Builder::new();
        if existing.is_none() {
            new_file_mode(&mut builder);
        }
        let mut tmp = builder.tempfile_in(dir).map_err(write_err)?;
        if let Some(permissions) = existing {
            tmp.as_file().set_permissions(permissions).map_err(write_err)?;
        }
        tmp.write_all(json.as_bytes()).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        debug!(tmp = %tmp.path().display(), "wrote temporary config");

        tmp.persist(&target).map_err(|err| write_err(err.error))?;
        info!(path = %target.display(), "saved config");
        Ok(())
    }
}

/// The file `path` ends up at, following symlinks, even dangling ones.
fn resolve_link(path: &Path) -> PathBuf {
    if let Ok(real) = fs::canonicalize(path) {
        return real;
    }
    match fs::read_link(path) {
        Ok(link) => match path.parent() {
            Some(dir) => dir.join(link),
            None => link,
        },
        Err(_) => path.to_path_buf(),
    }
}

/// Temporary files default to 0600; the OS applies the umask to this mode.
#[cfg(unix)]
fn new_file_mode(builder: &mut tempfile::Builder<'_, '_>) {
    use std::os::unix::fs::PermissionsExt;

    builder.permissions(fs::Permissions::from_mode(0o666));
}

#[cfg(not(unix))]
fn new_file_mode(_: &mut tempfile::Builder<'_, '_>) {}
