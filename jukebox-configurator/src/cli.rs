use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

/// How long the process stays around after the wizard finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Hold {
    /// Wait for Ctrl+C.
    Interrupt,
    /// Wait a few seconds.
    Delay,
    /// Exit right away.
    Exit,
}

impl Hold {
    pub const DELAY: Duration = Duration::from_secs(3);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "jukebox-configurator",
    about = "Set up the jukebox bot's config file",
    version
)]
pub struct Cli {
    /// Config file to read and write
    #[clap(short, long, env = "JUKEBOX_CONFIG", default_value = "config.json")]
    pub config: PathBuf,

    /// What to do once the wizard is done
    #[clap(long, value_enum, default_value = "interrupt")]
    pub hold: Hold,

    /// Log level (RUST_LOG takes precedence)
    #[clap(long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,

    /// Disable colours in prompts
    #[clap(long)]
    pub plain: bool,
}

impl Cli {
    /// Parse the process arguments, accepting `-config` as well.
    pub fn parse_normalized() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }
}

/// Rewrite the single-dash long flag `-config` (and `-config=...`) to
/// `--config`.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| match arg.to_str() {
            Some("-config") => OsString::from("--config"),
            Some(text) if text.starts_with("-config=") => OsString::from(format!("-{text}")),
            _ => arg,
        })
        .collect()
}
