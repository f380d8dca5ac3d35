//! CLI argument definitions for the guidechat shell.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

/// Where replies come from for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceMode {
    /// The remote Conversation Service over HTTP.
    Http,
    /// The built-in keyword responder, optionally with a custom intents file.
    Offline(Option<PathBuf>),
}

/// guidechat: a terminal guide to Bale Mountains National Park.
#[derive(Parser, Debug)]
#[command(name = "guidechat", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Base URL of the Conversation Service (e.g. http://localhost:8000).
    #[arg(long = "api-url")]
    pub api_url: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Answer locally from an intents document instead of calling the service.
    #[arg(long = "offline", value_name = "INTENTS", num_args = 0..=1)]
    pub offline: Option<Option<PathBuf>>,

    /// Write the effective configuration to the config path and exit.
    #[arg(long = "init-config")]
    pub init_config: bool,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > GUIDECHAT_CONFIG env var > ~/.guidechat/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("GUIDECHAT_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the service base URL.
    ///
    /// Priority: --api-url flag > GUIDECHAT_API_URL env var > config file value.
    pub fn resolve_api_url(&self, config_url: &str) -> String {
        pick(
            self.api_url.as_deref(),
            std::env::var("GUIDECHAT_API_URL").ok().as_deref(),
            config_url,
        )
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        pick(self.log_level.as_deref(), None, config_level)
    }

    pub fn service_mode(&self) -> ServiceMode {
        match &self.offline {
            Some(intents) => ServiceMode::Offline(intents.clone()),
            None => ServiceMode::Http,
        }
    }
}

/// First non-blank of flag, env value, file value.
fn pick(flag: Option<&str>, env: Option<&str>, file: &str) -> String {
    flag.into_iter()
        .chain(env)
        .map(str::trim)
        .find(|v| !v.is_empty())
        .unwrap_or(file)
        .to_string()
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".guidechat").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".guidechat").join("config.toml");
    }
    PathBuf::from("config.toml")
}
