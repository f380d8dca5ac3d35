//! guidechat binary - composition root.
//!
//! 1. Parse CLI flags and load configuration from TOML
//! 2. Install tracing (stderr, so logs never interleave with the transcript)
//! 3. Pick the Conversation Service: HTTP, or the offline keyword responder
//! 4. Run the interactive shell over one session

mod cli;
mod shell;

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use guidechat_chat::{
    ConversationService, HttpConversationService, KeywordResponder, SessionController,
};
use guidechat_core::config::{GeneralConfig, GuideChatConfig};
use guidechat_core::GuideChatError;

use cli::{CliArgs, ServiceMode};
use shell::Shell;

fn init_tracing(level: &str) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();
}

/// Read the config file if there is one. A missing file is not an error.
fn read_config(path: &Path) -> Result<Option<GuideChatConfig>, GuideChatError> {
    if !path.exists() {
        return Ok(None);
    }
    GuideChatConfig::load(path).map(Some)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config is read before tracing so its log level can apply.
    let config_file = args.resolve_config_path();
    let loaded = read_config(&config_file);
    let file_level = match &loaded {
        Ok(Some(config)) => config.general.log_level.clone(),
        _ => GeneralConfig::default().log_level,
    };
    init_tracing(&args.resolve_log_level(&file_level));

    tracing::info!("Starting guidechat v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match loaded {
        Ok(Some(config)) => {
            tracing::info!(path = %config_file.display(), "Configuration loaded");
            config
        }
        Ok(None) => {
            tracing::debug!(path = %config_file.display(), "No config file, using defaults");
            GuideChatConfig::default()
        }
        Err(e) => {
            tracing::warn!(
                path = %config_file.display(),
                error = %e,
                "Failed to load config, using defaults"
            );
            GuideChatConfig::default()
        }
    };
    config.service.base_url = args.resolve_api_url(&config.service.base_url);

    if args.init_config {
        config.save(&config_file)?;
        println!("Wrote {}", config_file.display());
        return Ok(());
    }

    let service: Arc<dyn ConversationService> = match args.service_mode() {
        ServiceMode::Http => {
            let http = HttpConversationService::from_config(&config.service);
            tracing::info!(url = %http.chat_url(), "Using Conversation Service");
            Arc::new(http)
        }
        ServiceMode::Offline(Some(path)) => Arc::new(KeywordResponder::from_path(&path)?),
        ServiceMode::Offline(None) => {
            tracing::info!("Using built-in offline responder");
            Arc::new(KeywordResponder::builtin()?)
        }
    };

    let controller = SessionController::new(service);
    tracing::info!(session_id = %controller.session_id(), "Session started");

    let mut shell = Shell::new(controller, config.shell, config.quick_actions);
    shell.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = read_config(&dir.path().join("absent.toml")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_existing_config_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[general]\nlog_level = \"debug\"\n").unwrap();
        let loaded = read_config(&path).unwrap().unwrap();
        assert_eq!(loaded.general.log_level, "debug");
    }

    #[test]
    fn test_broken_config_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[general\n").unwrap();
        assert!(read_config(&path).is_err());
    }
}
