use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{GuideChatError, Result};

/// Top-level configuration for the guidechat client.
///
/// Loaded from `~/.guidechat/config.toml` by default. Quick actions and other
/// presentation data live here rather than in the session controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuideChatConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub shell: ShellConfig,
    #[serde(default = "default_quick_actions")]
    pub quick_actions: Vec<QuickAction>,
}

impl Default for GuideChatConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            service: ServiceConfig::default(),
            shell: ShellConfig::default(),
            quick_actions: default_quick_actions(),
        }
    }
}

impl GuideChatConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: GuideChatConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| GuideChatError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Where the Conversation Service lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base address, without a trailing path.
    pub base_url: String,
    /// Path of the chat endpoint, appended to `base_url`.
    pub chat_path: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            chat_path: "/api/chat/".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Full URL of the chat endpoint.
    pub fn chat_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.chat_path.trim_start_matches('/')
        )
    }
}

/// Terminal shell presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Show the intent and confidence line under bot replies.
    pub show_intent: bool,
    /// Prefix each message with its local time.
    pub show_timestamps: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            show_intent: true,
            show_timestamps: true,
        }
    }
}

/// A predefined shortcut: choosing it submits `query` as if typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickAction {
    pub label: String,
    pub query: String,
}

impl QuickAction {
    pub fn new(label: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            query: query.into(),
        }
    }
}

fn default_quick_actions() -> Vec<QuickAction> {
    vec![
        QuickAction::new(
            "Park Information",
            "Tell me about Bale Mountains National Park",
        ),
        QuickAction::new("How to Get There", "How do I get to Bale Mountains?"),
        QuickAction::new("Accommodations", "What are the accommodation options?"),
        QuickAction::new("Activities", "What activities can I do in the park?"),
        QuickAction::new("Best Time to Visit", "When is the best time to visit?"),
        QuickAction::new("Park Fees", "What are the park entrance fees?"),
    ]
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GuideChatConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.service.base_url, "http://localhost:8000");
        assert_eq!(config.quick_actions.len(), 6);
        assert_eq!(config.quick_actions[0].label, "Park Information");
    }

    #[test]
    fn test_chat_url_joins_cleanly() {
        let mut service = ServiceConfig::default();
        assert_eq!(service.chat_url(), "http://localhost:8000/api/chat/");

        service.base_url = "https://guide.example.org/".to_string();
        assert_eq!(service.chat_url(), "https://guide.example.org/api/chat/");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let toml_str = r#"
            [service]
            base_url = "http://10.0.0.5:9000"
        "#;
        let config: GuideChatConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.service.base_url, "http://10.0.0.5:9000");
        assert_eq!(config.service.chat_path, "/api/chat/");
        assert!(config.shell.show_intent);
        assert_eq!(config.quick_actions.len(), 6);
    }

    #[test]
    fn test_custom_quick_actions_replace_defaults() {
        let toml_str = r#"
            [[quick_actions]]
            label = "Weather"
            query = "What is the weather like?"
        "#;
        let config: GuideChatConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.quick_actions,
            vec![QuickAction::new("Weather", "What is the weather like?")]
        );
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = GuideChatConfig::default();
        config.general.log_level = "debug".to_string();
        config.shell.show_timestamps = false;
        config.save(&path).unwrap();

        let loaded = GuideChatConfig::load(&path).unwrap();
        assert_eq!(loaded.general.log_level, "debug");
        assert!(!loaded.shell.show_timestamps);
        assert_eq!(loaded.quick_actions, config.quick_actions);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let result = GuideChatConfig::load(Path::new("/nonexistent/guidechat.toml"));
        assert!(matches!(result, Err(GuideChatError::Io(_))));
    }

    #[test]
    fn test_load_bad_toml_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[service\nbase_url = ").unwrap();
        assert!(matches!(
            GuideChatConfig::load(&path),
            Err(GuideChatError::Config(_))
        ));
    }
}
