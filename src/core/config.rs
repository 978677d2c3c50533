//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.ragchat/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RagchatConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BackendConfig {
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UiConfig {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub assistant_name: Option<String>,
    pub welcome: Option<String>,
    pub placeholder: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TITLE: &str = "Spapperi RAG Agent";
pub const DEFAULT_SUBTITLE: &str = "AI-Powered Assistant for Agricultural Machinery";
pub const DEFAULT_ASSISTANT_NAME: &str = "Spapperi Assistant";
pub const DEFAULT_WELCOME: &str =
    "Ask me anything about Spapperi's agricultural machinery and products.";
pub const DEFAULT_PLACEHOLDER: &str = "Ask a question about Spapperi products...";

pub const ENV_API_URL: &str = "RAGCHAT_API_URL";
pub const ENV_REQUEST_TIMEOUT: &str = "RAGCHAT_REQUEST_TIMEOUT_SECS";

// ============================================================================
// Resolved Config (concrete values, no Options except where None is meaningful)
// ============================================================================

/// Product copy shown around the conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct UiCopy {
    pub title: String,
    pub subtitle: String,
    pub assistant_name: String,
    pub welcome: String,
    pub placeholder: String,
}

impl Default for UiCopy {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            subtitle: DEFAULT_SUBTITLE.to_string(),
            assistant_name: DEFAULT_ASSISTANT_NAME.to_string(),
            welcome: DEFAULT_WELCOME.to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub base_url: String,
    /// `None` = no client-side timeout.
    pub request_timeout: Option<Duration>,
    pub ui: UiCopy,
}

/// Values supplied on the command line. `None` = flag not given.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.ragchat/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".ragchat").join("config.toml"))
}

/// Load config from `~/.ragchat/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `RagchatConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<RagchatConfig, ConfigError> {
    let Some(path) = config_path() else {
        warn!("Could not determine home directory, using default config");
        return Ok(RagchatConfig::default());
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(RagchatConfig::default());
    }

    load_config_from(&path)
}

/// Parse a config file at an explicit path.
pub fn load_config_from(path: &Path) -> Result<RagchatConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: RagchatConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# ragchat configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [backend]
# base_url = "http://localhost:8000"     # Or set RAGCHAT_API_URL
# request_timeout_secs = 60               # Omit for no client-side timeout

# [ui]
# title = "Spapperi RAG Agent"
# subtitle = "AI-Powered Assistant for Agricultural Machinery"
# assistant_name = "Spapperi Assistant"
# welcome = "Ask me anything about Spapperi's agricultural machinery and products."
# placeholder = "Ask a question about Spapperi products..."
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config from the process environment.
pub fn resolve(config: &RagchatConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Collapse defaults → config file → env → CLI. `env` looks up a variable.
pub fn resolve_with_env<F>(config: &RagchatConfig, cli: &CliOverrides, env: F) -> ResolvedConfig
where
    F: Fn(&str) -> Option<String>,
{
    let base_url = cli
        .api_url
        .clone()
        .or_else(|| env(ENV_API_URL))
        .or_else(|| config.backend.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let env_timeout = env(ENV_REQUEST_TIMEOUT).and_then(|raw| match raw.trim().parse::<u64>() {
        Ok(secs) => Some(secs),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a whole number of seconds", ENV_REQUEST_TIMEOUT, raw);
            None
        }
    });
    let request_timeout = cli
        .timeout_secs
        .or(env_timeout)
        .or(config.backend.request_timeout_secs)
        .filter(|&secs| secs > 0)
        .map(Duration::from_secs);

    let defaults = UiCopy::default();
    let ui = &config.ui;
    let ui = UiCopy {
        title: ui.title.clone().unwrap_or(defaults.title),
        subtitle: ui.subtitle.clone().unwrap_or(defaults.subtitle),
        assistant_name: ui.assistant_name.clone().unwrap_or(defaults.assistant_name),
        welcome: ui.welcome.clone().unwrap_or(defaults.welcome),
        placeholder: ui.placeholder.clone().unwrap_or(defaults.placeholder),
    };

    ResolvedConfig {
        base_url,
        request_timeout,
        ui,
    }
}
