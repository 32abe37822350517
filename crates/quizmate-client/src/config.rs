//! Client configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Connection settings for the quiz backend.
///
/// Note: Custom Debug impl masks the token to prevent accidental exposure
/// in logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token, supports `${VAR}` interpolation.
    #[serde(default)]
    pub token: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizmate.toml` in the current directory
/// 2. `~/.config/quizmate/config.toml`
///
/// Environment variable overrides: `QUIZMATE_BASE_URL`, `QUIZMATE_TOKEN`.
pub fn load_config() -> Result<ClientConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<ClientConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizmate.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<ClientConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ClientConfig::default(),
    };

    // Apply env var overrides
    if let Ok(url) = std::env::var("QUIZMATE_BASE_URL") {
        config.base_url = url;
    }
    if let Ok(token) = std::env::var("QUIZMATE_TOKEN") {
        config.token = Some(token);
    }

    config.base_url = resolve_env_vars(&config.base_url);
    config.token = config.token.as_deref().map(resolve_env_vars);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizmate"))
}
