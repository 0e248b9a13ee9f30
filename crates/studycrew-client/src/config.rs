//! Client configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::http::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

/// Environment variable overriding `base_url`.
pub const API_URL_ENV: &str = "STUDYCREW_API_URL";

/// Top-level studycrew configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyCrewConfig {
    /// Backend base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Directory holding the persisted session.
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for StudyCrewConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            storage_dir: None,
        }
    }
}

impl StudyCrewConfig {
    /// Where the session is stored: `storage_dir`, else
    /// `~/.config/studycrew/session`, else `./.studycrew/session`.
    pub fn session_dir(&self) -> PathBuf {
        match &self.storage_dir {
            Some(dir) => dir.clone(),
            None => dirs_path()
                .unwrap_or_else(|| PathBuf::from(".studycrew"))
                .join("session"),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    let mut from = 0;
    while let Some(offset) = result[from..].find("${") {
        let start = from + offset;
        let Some(len) = result[start..].find('}') else {
            break;
        };
        let var_name = &result[start + 2..start + len];
        let value = std::env::var(var_name).unwrap_or_default();
        result = format!("{}{}{}", &result[..start], value, &result[start + len + 1..]);
        from = start + value.len();
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `studycrew.toml` in the current directory
/// 2. `~/.config/studycrew/config.toml`
///
/// `STUDYCREW_API_URL` overrides `base_url`.
pub fn load_config() -> Result<StudyCrewConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<StudyCrewConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("studycrew.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => StudyCrewConfig::default(),
    };

    if let Ok(url) = std::env::var(API_URL_ENV) {
        if !url.trim().is_empty() {
            config.base_url = url;
        }
    }

    Ok(config)
}

/// Parse a config document, expanding `${VAR}` references.
pub fn parse_config(content: &str) -> Result<StudyCrewConfig> {
    let mut config: StudyCrewConfig = toml::from_str(content)?;
    config.base_url = resolve_env_vars(&config.base_url);
    config.storage_dir = config
        .storage_dir
        .map(|dir| PathBuf::from(resolve_env_vars(&dir.to_string_lossy())));
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .filter(|h| !h.is_empty())
        .map(|h| PathBuf::from(h).join(".config").join("studycrew"))
}

/// Sample written by `studycrew init`.
pub const SAMPLE_CONFIG: &str = r#"# studycrew configuration

base_url = "http://localhost:3000"
timeout_secs = 30

# Where the signed-in session is kept (defaults to ~/.config/studycrew/session)
# storage_dir = "${HOME}/.config/studycrew/session"
"#;
