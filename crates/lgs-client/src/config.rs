//! Client configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Where the backend lives and how to talk to it.
///
/// Note: Custom Debug impl masks the session cookie to keep it out of logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds. Unset means no timeout.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// `session=...` cookie obtained from `lgs login`.
    #[serde(default)]
    pub session_cookie: Option<String>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field(
                "session_cookie",
                &self.session_cookie.as_ref().map(|_| "***"),
            )
            .finish()
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
            session_cookie: None,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not rescanned.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without an explicit path:
/// 1. `lgs.toml` in the current directory
/// 2. `~/.config/lgs/config.toml`
///
/// Environment variable overrides: `LGS_BASE_URL`, `LGS_SESSION`.
pub fn load_config_from(path: Option<&Path>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("lgs.toml");
            if local.exists() {
                Some(local)
            } else {
                config_dir()
                    .map(|dir| dir.join("config.toml"))
                    .filter(|global| global.exists())
            }
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

    if let Ok(url) = std::env::var("LGS_BASE_URL") {
        config.base_url = url;
    }
    if let Ok(cookie) = std::env::var("LGS_SESSION") {
        config.session_cookie = Some(cookie);
    }

    config.base_url = resolve_env_vars(&config.base_url);
    config.session_cookie = config
        .session_cookie
        .as_deref()
        .map(resolve_env_vars)
        .filter(|c| !c.is_empty());

    Ok(config)
}

/// `$HOME/.config/lgs`, where the global config and saved session live.
pub fn config_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("lgs"))
}
