use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DialographError, Result};

/// Top-level Dialograph configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub graph: GraphConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Bearer token required on API routes. Unset disables auth.
    #[serde(default)]
    pub token: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            token: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Upper bound on rendered nodes per request (0 = unlimited).
    #[serde(default)]
    pub max_nodes: usize,
}

impl GraphConfig {
    pub fn node_limit(&self) -> Option<usize> {
        (self.max_nodes > 0).then_some(self.max_nodes)
    }
}

fn default_bind() -> String {
    "127.0.0.1:8484".to_string()
}

fn default_db_path() -> String {
    "dialograph.db".to_string()
}

impl AppConfig {
    /// Load configuration from a TOML file, expanding `${VAR}` references
    /// against the environment.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DialographError::ConfigNotFound(
                path.display().to_string(),
            ));
        }

        let raw = std::fs::read_to_string(path)?;
        let expanded = expand_env_vars(&raw);
        let config: AppConfig =
            toml::from_str(&expanded).map_err(|e| DialographError::Config(e.to_string()))?;

        debug!(path = %path.display(), "Configuration loaded");
        Ok(config)
    }
}

/// Replace `${VAR}` references with the value of the environment variable.
/// Unset variables leave the reference in place.
fn expand_env_vars(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        match rest[start + 2..].find('}') {
            Some(end) => {
                let name = &rest[start + 2..start + 2 + end];
                match std::env::var(name) {
                    Ok(value) => out.push_str(&value),
                    Err(_) => out.push_str(&rest[start..start + 3 + end]),
                }
                rest = &rest[start + 3 + end..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}
