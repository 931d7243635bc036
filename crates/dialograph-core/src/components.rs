use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DialographError, Result};

/// Component kind, namespaced as the first segment of a component id
/// (`interpreter.core.callback`, `action.core.webhook`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Interpreter,
    Action,
    Platform,
}

impl ComponentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Interpreter => "interpreter",
            Self::Action => "action",
            Self::Platform => "platform",
        }
    }

    /// Parse the type prefix out of a namespaced component id.
    pub fn parse_component_id(component_id: &str) -> Result<Self> {
        let prefix = component_id.split('.').next().unwrap_or_default();
        Self::from_name(prefix)
            .ok_or_else(|| DialographError::UnknownComponentType(component_id.to_string()))
    }

    /// Look up a type by its bare name, as used in list filters.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "interpreter" => Some(Self::Interpreter),
            "action" => Some(Self::Action),
            "platform" => Some(Self::Platform),
            _ => None,
        }
    }
}

impl std::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stored component configuration record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentConfiguration {
    pub id: String,
    pub name: String,
    pub scenario_id: String,
    pub component_id: String,
    pub configuration: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating or replacing a component configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigurationDraft {
    pub name: String,
    pub scenario_id: String,
    pub component_id: String,
    #[serde(default)]
    pub configuration: serde_json::Value,
}

impl ConfigurationDraft {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(DialographError::InvalidConfiguration(
                "name must not be empty".to_string(),
            ));
        }
        ComponentType::parse_component_id(&self.component_id)?;
        Ok(())
    }
}

/// Configuration keys stripped from every read path. Dot-separated entries
/// address nested documents.
pub const HIDDEN_FIELDS: &[&str] = &["access_token", "api_key", "private_key", "client_secret"];

/// Remove the given dot-path keys from a configuration document.
///
/// Storage keeps the full document; only outgoing representations are
/// redacted.
pub fn redact(configuration: &mut serde_json::Value, fields: &[&str]) {
    for field in fields {
        forget(configuration, field);
    }
}

fn forget(value: &mut serde_json::Value, path: &str) {
    let Some(object) = value.as_object_mut() else {
        return;
    };
    match path.split_once('.') {
        None => {
            object.remove(path);
        }
        Some((head, rest)) => {
            if let Some(child) = object.get_mut(head) {
                forget(child, rest);
            }
        }
    }
}
