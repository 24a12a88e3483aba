//! Login provider registry.
//!
//! Holds the social-login provider settings and the callback URL. The
//! registry is built once at startup and shared through the app state.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider '{0}' not found")]
    NotFound(String),
    #[error("Provider '{0}' is not configured")]
    NotConfigured(String),
    #[error("Failed to read provider file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid provider file: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid callback URL '{url}': {reason}")]
    InvalidCallback { url: String, reason: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderKeys {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub key: String,
}

impl ProviderKeys {
    fn is_empty(&self) -> bool {
        self.id.is_empty() && self.key.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub keys: ProviderKeys,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub icon: String,
}

/// Public description of a provider, safe to hand to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderSummary {
    pub name: String,
    pub code: String,
    pub icon: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ProviderFile {
    #[serde(default)]
    callback: String,
    #[serde(default)]
    providers: BTreeMap<String, ProviderConfig>,
}

#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    callback: Option<Url>,
    providers: BTreeMap<String, ProviderConfig>,
}

impl ProviderRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(
        callback: &str,
        providers: BTreeMap<String, ProviderConfig>,
    ) -> Result<Self, ProviderError> {
        let callback = if callback.trim().is_empty() {
            None
        } else {
            let url = Url::parse(callback).map_err(|e| ProviderError::InvalidCallback {
                url: callback.to_string(),
                reason: e.to_string(),
            })?;
            Some(url)
        };
        Ok(Self {
            callback,
            providers,
        })
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ProviderError> {
        let file: ProviderFile = serde_yaml::from_str(yaml)?;
        Self::new(&file.callback, file.providers)
    }

    /// Load from a YAML file; a missing path yields an empty registry
    pub fn load(path: Option<&Path>) -> Result<Self, ProviderError> {
        match path {
            Some(path) => {
                let yaml = std::fs::read_to_string(path)?;
                let registry = Self::from_yaml_str(&yaml)?;
                tracing::info!(
                    "Loaded {} login provider(s) from {}",
                    registry.providers.len(),
                    path.display()
                );
                Ok(registry)
            }
            None => Ok(Self::empty()),
        }
    }

    pub fn callback(&self) -> Option<&Url> {
        self.callback.as_ref()
    }

    /// Look up a provider, refusing ones that are disabled or lack keys
    pub fn provider(&self, key: &str) -> Result<&ProviderConfig, ProviderError> {
        let config = self
            .providers
            .get(key)
            .ok_or_else(|| ProviderError::NotFound(key.to_string()))?;
        if !config.enabled || config.keys.is_empty() {
            return Err(ProviderError::NotConfigured(key.to_string()));
        }
        Ok(config)
    }

    pub fn available(&self) -> Vec<ProviderSummary> {
        self.providers
            .values()
            .map(|p| ProviderSummary {
                name: p.name.clone(),
                code: p.code.clone(),
                icon: p.icon.clone(),
            })
            .collect()
    }
}
