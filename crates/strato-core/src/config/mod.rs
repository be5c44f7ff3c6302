use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, StratoError};
use crate::types::ProviderKind;

/// Top-level Strato configuration stored as TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StratoConfig {
    #[serde(default)]
    pub workers: WorkersConfig,
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
}

/// Worker-pool settings for blocking dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkersConfig {
    /// Number of worker threads; 0 uses the runtime default.
    #[serde(default)]
    pub worker_threads: usize,
}

impl Default for WorkersConfig {
    fn default() -> Self {
        Self { worker_threads: 0 }
    }
}

/// One configured backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ProviderKind,
    /// Bucket name (S3, GCS).
    #[serde(default)]
    pub bucket: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    /// Custom endpoint URL for S3-compatible services (MinIO, Garage, etc.)
    #[serde(default)]
    pub endpoint_url: Option<String>,
    /// Path-style addressing; defaults to true when an endpoint URL is set.
    #[serde(default)]
    pub path_style: Option<bool>,
    #[serde(default)]
    pub access_key: Option<String>,
    #[serde(default)]
    pub secret_key: Option<String>,
    /// Storage account name (Azure).
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default)]
    pub account_key: Option<String>,
    /// Blob container name (Azure).
    #[serde(default)]
    pub container: Option<String>,
    /// Base directory (local).
    #[serde(default)]
    pub root: Option<String>,
    #[serde(default)]
    pub log_enabled: bool,
}

/// Extract a required setting or fail with the missing-configuration error.
pub fn require<'a>(value: &'a Option<String>, what: &str) -> Result<&'a str> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| StratoError::MissingConfiguration(what.to_string()))
}

impl ProviderConfig {
    /// Check the per-kind required settings. Runs at provider construction,
    /// never at call time.
    pub fn validate(&self) -> Result<()> {
        match self.kind {
            ProviderKind::S3 => {
                require(&self.bucket, "S3 bucket name")?;
            }
            ProviderKind::Gcs => {
                require(&self.bucket, "GCS bucket name")?;
            }
            ProviderKind::Azure => {
                require(&self.account, "Azure account name")?;
                require(&self.account_key, "Azure account key")?;
                require(&self.container, "Azure container name")?;
            }
            ProviderKind::Local => {
                require(&self.root, "local root directory")?;
            }
            ProviderKind::Memory => {}
        }
        Ok(())
    }
}

impl StratoConfig {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(StratoError::MissingConfiguration(format!(
                "config file not found at {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| StratoError::storage(format!("failed to read {}", path.display()), e))?;
        let config: StratoConfig = toml::from_str(&content)
            .map_err(|e| StratoError::MissingConfiguration(e.to_string()))?;
        Ok(config)
    }

    /// Save config to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| StratoError::Validation(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StratoError::storage(format!("failed to create {}", parent.display()), e)
            })?;
        }
        std::fs::write(path, content)
            .map_err(|e| StratoError::storage(format!("failed to write {}", path.display()), e))
    }

    /// Validate every configured provider.
    pub fn validate(&self) -> Result<()> {
        for provider in &self.providers {
            provider.validate()?;
        }
        Ok(())
    }

    /// Find a configured provider by name.
    pub fn provider(&self, name: &str) -> Result<&ProviderConfig> {
        self.providers
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| StratoError::InvalidProvider(name.to_string()))
    }

    /// Resolve the config file path: `<base_dir>/strato.toml`
    pub fn default_path(base_dir: &Path) -> PathBuf {
        base_dir.join("strato.toml")
    }

    /// Resolve the default strato home directory: `~/.strato`
    pub fn default_base_dir() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|h| h.join(".strato"))
            .ok_or_else(|| {
                StratoError::MissingConfiguration("Cannot determine home directory".to_string())
            })
    }
}

impl Default for StratoConfig {
    fn default() -> Self {
        Self {
            workers: WorkersConfig::default(),
            providers: vec![ProviderConfig {
                name: "memory".to_string(),
                kind: ProviderKind::Memory,
                bucket: None,
                region: None,
                endpoint_url: None,
                path_style: None,
                access_key: None,
                secret_key: None,
                account: None,
                account_key: None,
                container: None,
                root: None,
                log_enabled: false,
            }],
        }
    }
}
