//! Dashboard configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use backoffice_cache::DEFAULT_NAMESPACE;
use backoffice_data::DEFAULT_STORE_HEADER;
use serde::{Deserialize, Serialize};

/// API base used when neither the build nor the config file sets one.
pub const FALLBACK_API_URL: &str = "http://localhost:8001/api/";

/// Dashboard configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// REST API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Where the selection is persisted.
    #[serde(default)]
    pub storage: StorageConfig,
}

impl DashboardConfig {
    /// Load config from a file. `.json` files are read as JSON, anything
    /// else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Config that keeps the selection in memory only.
    pub fn ephemeral() -> Self {
        Self {
            storage: StorageConfig {
                path: None,
                ..StorageConfig::default()
            },
            ..Self::default()
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// REST API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base every request path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Name of the store-scoping header.
    #[serde(default = "default_store_header")]
    pub store_header: String,

    /// Root that relative logo paths are resolved against.
    #[serde(default = "default_public_url")]
    pub public_url: String,
}

/// `BACKOFFICE_API_URL` at build time, else [`FALLBACK_API_URL`].
fn default_base_url() -> String {
    option_env!("BACKOFFICE_API_URL")
        .unwrap_or(FALLBACK_API_URL)
        .to_string()
}

fn default_store_header() -> String {
    DEFAULT_STORE_HEADER.to_string()
}

fn default_public_url() -> String {
    "http://localhost:8001/public".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            store_header: default_store_header(),
            public_url: default_public_url(),
        }
    }
}

/// Selection persistence settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file holding the selection; `None` keeps it in memory.
    ///
    /// A `[storage]` table without `path` means in memory; only a missing
    /// `[storage]` table falls back to the default file.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Prefix of the persisted keys.
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

fn default_storage_path() -> Option<PathBuf> {
    Some(PathBuf::from(".backoffice/state.json"))
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            namespace: default_namespace(),
        }
    }
}
