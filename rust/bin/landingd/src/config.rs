//! Server configuration.
//!
//! Loaded from a TOML file; a bare context name resolves to
//! `/etc/landingd/<name>.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level server configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub security: SecurityConfig,

    #[serde(default)]
    pub geocode: GeocodeConfig,

    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the SQLite database.
    #[serde(default)]
    pub data_dir: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Shared secret for the referral write path and admin reads
    /// (`X-API-KEY` header).
    #[serde(default)]
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeConfig {
    /// OpenCage API key. Empty disables geocoding: locations are stored
    /// without a city.
    #[serde(default)]
    pub api_key: String,

    /// Geocoding endpoint, overridable for tests/self-hosted mirrors.
    #[serde(default = "default_geocode_endpoint")]
    pub endpoint: String,
}

impl Default for GeocodeConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: default_geocode_endpoint(),
        }
    }
}

fn default_geocode_endpoint() -> String {
    leads::geocode::OPENCAGE_ENDPOINT.to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Browser origins allowed to call the API. Empty means any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Resolve a context name or path to a config file path.
    ///
    /// A name without `/` or `.` maps to `/etc/landingd/<name>.toml`;
    /// anything else is used as a path directly.
    pub fn resolve_path(name_or_path: &str) -> PathBuf {
        if name_or_path.contains('/') || name_or_path.contains('.') {
            PathBuf::from(name_or_path)
        } else {
            PathBuf::from(format!("/etc/landingd/{}.toml", name_or_path))
        }
    }

    /// Load configuration from disk.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ServerConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Path of the SQLite database inside the data dir.
    pub fn resolve_sqlite_path(&self) -> PathBuf {
        PathBuf::from(&self.storage.data_dir).join("landing.sqlite")
    }
}
