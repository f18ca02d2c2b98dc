//! Configuration management
//!
//! Loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `SHOPFRONT_` prefix,
//!    `__` section separator)
//! 2. `./config.toml`
//! 3. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! # config.toml
//! [service]
//! name = "shopfront"
//! bind = "127.0.0.1:8080"
//!
//! [api]
//! base_url = "http://localhost:3000/api"
//!
//! [editor]
//! api_key = "tinymce-key"
//!
//! [uploads]
//! accept = "image/*"
//! max_size_mb = 5
//! ```

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// Service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name used in logs
    pub name: String,
    /// Socket address to bind
    pub bind: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "shopfront".to_string(),
            bind: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Upstream API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL of the upstream commerce API, fixed at startup
    pub base_url: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_string(),
        }
    }
}

/// Rich-text editor settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EditorSettings {
    /// API key for the third-party rich-text widget
    pub api_key: String,
}

/// Upload constraints (client-side hints; the upstream validates again)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadSettings {
    /// Accept attribute for file inputs
    pub accept: String,
    /// Maximum file size hint in megabytes
    pub max_size_mb: u32,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            accept: "image/*".to_string(),
            max_size_mb: 5,
        }
    }
}

/// Complete shopfront configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ShopfrontConfig {
    /// Service settings
    #[serde(default)]
    pub service: ServiceSettings,
    /// Upstream API settings
    #[serde(default)]
    pub api: ApiSettings,
    /// Rich-text editor settings
    #[serde(default)]
    pub editor: EditorSettings,
    /// Upload constraints
    #[serde(default)]
    pub uploads: UploadSettings,
}

impl ShopfrontConfig {
    /// Load configuration from defaults, `./config.toml`, and environment
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from("config.toml")
    }

    /// Load configuration from a specific TOML file plus the environment
    pub fn load_from(path: &str) -> anyhow::Result<Self> {
        let config = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("SHOPFRONT_").split("__"))
            .extract()?;
        Ok(config)
    }
}
