use crate::error::{CraftsError, Result};
use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CraftsConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_name")]
    pub name: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: default_store_name(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Root of the catalog API, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Page size for the shop listing.
    #[serde(default = "default_product_limit")]
    pub product_limit: usize,
    /// Page size for the home page's featured products.
    #[serde(default = "default_featured_limit")]
    pub featured_limit: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            product_limit: default_product_limit(),
            featured_limit: default_featured_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default = "default_typing_delay_ms")]
    pub typing_delay_ms: u64,
    #[serde(default = "default_assistant_name")]
    pub assistant_name: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            typing_delay_ms: default_typing_delay_ms(),
            assistant_name: default_assistant_name(),
        }
    }
}

impl ChatConfig {
    pub fn typing_delay(&self) -> Duration {
        Duration::from_millis(self.typing_delay_ms)
    }
}

fn default_store_name() -> String {
    "CuratedCrafts".to_string()
}
fn default_base_url() -> String {
    "https://dummyjson.com".to_string()
}
fn default_product_limit() -> usize {
    30
}
fn default_featured_limit() -> usize {
    6
}
fn default_typing_delay_ms() -> u64 {
    600
}
fn default_assistant_name() -> String {
    "CuratedCrafts Assistant".to_string()
}

impl CraftsConfig {
    /// Load config with layered merging:
    /// 1. `~/.config/crafts/config.toml` (global)
    /// 2. `<project_dir>/.crafts/config.toml` (project)
    /// 3. `<project_dir>/.crafts/config.local.toml` (local, gitignored)
    pub fn load(project_dir: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                builder = builder.add_source(File::from(global_path).required(false));
            }
        }

        if let Some(dir) = project_dir {
            let project_config = dir.join(".crafts").join("config.toml");
            if project_config.exists() {
                builder = builder.add_source(File::from(project_config).required(false));
            }

            let local_config = dir.join(".crafts").join("config.local.toml");
            if local_config.exists() {
                builder = builder.add_source(File::from(local_config).required(false));
            }
        }

        let config = builder
            .build()
            .map_err(|e| CraftsError::Config(e.to_string()))?;

        let mut cfg: Self = config
            .try_deserialize()
            .map_err(|e| CraftsError::Config(e.to_string()))?;

        cfg.validate();
        Ok(cfg)
    }

    /// Defaults only (no files).
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Fix out-of-range values instead of rejecting the config. Each fix is
    /// logged and returned.
    pub fn validate(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();

        let trimmed = self.catalog.base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            warnings.push(format!(
                "catalog.base_url is empty, using {}",
                default_base_url()
            ));
            self.catalog.base_url = default_base_url();
        } else if trimmed.len() != self.catalog.base_url.len() {
            warnings.push(format!(
                "catalog.base_url {:?} trimmed to {trimmed:?}",
                self.catalog.base_url
            ));
            self.catalog.base_url = trimmed.to_string();
        }

        if self.catalog.product_limit == 0 {
            warnings.push("catalog.product_limit = 0, setting to 1".to_string());
            self.catalog.product_limit = 1;
        }
        if self.catalog.featured_limit == 0 {
            warnings.push("catalog.featured_limit = 0, setting to 1".to_string());
            self.catalog.featured_limit = 1;
        }

        if self.store.name.trim().is_empty() {
            warnings.push("store.name is empty, using default".to_string());
            self.store.name = default_store_name();
        }

        for w in &warnings {
            tracing::warn!("config: {}", w);
        }

        warnings
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CraftsError::Config(format!("failed to serialize config: {e}")))
    }
}

fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("crafts").join("config.toml"))
}
