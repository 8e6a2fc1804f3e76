use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use portfolio_core::links::{PlaceholderPolicy, DEFAULT_PLACEHOLDER_PATTERNS};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub links: LinksConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            owner: None,
            tagline: None,
        }
    }
}

fn default_title() -> String {
    "Portfolio".to_string()
}

/// Where the project list comes from. `None` means the built-in catalog.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LinksConfig {
    #[serde(default = "default_placeholder_patterns")]
    pub placeholder_patterns: Vec<String>,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            placeholder_patterns: default_placeholder_patterns(),
        }
    }
}

fn default_placeholder_patterns() -> Vec<String> {
    DEFAULT_PLACEHOLDER_PATTERNS
        .iter()
        .map(|p| p.to_string())
        .collect()
}

impl LinksConfig {
    pub fn policy(&self) -> PlaceholderPolicy {
        PlaceholderPolicy::new(self.placeholder_patterns.iter().cloned())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeConfig {
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("./data/prefs.json")
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7340".to_string()
}

impl Config {
    /// Defaults for every section; used when no config file exists.
    pub fn minimal() -> Self {
        Self {
            site: SiteConfig::default(),
            catalog: CatalogConfig::default(),
            links: LinksConfig::default(),
            theme: ThemeConfig::default(),
            server: ServerConfig::default(),
        }
    }

    /// Resolves relative paths against `base` (the config file's directory).
    fn resolve_paths(&mut self, base: &Path) {
        if let Some(path) = self.catalog.path.as_mut() {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        if self.theme.store_path.is_relative() {
            self.theme.store_path = base.join(&self.theme.store_path);
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let mut config: Config =
        toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.site.title.trim().is_empty() {
        anyhow::bail!("site.title must not be empty");
    }

    if config
        .links
        .placeholder_patterns
        .iter()
        .any(|p| p.trim().is_empty())
    {
        anyhow::bail!("links.placeholder_patterns must not contain empty patterns");
    }

    if config.server.bind.trim().is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    config.resolve_paths(base);

    Ok(config)
}

/// Loads `path` when it exists, otherwise falls back to [`Config::minimal`].
pub fn load_or_default(path: &Path) -> Result<Config> {
    if path.exists() {
        load_config(path)
    } else {
        tracing::debug!(path = %path.display(), "config file not found, using defaults");
        Ok(Config::minimal())
    }
}
