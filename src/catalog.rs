//! Catalog loading.
//!
//! The project list is either the built-in catalog or a TOML file of
//! `[[projects]]` tables:
//!
//! ```toml
//! [[projects]]
//! title = "Skin Lesion Classification and Segmentation"
//! description = "Computer vision workflow ..."
//! bullets = ["Reached 89% DICE score"]
//! tags = ["Computer Vision", "PyTorch"]
//! github = "https://github.com/SanaPatekari/ISIC_Image_Segmentation"
//! demo = ""
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use portfolio_core::catalog::Catalog;
use portfolio_core::models::ProjectRecord;

use crate::config::Config;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    projects: Vec<ProjectRecord>,
}

pub fn parse_catalog(content: &str) -> Result<Catalog> {
    let file: CatalogFile = toml::from_str(content).context("Failed to parse catalog file")?;
    Ok(Catalog::new(file.projects)?)
}

pub fn load_catalog_file(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;
    parse_catalog(&content).with_context(|| format!("Invalid catalog: {}", path.display()))
}

/// The configured catalog, or the built-in one when none is configured.
pub fn load_catalog(config: &Config) -> Result<Catalog> {
    match &config.catalog.path {
        Some(path) => {
            let catalog = load_catalog_file(path)?;
            tracing::info!(path = %path.display(), projects = catalog.len(), "loaded catalog");
            Ok(catalog)
        }
        None => {
            let catalog = Catalog::builtin();
            tracing::debug!(projects = catalog.len(), "using built-in catalog");
            Ok(catalog)
        }
    }
}
