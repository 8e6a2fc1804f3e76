//! Export the catalog as JSON for client-side search on static hosts.
//!
//! Produces a `projects.json` with every project, the tag index, and the
//! placeholder patterns, so a page script can filter without the server.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;

use portfolio_core::catalog::Catalog;
use portfolio_core::models::ProjectRecord;
use portfolio_core::tags::tag_index;

use crate::catalog::load_catalog;
use crate::config::Config;

#[derive(Serialize)]
struct ExportData<'a> {
    site: &'a str,
    tags: Vec<String>,
    placeholder_patterns: &'a [String],
    projects: &'a [ProjectRecord],
}

pub fn export_json(config: &Config, catalog: &Catalog) -> Result<String> {
    let policy = config.links.policy();
    let data = ExportData {
        site: &config.site.title,
        tags: tag_index(catalog),
        placeholder_patterns: policy.patterns(),
        projects: catalog.projects(),
    };
    Ok(serde_json::to_string_pretty(&data)?)
}

/// If `output` is `Some`, writes to that file path. Otherwise writes to
/// stdout for piping.
pub fn run_export(config: &Config, output: Option<&Path>) -> Result<()> {
    let catalog = load_catalog(config)?;
    let json = export_json(config, &catalog)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &json)?;
            eprintln!(
                "Exported {} projects, {} tags to {}",
                catalog.len(),
                tag_index(&catalog).len(),
                path.display()
            );
        }
        None => {
            println!("{}", json);
        }
    }

    Ok(())
}
