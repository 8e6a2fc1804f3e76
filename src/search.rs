//! Project search and tag listing.
//!
//! [`search_projects`] returns structured results and is shared by the
//! `folio search` command and the `GET /api/projects` route.

use anyhow::Result;
use serde::Serialize;

use portfolio_core::catalog::Catalog;
use portfolio_core::filter::FilterController;
use portfolio_core::models::{FilterState, ProjectRecord, TagSelection};
use portfolio_core::render::EMPTY_TITLE;
use portfolio_core::tags::tag_index;

use crate::catalog::load_catalog;
use crate::config::Config;

#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub state: FilterState,
    pub count: usize,
    pub projects: Vec<ProjectRecord>,
    /// Rendered card list (or the empty placeholder) as HTML.
    pub html: String,
}

/// Filters `controller`'s catalog by `state`. Unknown tags are rejected.
pub fn search_projects(
    controller: &FilterController,
    state: &FilterState,
) -> Result<SearchResponse> {
    controller.validate(&state.selected_tag)?;
    let projects: Vec<ProjectRecord> = controller
        .filtered(state)
        .into_iter()
        .cloned()
        .collect();
    let html = controller
        .render_state(state)
        .iter()
        .map(|card| card.to_html())
        .collect::<Vec<_>>()
        .join("\n");
    Ok(SearchResponse {
        state: state.clone(),
        count: projects.len(),
        projects,
        html,
    })
}

pub fn run_search(
    config: &Config,
    query: Option<String>,
    tag: Option<String>,
    json: bool,
) -> Result<()> {
    let catalog = load_catalog(config)?;
    let controller = FilterController::new(catalog.into(), config.links.policy());
    let state = FilterState::new(
        TagSelection::from_param(tag.as_deref()),
        query.unwrap_or_default(),
    );

    let response = search_projects(&controller, &state)?;
    tracing::debug!(
        tag = %state.selected_tag,
        query = %state.search_text,
        hits = response.count,
        "search complete"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    if response.projects.is_empty() {
        println!("{}.", EMPTY_TITLE);
        return Ok(());
    }

    for (i, project) in response.projects.iter().enumerate() {
        println!("{}. {}", i + 1, project.title);
        if !project.tags.is_empty() {
            println!("    tags: {}", project.tags.join(", "));
        }
        match controller.policy().live_link(project.github.as_deref()) {
            Some(url) => println!("    github: {}", url),
            None => println!("    github: (add link)"),
        }
        if let Some(demo) = &project.demo {
            println!("    demo: {}", demo);
        }
    }

    Ok(())
}

pub fn run_tags(config: &Config) -> Result<()> {
    let catalog: Catalog = load_catalog(config)?;
    for tag in tag_index(&catalog) {
        println!("{}", tag);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use portfolio_core::links::PlaceholderPolicy;
    use std::sync::Arc;

    fn controller() -> FilterController {
        FilterController::new(Arc::new(Catalog::builtin()), PlaceholderPolicy::default())
    }

    #[test]
    fn test_search_by_tag() {
        let state = FilterState::new(TagSelection::Tag("Computer Vision".into()), "");
        let r = search_projects(&controller(), &state).unwrap();
        assert_eq!(r.count, 1);
        assert_eq!(r.projects[0].title, "Skin Lesion Classification and Segmentation");
        assert!(r.html.starts_with("<div class=\"card project-card\">"));
    }

    #[test]
    fn test_search_no_match() {
        let state = FilterState::new(TagSelection::All, "zzz-nomatch");
        let r = search_projects(&controller(), &state).unwrap();
        assert_eq!(r.count, 0);
        assert!(r.projects.is_empty());
        assert!(r.html.contains("No projects found"));
    }

    #[test]
    fn test_search_unknown_tag() {
        let state = FilterState::new(TagSelection::Tag("Haskell".into()), "");
        let err = search_projects(&controller(), &state).unwrap_err();
        assert_eq!(err.to_string(), "unknown tag: Haskell");
    }

    #[test]
    fn test_response_serializes_state() {
        let r = search_projects(&controller(), &FilterState::default()).unwrap();
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["state"]["selected_tag"], "all");
        assert_eq!(v["count"], 2);
    }
}
