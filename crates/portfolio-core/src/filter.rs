//! Filter controller: from filter controls to rendered cards.
//!
//! The controller owns the catalog (shared through `Arc`), its tag index,
//! and the current [`FilterState`]. Every input change replaces the state
//! with a new value and re-renders the whole card list; there is no diffing.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::catalog::Catalog;
use crate::links::PlaceholderPolicy;
use crate::matching::matches_state;
use crate::models::{FilterState, ProjectRecord, TagSelection, ALL_TAGS};
use crate::render::{render_cards, Element};
use crate::tags::tag_index;

pub const ALL_TAGS_LABEL: &str = "All tags";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("unknown tag: {0}")]
    UnknownTag(String),
}

/// One entry of the tag selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagOption {
    pub value: String,
    pub label: String,
}

/// Projects satisfying `state`, in catalog order.
pub fn filter_projects<'a>(
    projects: &'a [ProjectRecord],
    state: &FilterState,
) -> Vec<&'a ProjectRecord> {
    projects.iter().filter(|p| matches_state(p, state)).collect()
}

pub struct FilterController {
    catalog: Arc<Catalog>,
    policy: PlaceholderPolicy,
    tags: Vec<String>,
    state: FilterState,
}

impl FilterController {
    pub fn new(catalog: Arc<Catalog>, policy: PlaceholderPolicy) -> Self {
        let tags = tag_index(catalog.as_ref());
        Self {
            catalog,
            policy,
            tags,
            state: FilterState::default(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn shared_catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    pub fn policy(&self) -> &PlaceholderPolicy {
        &self.policy
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Selector options: the `"all"` sentinel followed by the tag index.
    pub fn tag_options(&self) -> Vec<TagOption> {
        std::iter::once(TagOption {
            value: ALL_TAGS.to_string(),
            label: ALL_TAGS_LABEL.to_string(),
        })
        .chain(self.tags.iter().map(|t| TagOption {
            value: t.clone(),
            label: t.clone(),
        }))
        .collect()
    }

    /// Rejects tags that the selector could not offer.
    pub fn validate(&self, selection: &TagSelection) -> Result<(), FilterError> {
        match selection {
            TagSelection::All => Ok(()),
            TagSelection::Tag(tag) if self.tags.iter().any(|t| t == tag) => Ok(()),
            TagSelection::Tag(tag) => Err(FilterError::UnknownTag(tag.clone())),
        }
    }

    pub fn filtered(&self, state: &FilterState) -> Vec<&ProjectRecord> {
        filter_projects(self.catalog.projects(), state)
    }

    /// Renders `state` without touching the controller's own state.
    pub fn render_state(&self, state: &FilterState) -> Vec<Element> {
        render_cards(self.filtered(state), &self.policy)
    }

    /// Renders the current state.
    pub fn render(&self) -> Vec<Element> {
        self.render_state(&self.state)
    }

    /// Tag selector change. An unknown tag leaves the state untouched.
    pub fn set_tag(&mut self, selection: TagSelection) -> Result<Vec<Element>, FilterError> {
        self.validate(&selection)?;
        self.state = self.state.with_tag(selection);
        Ok(self.render())
    }

    /// Search field input.
    pub fn set_search(&mut self, text: impl Into<String>) -> Vec<Element> {
        self.state = self.state.with_search(text);
        self.render()
    }

    /// Replaces both controls at once.
    pub fn apply(&mut self, state: FilterState) -> Result<Vec<Element>, FilterError> {
        self.validate(&state.selected_tag)?;
        self.state = state;
        Ok(self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::EMPTY_TITLE;

    fn controller() -> FilterController {
        FilterController::new(Arc::new(Catalog::builtin()), PlaceholderPolicy::default())
    }

    fn titles(cards: &[Element]) -> Vec<String> {
        cards
            .iter()
            .filter_map(|c| c.find(&|e: &Element| e.tag == "h3"))
            .map(|h| h.text_content())
            .collect()
    }

    #[test]
    fn test_initial_state_shows_everything() {
        let c = controller();
        assert_eq!(c.state(), &FilterState::default());
        assert_eq!(c.render().len(), 2);
    }

    #[test]
    fn test_tag_options_start_with_all() {
        let options = controller().tag_options();
        assert_eq!(options[0].value, "all");
        assert_eq!(options[0].label, "All tags");
        assert_eq!(options.len(), 1 + 8);
        assert_eq!(options[1].value, "Classification");
    }

    #[test]
    fn test_select_computer_vision() {
        let mut c = controller();
        let cards = c.set_tag(TagSelection::Tag("Computer Vision".into())).unwrap();
        assert_eq!(titles(&cards), vec!["Skin Lesion Classification and Segmentation"]);
    }

    #[test]
    fn test_search_segmentation() {
        let mut c = controller();
        let cards = c.set_search("segmentation");
        assert_eq!(titles(&cards), vec!["Skin Lesion Classification and Segmentation"]);
    }

    #[test]
    fn test_no_match_renders_placeholder() {
        let mut c = controller();
        let cards = c.set_search("zzz-nomatch");
        assert_eq!(cards.len(), 1);
        assert_eq!(titles(&cards), vec![EMPTY_TITLE]);
        assert!(!cards[0].has_class("project-card"));
    }

    #[test]
    fn test_unknown_tag_rejected_and_state_kept() {
        let mut c = controller();
        c.set_search("ml");
        let err = c.set_tag(TagSelection::Tag("Rust".into())).unwrap_err();
        assert_eq!(err, FilterError::UnknownTag("Rust".into()));
        assert_eq!(c.state().selected_tag, TagSelection::All);
        assert_eq!(c.state().search_text, "ml");
    }

    #[test]
    fn test_rerender_is_idempotent() {
        let mut c = controller();
        let state = FilterState::new(TagSelection::All, "classification");
        let first = c.apply(state.clone()).unwrap();
        let second = c.apply(state).unwrap();
        assert_eq!(first, second);
        assert_eq!(c.render(), first);
    }

    #[test]
    fn test_filtered_preserves_catalog_order() {
        let catalog = Catalog::new(vec![
            ProjectRecord::new("C", "shared"),
            ProjectRecord::new("A", "other"),
            ProjectRecord::new("B", "shared"),
        ])
        .unwrap();
        let state = FilterState::new(TagSelection::All, "shared");
        let hits = filter_projects(catalog.projects(), &state);
        let names: Vec<&str> = hits.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(names, vec!["C", "B"]);
    }

    #[test]
    fn test_empty_catalog_renders_placeholder() {
        let c = FilterController::new(Arc::new(Catalog::empty()), PlaceholderPolicy::default());
        assert_eq!(c.tag_options().len(), 1);
        assert_eq!(titles(&c.render()), vec![EMPTY_TITLE]);
    }
}
