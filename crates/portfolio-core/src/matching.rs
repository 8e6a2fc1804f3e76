//! The match predicate.
//!
//! A project matches when it satisfies both the tag condition and the text
//! condition. Both are pure: inputs are only borrowed.

use crate::models::{FilterState, ProjectRecord, TagSelection};

/// Trims and lowercases text for comparison.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Normalized searchable text of a project: title, description, bullets,
/// and tags joined by single spaces.
pub fn haystack(project: &ProjectRecord) -> String {
    let raw = format!(
        "{} {} {} {}",
        project.title,
        project.description,
        project.bullets.join(" "),
        project.tags.join(" ")
    );
    normalize(&raw)
}

pub fn tag_matches(project: &ProjectRecord, selected_tag: &TagSelection) -> bool {
    match selected_tag {
        TagSelection::All => true,
        TagSelection::Tag(tag) => project.has_tag(tag),
    }
}

pub fn text_matches(project: &ProjectRecord, search_text: &str) -> bool {
    let needle = normalize(search_text);
    needle.is_empty() || haystack(project).contains(&needle)
}

pub fn matches(project: &ProjectRecord, search_text: &str, selected_tag: &TagSelection) -> bool {
    tag_matches(project, selected_tag) && text_matches(project, search_text)
}

pub fn matches_state(project: &ProjectRecord, state: &FilterState) -> bool {
    matches(project, &state.search_text, &state.selected_tag)
}
