//! Core data models for the portfolio showcase.
//!
//! [`ProjectRecord`] is the unit of the catalog; [`FilterState`] is the
//! immutable snapshot of the filter controls that is passed into the
//! filtering functions on every input change.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Value of the tag selector's sentinel option that matches every project.
pub const ALL_TAGS: &str = "all";

/// A single portfolio entry.
///
/// Records are built once when the catalog is constructed and never
/// mutated afterwards. Optional links use `None` for "not provided"; the
/// catalog normalizes blank strings to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub bullets: Vec<String>,
    /// Display order is preserved; duplicates carry no extra meaning.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub demo: Option<String>,
}

impl ProjectRecord {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            bullets: Vec::new(),
            tags: Vec::new(),
            github: None,
            demo: None,
        }
    }

    pub fn with_bullets<I, S>(mut self, bullets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bullets = bullets.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_github(mut self, url: impl Into<String>) -> Self {
        self.github = Some(url.into());
        self
    }

    pub fn with_demo(mut self, url: impl Into<String>) -> Self {
        self.demo = Some(url.into());
        self
    }

    /// Exact membership test against the record's tags.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// The tag selector's current value: the `"all"` sentinel or one tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TagSelection {
    #[default]
    All,
    Tag(String),
}

impl TagSelection {
    /// Parses a selector value. The literal `"all"` always means the sentinel.
    pub fn parse(value: &str) -> Self {
        if value == ALL_TAGS {
            TagSelection::All
        } else {
            TagSelection::Tag(value.to_string())
        }
    }

    /// Parses an optional request parameter; absent or empty means `All`.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            None | Some("") => TagSelection::All,
            Some(v) => TagSelection::parse(v),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TagSelection::All => ALL_TAGS,
            TagSelection::Tag(tag) => tag,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, TagSelection::All)
    }
}

impl From<String> for TagSelection {
    fn from(value: String) -> Self {
        if value == ALL_TAGS {
            TagSelection::All
        } else {
            TagSelection::Tag(value)
        }
    }
}

impl From<&str> for TagSelection {
    fn from(value: &str) -> Self {
        TagSelection::parse(value)
    }
}

impl From<TagSelection> for String {
    fn from(value: TagSelection) -> Self {
        match value {
            TagSelection::All => ALL_TAGS.to_string(),
            TagSelection::Tag(tag) => tag,
        }
    }
}

impl fmt::Display for TagSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the filter controls.
///
/// Built fresh from the control values on each input event and never
/// persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub selected_tag: TagSelection,
    #[serde(default)]
    pub search_text: String,
}

impl FilterState {
    pub fn new(selected_tag: TagSelection, search_text: impl Into<String>) -> Self {
        Self {
            selected_tag,
            search_text: search_text.into(),
        }
    }

    pub fn with_tag(&self, selected_tag: TagSelection) -> Self {
        Self {
            selected_tag,
            search_text: self.search_text.clone(),
        }
    }

    pub fn with_search(&self, search_text: impl Into<String>) -> Self {
        Self {
            selected_tag: self.selected_tag.clone(),
            search_text: search_text.into(),
        }
    }
}
