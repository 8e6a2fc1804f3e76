//! Placeholder link detection.
//!
//! Catalog entries copied from a template often keep links such as
//! `https://github.com/your-username/project`. A [`PlaceholderPolicy`] holds
//! the deny-list of markers that identify such unfilled links.

use serde::Serialize;

pub const DEFAULT_PLACEHOLDER_PATTERNS: &[&str] = &["your-username"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceholderPolicy {
    patterns: Vec<String>,
}

impl PlaceholderPolicy {
    /// Builds a policy from marker substrings. Blank markers are dropped
    /// since they would match every link.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(Into::into)
                .filter(|p: &String| !p.trim().is_empty())
                .map(|p| p.to_lowercase())
                .collect(),
        }
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Case-insensitive substring test against every marker.
    pub fn is_placeholder(&self, url: &str) -> bool {
        let url = url.to_lowercase();
        self.patterns.iter().any(|p| url.contains(p.as_str()))
    }

    /// Returns the link when it is present, non-blank, and not a placeholder.
    pub fn live_link<'a>(&self, url: Option<&'a str>) -> Option<&'a str> {
        url.filter(|u| !u.trim().is_empty() && !self.is_placeholder(u))
    }
}

impl Default for PlaceholderPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_PLACEHOLDER_PATTERNS.iter().copied())
    }
}
