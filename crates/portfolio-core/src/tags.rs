//! Tag index: the distinct tags of a catalog, in display order.

use std::cmp::Ordering;
use std::collections::HashSet;

use icu_collator::{Collator, CollatorOptions, Strength};

use crate::models::ProjectRecord;

/// Collects every tag used by `projects` exactly once, sorted with
/// [`TagOrder`].
pub fn tag_index<'a, I>(projects: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a ProjectRecord>,
{
    let mut seen: HashSet<&str> = HashSet::new();
    let mut tags: Vec<&str> = Vec::new();
    for project in projects {
        for tag in &project.tags {
            if seen.insert(tag.as_str()) {
                tags.push(tag.as_str());
            }
        }
    }
    let order = TagOrder::new();
    tags.sort_by(|a, b| order.compare(a, b));
    tags.into_iter().map(str::to_string).collect()
}

/// Locale-aware, case-insensitive tag ordering.
///
/// Uses the root Unicode collation at tertiary strength: accents and case
/// only break ties between otherwise equal letters, and lowercase sorts
/// before uppercase. Strings the collator considers equal fall back to
/// raw byte order so the order is total.
pub struct TagOrder {
    collator: Option<Collator>,
}

impl TagOrder {
    pub fn new() -> Self {
        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Tertiary);
        let collator = match Collator::try_new(&Default::default(), options) {
            Ok(collator) => Some(collator),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "collation data unavailable, sorting tags by lowercase"
                );
                None
            }
        };
        Self { collator }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        let primary = match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| b.cmp(a)),
        };
        primary.then_with(|| a.cmp(b))
    }
}

impl Default for TagOrder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_builtin_index() {
        let tags = tag_index(&Catalog::builtin());
        assert_eq!(
            tags,
            vec![
                "Classification",
                "Computer Vision",
                "Deep Learning",
                "Imbalanced Data",
                "Machine Learning",
                "Python",
                "PyTorch",
                "Segmentation",
            ]
        );
    }

    #[test]
    fn test_duplicates_collapse() {
        let projects = vec![
            ProjectRecord::new("A", "").with_tags(["Rust", "CLI", "Rust"]),
            ProjectRecord::new("B", "").with_tags(["CLI", "wasm"]),
        ];
        assert_eq!(tag_index(&projects), vec!["CLI", "Rust", "wasm"]);
    }

    #[test]
    fn test_case_insensitive_order() {
        let projects =
            vec![ProjectRecord::new("A", "").with_tags(["beta", "Alpha", "alpha", "Gamma"])];
        assert_eq!(tag_index(&projects), vec!["alpha", "Alpha", "beta", "Gamma"]);
    }

    #[test]
    fn test_accented_tags_sort_with_their_letter() {
        let projects = vec![ProjectRecord::new("A", "").with_tags(["Zebra", "Éclair", "apple"])];
        assert_eq!(tag_index(&projects), vec!["apple", "Éclair", "Zebra"]);
    }

    #[test]
    fn test_order_is_total() {
        let order = TagOrder::new();
        assert_eq!(order.compare("rust", "rust"), Ordering::Equal);
        assert_eq!(order.compare("rust", "Rust"), Ordering::Less);
        assert_eq!(order.compare("Rust", "rust"), Ordering::Greater);
        assert_ne!(order.compare("élan", "elan"), Ordering::Equal);
    }

    #[test]
    fn test_empty_catalog() {
        assert!(tag_index(&Catalog::empty()).is_empty());
    }

    #[test]
    fn test_every_tag_indexed_once() {
        let catalog = Catalog::builtin();
        let tags = tag_index(&catalog);
        for p in &catalog {
            for t in &p.tags {
                assert_eq!(tags.iter().filter(|x| *x == t).count(), 1);
            }
        }
    }
}
