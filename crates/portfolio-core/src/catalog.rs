//! The project catalog.
//!
//! A [`Catalog`] is an ordered, read-only sequence of [`ProjectRecord`]s.
//! It is validated once at construction and exposes only shared borrows
//! afterwards, so filtering can select a subsequence but never mutate a
//! record.

use thiserror::Error;

use crate::models::ProjectRecord;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("project #{index} has an empty title")]
    EmptyTitle { index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    projects: Vec<ProjectRecord>,
}

impl Catalog {
    /// Validates and freezes a list of projects.
    ///
    /// Blank `github`/`demo` values are normalized to `None` so the renderer
    /// only has to distinguish "provided" from "not provided".
    pub fn new(projects: Vec<ProjectRecord>) -> Result<Self, CatalogError> {
        let mut normalized = Vec::with_capacity(projects.len());
        for (index, mut project) in projects.into_iter().enumerate() {
            if project.title.trim().is_empty() {
                return Err(CatalogError::EmptyTitle { index });
            }
            project.github = non_blank(project.github);
            project.demo = non_blank(project.demo);
            normalized.push(project);
        }
        Ok(Self {
            projects: normalized,
        })
    }

    /// The catalog shipped with the site when no catalog file is configured.
    pub fn builtin() -> Self {
        Self {
            projects: vec![
                ProjectRecord::new(
                    "Diabetes Risk Classification Using ML Algorithms",
                    "Binary diabetes prediction using the WiDS Datathon 2021 dataset. Built an \
                     end-to-end ML pipeline with preprocessing, feature engineering, class \
                     imbalance handling, and model tuning.",
                )
                .with_tags([
                    "Machine Learning",
                    "Classification",
                    "Imbalanced Data",
                    "Python",
                ])
                .with_github("https://github.com/SanaPatekari/DiabeticsPrediction"),
                ProjectRecord::new(
                    "Skin Lesion Classification and Segmentation",
                    "Computer vision workflow for benign vs malignant classification and lesion \
                     boundary segmentation with strong performance under severe class imbalance.",
                )
                .with_tags([
                    "Computer Vision",
                    "Deep Learning",
                    "Segmentation",
                    "PyTorch",
                ])
                .with_github("https://github.com/SanaPatekari/ISIC_Image_Segmentation"),
            ],
        }
    }

    pub fn empty() -> Self {
        Self {
            projects: Vec::new(),
        }
    }

    pub fn projects(&self) -> &[ProjectRecord] {
        &self.projects
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProjectRecord> {
        self.projects.iter()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn find(&self, title: &str) -> Option<&ProjectRecord> {
        self.projects.iter().find(|p| p.title == title)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a ProjectRecord;
    type IntoIter = std::slice::Iter<'a, ProjectRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.projects.iter()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_order() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.projects()[0].title.starts_with("Diabetes"));
        assert!(catalog.projects()[1].title.starts_with("Skin Lesion"));
        assert!(catalog.projects().iter().all(|p| p.demo.is_none()));
    }

    #[test]
    fn test_empty_title_rejected() {
        let err = Catalog::new(vec![
            ProjectRecord::new("Ok", ""),
            ProjectRecord::new("   ", "no title"),
        ])
        .unwrap_err();
        assert_eq!(err, CatalogError::EmptyTitle { index: 1 });
        assert_eq!(err.to_string(), "project #1 has an empty title");
    }

    #[test]
    fn test_blank_links_become_none() {
        let catalog = Catalog::new(vec![ProjectRecord::new("A", "")
            .with_github("  ")
            .with_demo("")])
        .unwrap();
        let p = &catalog.projects()[0];
        assert_eq!(p.github, None);
        assert_eq!(p.demo, None);
    }

    #[test]
    fn test_real_links_kept_verbatim() {
        let catalog = Catalog::new(vec![ProjectRecord::new("A", "")
            .with_github("https://github.com/a/b")
            .with_demo("https://a.dev")])
        .unwrap();
        let p = catalog.find("A").unwrap();
        assert_eq!(p.github.as_deref(), Some("https://github.com/a/b"));
        assert_eq!(p.demo.as_deref(), Some("https://a.dev"));
    }
}
