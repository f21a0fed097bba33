//! The immutable chapter/page registry shared by every page render.

use bookwiki_types::{ChapterRecord, PageRecord};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Chapter at position {0} has an empty id")]
    EmptyChapterId(usize),

    #[error("Page '{slug}' in chapter '{chapter}' has an empty path")]
    EmptyPath { chapter: String, slug: String },

    #[error("Page with path '{path}' in chapter '{chapter}' has an empty slug")]
    EmptySlug { chapter: String, path: String },

    #[error("Page '{slug}' in chapter '{chapter}' has an empty title")]
    EmptyTitle { chapter: String, slug: String },

    #[error("Duplicate slug '{slug}' in chapter '{chapter}'")]
    DuplicateSlug { chapter: String, slug: String },
}

/// Ordered chapters and pages of one build
///
/// Constructed once through [`Registry::new`], which rejects structurally
/// invalid input, and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    chapters: Vec<ChapterRecord>,
    flattened: Vec<PageRecord>,
}

impl Registry {
    pub fn new(chapters: Vec<ChapterRecord>) -> Result<Self, RegistryError> {
        validate(&chapters)?;

        let flattened = chapters
            .iter()
            .flat_map(|chapter| chapter.pages.iter().cloned())
            .collect();

        Ok(Self {
            chapters,
            flattened,
        })
    }

    pub fn chapters(&self) -> &[ChapterRecord] {
        &self.chapters
    }

    /// Every page, chapter order then page order
    pub fn flattened(&self) -> &[PageRecord] {
        &self.flattened
    }

    /// Position of a page in the flattened order
    pub fn position(&self, path: &str) -> Option<usize> {
        self.flattened.iter().position(|p| p.path == path)
    }

    /// The chapter a page belongs to
    pub fn chapter_of(&self, path: &str) -> Option<&ChapterRecord> {
        self.chapters
            .iter()
            .find(|c| c.pages.iter().any(|p| p.path == path))
    }

    pub fn page_count(&self) -> usize {
        self.flattened.len()
    }
}

fn validate(chapters: &[ChapterRecord]) -> Result<(), RegistryError> {
    for (idx, chapter) in chapters.iter().enumerate() {
        if chapter.id.trim().is_empty() {
            return Err(RegistryError::EmptyChapterId(idx));
        }

        let mut seen = HashSet::new();
        for page in &chapter.pages {
            if page.slug.is_empty() {
                return Err(RegistryError::EmptySlug {
                    chapter: chapter.id.clone(),
                    path: page.path.clone(),
                });
            }
            if page.path.is_empty() {
                return Err(RegistryError::EmptyPath {
                    chapter: chapter.id.clone(),
                    slug: page.slug.clone(),
                });
            }
            if page.title.trim().is_empty() {
                return Err(RegistryError::EmptyTitle {
                    chapter: chapter.id.clone(),
                    slug: page.slug.clone(),
                });
            }
            if !seen.insert(page.slug.as_str()) {
                return Err(RegistryError::DuplicateSlug {
                    chapter: chapter.id.clone(),
                    slug: page.slug.clone(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
pub(crate) fn sample_registry() -> Registry {
    Registry::new(vec![
        ChapterRecord::new("01-foundations", "Foundations").with_pages(vec![
            PageRecord::for_chapter("01-foundations", "01-what-is-ai", "What is AI?"),
            PageRecord::for_chapter("01-foundations", "02-training", "How Training Works"),
        ]),
        ChapterRecord::new("02-scaling", "The Scaling Problem").with_pages(vec![
            PageRecord::for_chapter("02-scaling", "01-scaling-laws", "Neural Scaling Laws"),
            PageRecord::for_chapter("02-scaling", "02-foo", "Foo"),
        ]),
    ])
    .expect("sample registry is valid")
}
