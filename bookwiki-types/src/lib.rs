//! Shared types for bookwiki
//!
//! This crate provides the data model shared across the bookwiki crates:
//! page and chapter records plus the configured chapter table.

use serde::{Deserialize, Serialize};

/// One rendered page of the book
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRecord {
    /// Source file stem (e.g., "01-what-is-ai")
    pub slug: String,

    /// First level-1 heading of the source, or the file stem
    pub title: String,

    /// Output path relative to the site root (e.g., "01-foundations/01-what-is-ai.html")
    pub path: String,
}

impl PageRecord {
    pub fn new(slug: impl Into<String>, title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            path: path.into(),
        }
    }

    /// Build a record for a source file living in a chapter directory
    pub fn for_chapter(chapter_id: &str, slug: impl Into<String>, title: impl Into<String>) -> Self {
        let slug = slug.into();
        let path = format!("{}/{}.html", chapter_id, slug);
        Self {
            slug,
            title: title.into(),
            path,
        }
    }

    /// Link target for this page with a relative base prefix ("../" or "")
    pub fn href(&self, base_path: &str) -> String {
        format!("{}{}", base_path, self.path)
    }
}

/// A chapter and its pages in on-disk order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterRecord {
    /// Directory name of the chapter (e.g., "01-foundations")
    pub id: String,

    /// Human readable chapter name
    pub display_name: String,

    pub pages: Vec<PageRecord>,
}

impl ChapterRecord {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            pages: Vec::new(),
        }
    }

    pub fn with_pages(mut self, pages: Vec<PageRecord>) -> Self {
        self.pages = pages;
        self
    }
}

/// Entry of the configured chapter table (`chapters:` in bookwiki.yml)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterSpec {
    pub id: String,
    pub name: String,
}

impl ChapterSpec {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_path_for_chapter() {
        let page = PageRecord::for_chapter("01-foundations", "01-intro", "Intro");
        assert_eq!(page.path, "01-foundations/01-intro.html");
        assert_eq!(page.href("../"), "../01-foundations/01-intro.html");
        assert_eq!(page.href(""), "01-foundations/01-intro.html");
    }

    #[test]
    fn test_chapter_with_pages() {
        let chapter = ChapterRecord::new("02-scaling", "Scaling")
            .with_pages(vec![PageRecord::for_chapter("02-scaling", "a", "A")]);
        assert_eq!(chapter.pages.len(), 1);
        assert_eq!(chapter.display_name, "Scaling");
    }
}
