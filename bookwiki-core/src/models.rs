//! Rendered output model handed to the page assembler and writer.

use crate::navigation::{Neighbors, Sidebar};
use crate::registry::Registry;
use bookwiki_types::PageRecord;
use serde::Serialize;

/// A chapter page after wikilink resolution, transpilation and navigation
#[derive(Debug, Clone, Serialize)]
pub struct RenderedPage {
    pub page: PageRecord,

    pub chapter_id: String,

    /// HTML body fragment
    pub body_html: String,

    pub sidebar: Sidebar,

    pub neighbors: Neighbors,
}

/// The index document body when it comes from a markdown file
#[derive(Debug, Clone, Serialize)]
pub struct RenderedIndex {
    pub body_html: String,
}

/// Everything produced by one build, in flatten order
#[derive(Debug, Clone)]
pub struct Site {
    pub registry: Registry,
    pub pages: Vec<RenderedPage>,

    /// `None` means the index body should be generated from the registry
    pub index: Option<RenderedIndex>,

    /// Whitespace separated words across all chapter sources
    pub word_count: usize,
}

impl Site {
    pub fn find_page(&self, path: &str) -> Option<&RenderedPage> {
        self.pages.iter().find(|p| p.page.path == path)
    }
}
