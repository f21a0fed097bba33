//! Per-page rendering pipeline
//!
//! Flow: raw markdown → wikilinks → block transpiler → navigation
//!
//! Every step only reads the shared registry, so pages can be rendered on
//! independent workers.

use crate::markdown::{MarkdownProcessor, WikilinkResolver};
use crate::models::{RenderedIndex, RenderedPage};
use crate::navigation;
use crate::registry::Registry;
use bookwiki_types::PageRecord;

/// Base path prefix for links emitted on chapter pages
pub const CHAPTER_BASE_PATH: &str = "../";

/// Base path prefix for links emitted on the index document
pub const INDEX_BASE_PATH: &str = "";

pub struct PagePipeline<'a> {
    registry: &'a Registry,
    processor: MarkdownProcessor,
}

impl<'a> PagePipeline<'a> {
    pub fn new(registry: &'a Registry, processor: MarkdownProcessor) -> Self {
        Self {
            registry,
            processor,
        }
    }

    /// Resolve wikilinks against the registry, then transpile
    pub fn render_markdown(&self, source: &str, base_path: &str) -> String {
        let resolved = WikilinkResolver::new(self.registry, base_path).resolve(source);
        self.processor.convert(&resolved)
    }

    /// Render one chapter page from its markdown source
    pub fn render_page(&self, page: &PageRecord, source: &str) -> RenderedPage {
        let body_html = self.render_markdown(source, CHAPTER_BASE_PATH);

        let chapter_id = self
            .registry
            .chapter_of(&page.path)
            .map(|c| c.id.clone())
            .unwrap_or_default();

        RenderedPage {
            page: page.clone(),
            chapter_id,
            body_html,
            sidebar: navigation::sidebar(self.registry, &page.path),
            neighbors: navigation::neighbors(self.registry, &page.path),
        }
    }

    /// Render a markdown index body (links relative to the site root)
    pub fn render_index(&self, source: &str) -> RenderedIndex {
        RenderedIndex {
            body_html: self.render_markdown(source, INDEX_BASE_PATH),
        }
    }
}
