//! Askama template definitions and the page assembler.

use askama::Template;
use bookwiki_core::{NavLink, Neighbors, RenderedPage, Sidebar, Site};
use chrono::NaiveDate;
use thiserror::Error;

/// Built-in stylesheet inlined into every page
pub const STYLESHEET: &str = include_str!("../static/style.css");

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// A prev/next link with its href already prefixed
#[derive(Debug, Clone)]
pub struct LinkView {
    pub href: String,
    pub title: String,
}

impl LinkView {
    fn from_nav(link: &NavLink, base_path: &str) -> Self {
        Self {
            href: link.href(base_path),
            title: link.title.clone(),
        }
    }
}

/// Complete page document
///
/// Bodies and sidebars are already HTML, so nothing is escaped here.
#[derive(Template)]
#[template(path = "page.html", escape = "none")]
pub struct PageTemplate<'a> {
    pub title: &'a str,
    pub site_title: &'a str,
    pub css: &'a str,
    pub sidebar: &'a str,
    pub content: &'a str,
    pub prev: Option<LinkView>,
    pub next: Option<LinkView>,
}

#[derive(Debug, Clone)]
pub struct SidebarEntryView<'a> {
    pub href: String,
    pub title: &'a str,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct SidebarGroupView<'a> {
    pub name: &'a str,
    pub entries: Vec<SidebarEntryView<'a>>,
}

/// Sidebar navigation fragment
#[derive(Template)]
#[template(path = "sidebar.html", escape = "none")]
pub struct SidebarTemplate<'a> {
    pub site_title: &'a str,
    pub home_href: String,
    pub home_title: &'a str,
    pub groups: Vec<SidebarGroupView<'a>>,
}

impl<'a> SidebarTemplate<'a> {
    pub fn new(site_title: &'a str, sidebar: &'a Sidebar, base_path: &str) -> Self {
        Self {
            site_title,
            home_href: sidebar.home.href(base_path),
            home_title: &sidebar.home.title,
            groups: sidebar
                .groups
                .iter()
                .map(|group| SidebarGroupView {
                    name: &group.name,
                    entries: group
                        .entries
                        .iter()
                        .map(|entry| SidebarEntryView {
                            href: format!("{}{}", base_path, entry.path),
                            title: &entry.title,
                            active: entry.active,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct IndexPageView<'a> {
    pub href: &'a str,
    pub title: &'a str,
}

#[derive(Debug, Clone)]
pub struct IndexChapterView<'a> {
    pub name: &'a str,
    pub pages: Vec<IndexPageView<'a>>,
}

/// Generated index body listing every chapter and page
#[derive(Template)]
#[template(path = "index.html", escape = "none")]
pub struct IndexTemplate<'a> {
    pub site_title: &'a str,
    pub description: Option<&'a str>,
    pub chapters: Vec<IndexChapterView<'a>>,
    pub generated_on: String,
    pub page_count: usize,
    pub word_count: String,
}

impl<'a> IndexTemplate<'a> {
    pub fn new(
        site_title: &'a str,
        description: Option<&'a str>,
        site: &'a Site,
        generated_on: NaiveDate,
    ) -> Self {
        // Index links are relative to the site root, so the path is the href
        let chapters = site
            .registry
            .chapters()
            .iter()
            .filter(|chapter| !chapter.pages.is_empty())
            .map(|chapter| IndexChapterView {
                name: &chapter.display_name,
                pages: chapter
                    .pages
                    .iter()
                    .map(|page| IndexPageView {
                        href: &page.path,
                        title: &page.title,
                    })
                    .collect(),
            })
            .collect();

        Self {
            site_title,
            description,
            chapters,
            generated_on: generated_on.format("%Y-%m-%d").to_string(),
            page_count: site.registry.page_count(),
            word_count: group_thousands(site.word_count),
        }
    }
}

/// Composes body, sidebar and navigation into complete documents
#[derive(Debug, Clone)]
pub struct PageAssembler {
    site_title: String,
}

impl PageAssembler {
    pub fn new(site_title: impl Into<String>) -> Self {
        Self {
            site_title: site_title.into(),
        }
    }

    /// Render the sidebar fragment with links prefixed by `base_path`
    pub fn render_sidebar(&self, sidebar: &Sidebar, base_path: &str) -> Result<String, RenderError> {
        Ok(SidebarTemplate::new(&self.site_title, sidebar, base_path).render()?)
    }

    /// Wrap a body fragment and a sidebar fragment into a full document
    ///
    /// A missing prev or next side renders as an empty `<span>` so the
    /// navigation row keeps its layout.
    pub fn assemble(
        &self,
        title: &str,
        body: &str,
        sidebar: &str,
        neighbors: &Neighbors,
        base_path: &str,
    ) -> Result<String, RenderError> {
        let template = PageTemplate {
            title,
            site_title: &self.site_title,
            css: STYLESHEET,
            sidebar,
            content: body,
            prev: neighbors
                .prev
                .as_ref()
                .map(|l| LinkView::from_nav(l, base_path)),
            next: neighbors
                .next
                .as_ref()
                .map(|l| LinkView::from_nav(l, base_path)),
        };

        Ok(template.render()?)
    }

    /// Generated index body listing every non-empty chapter
    pub fn render_index_body(
        &self,
        description: Option<&str>,
        site: &Site,
        generated_on: NaiveDate,
    ) -> Result<String, RenderError> {
        Ok(IndexTemplate::new(&self.site_title, description, site, generated_on).render()?)
    }

    /// Full document for a rendered chapter page
    pub fn render_page(&self, page: &RenderedPage, base_path: &str) -> Result<String, RenderError> {
        let sidebar = self.render_sidebar(&page.sidebar, base_path)?;
        self.assemble(
            &page.page.title,
            &page.body_html,
            &sidebar,
            &page.neighbors,
            base_path,
        )
    }
}

/// Format a count with comma thousands separators (87000 -> "87,000")
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookwiki_core::navigation::{neighbors, sidebar};
    use bookwiki_core::{ChapterRecord, PageRecord, Registry};

    fn registry() -> Registry {
        Registry::new(vec![
            ChapterRecord::new("01-intro", "Intro").with_pages(vec![
                PageRecord::for_chapter("01-intro", "01-start", "Start"),
                PageRecord::for_chapter("01-intro", "02-middle", "Middle"),
            ]),
            ChapterRecord::new("02-end", "Business & Market").with_pages(vec![
                PageRecord::for_chapter("02-end", "01-finish", "Finish"),
            ]),
            ChapterRecord::new("03-empty", "Empty"),
        ])
        .unwrap()
    }

    #[test]
    fn test_sidebar_fragment() {
        let registry = registry();
        let assembler = PageAssembler::new("Field Guide");
        let nav = sidebar(&registry, "01-intro/02-middle.html");

        let html = assembler.render_sidebar(&nav, "../").unwrap();
        assert!(html.starts_with("<nav class=\"sidebar\">\n<h1>Field Guide</h1>"));
        assert!(html.contains("<ul><li><a href=\"../index.html\">Home</a></li></ul>"));
        assert!(html.contains("<h2>Business & Market</h2>"));
        assert!(html.contains("<li><a href=\"../01-intro/02-middle.html\" class=\"active\">Middle</a></li>"));
        assert!(html.contains("<li><a href=\"../01-intro/01-start.html\">Start</a></li>"));
        assert!(html.contains("<h2>Empty</h2>\n<ul>\n</ul>"));
        assert!(html.trim_end().ends_with("</nav>"));
        assert_eq!(html.matches("class=\"active\"").count(), 1);
    }

    #[test]
    fn test_assemble_interior_page() {
        let registry = registry();
        let assembler = PageAssembler::new("Field Guide");
        let nav = neighbors(&registry, "01-intro/02-middle.html");

        let doc = assembler
            .assemble("Middle", "<h1>Middle</h1>", "<nav class=\"sidebar\"></nav>", &nav, "../")
            .unwrap();

        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<title>Middle | Field Guide</title>"));
        assert!(doc.contains("<main class=\"main\">\n<h1>Middle</h1>"));
        assert!(doc.contains(
            "<div class=\"page-nav\"><a href=\"../01-intro/01-start.html\">← Start</a><a href=\"../02-end/01-finish.html\">Finish →</a></div>"
        ));
        assert!(doc.contains(".page-nav"));
    }

    #[test]
    fn test_assemble_edges_use_placeholders() {
        let registry = registry();
        let assembler = PageAssembler::new("Field Guide");

        let first = assembler
            .assemble("Start", "", "", &neighbors(&registry, "01-intro/01-start.html"), "../")
            .unwrap();
        assert!(first.contains(
            "<div class=\"page-nav\"><span></span><a href=\"../01-intro/02-middle.html\">Middle →</a></div>"
        ));

        let last = assembler
            .assemble("Finish", "", "", &neighbors(&registry, "02-end/01-finish.html"), "../")
            .unwrap();
        assert!(last.contains(
            "<div class=\"page-nav\"><a href=\"../01-intro/02-middle.html\">← Middle</a><span></span></div>"
        ));
    }

    #[test]
    fn test_index_template() {
        let site = Site {
            registry: registry(),
            pages: Vec::new(),
            index: None,
            word_count: 87_000,
        };
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

        let html = PageAssembler::new("Field Guide")
            .render_index_body(Some("Start here."), &site, date)
            .unwrap();

        assert!(html.starts_with("<h1>Field Guide</h1>\n<blockquote><strong>Start here.</strong></blockquote>"));
        assert!(html.contains("<li><a href=\"01-intro/01-start.html\">Start</a></li>"));
        assert!(!html.contains("Empty"));
        assert!(html.contains("Generated 2026-10-19 • 3 pages • ~87,000 words"));
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
