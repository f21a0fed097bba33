//! Pages command implementation.

use anyhow::{Context, Result};
use bookwiki_core::navigation::neighbors;
use bookwiki_core::{load_book, Config};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct PageSummary<'a> {
    position: usize,
    chapter: &'a str,
    slug: &'a str,
    title: &'a str,
    path: &'a str,
    prev: Option<String>,
    next: Option<String>,
}

/// Print the reading order of every page
pub fn list_pages(config_path: &Path, json: bool) -> Result<()> {
    let config = Config::from_file(config_path).context("Failed to load configuration")?;
    let book = load_book(&config.chapters_dir(), &config.chapters)
        .context("Failed to load chapters")?;
    let registry = &book.registry;

    let mut summaries = Vec::with_capacity(registry.page_count());
    for chapter in registry.chapters() {
        for page in &chapter.pages {
            let nav = neighbors(registry, &page.path);
            summaries.push(PageSummary {
                position: summaries.len(),
                chapter: &chapter.id,
                slug: &page.slug,
                title: &page.title,
                path: &page.path,
                prev: nav.prev.map(|l| l.path),
                next: nav.next.map(|l| l.path),
            });
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    for chapter in registry.chapters() {
        println!("{} ({})", chapter.display_name, chapter.id);
        for summary in summaries.iter().filter(|s| s.chapter == chapter.id) {
            println!(
                "  {:>3}. {} -> {} (prev: {}, next: {})",
                summary.position + 1,
                summary.title,
                summary.path,
                summary.prev.as_deref().unwrap_or("-"),
                summary.next.as_deref().unwrap_or("-"),
            );
        }
    }

    Ok(())
}
