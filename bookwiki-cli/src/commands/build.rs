//! Build command implementation.

use anyhow::{Context, Result};
use bookwiki_core::navigation::{self, INDEX_PATH};
use bookwiki_core::{Config, Site, SiteBuilder, CHAPTER_BASE_PATH, INDEX_BASE_PATH};
use bookwiki_render::PageAssembler;
use std::fs;
use std::path::Path;

/// Build the static site (writes output)
pub fn build_site(config_path: &Path) -> Result<()> {
    tracing::info!("Loading config from {:?}", config_path);
    let config = Config::from_file(config_path).context("Failed to load configuration")?;
    build_site_with_config(config).map(|_| ())
}

/// Build the site from an already loaded config, writing output and returning the site.
pub fn build_site_with_config(config: Config) -> Result<Site> {
    tracing::info!("Building site: {}", config.site.title);

    let builder = SiteBuilder::new(config.clone());
    let site = builder.build().context("Failed to build site")?;

    let output_dir = config.output_dir();
    fs::create_dir_all(&output_dir).context("Failed to create output directory")?;

    let assembler = PageAssembler::new(&config.site.title);

    for chapter in site.registry.chapters() {
        let dir = output_dir.join(&chapter.id);
        fs::create_dir_all(&dir).with_context(|| format!("Failed to create {:?}", dir))?;
    }

    for page in &site.pages {
        let html = assembler
            .render_page(page, CHAPTER_BASE_PATH)
            .with_context(|| format!("Failed to render {}", page.page.path))?;

        let output_path = output_dir.join(&page.page.path);
        fs::write(&output_path, html)
            .with_context(|| format!("Failed to write {:?}", output_path))?;

        tracing::info!("✓ {}", page.page.path);
    }

    render_index(&config, &site, &assembler, &output_dir)?;

    tracing::info!(
        "✓ Built {} pages ({} words) in {:?}",
        site.pages.len(),
        site.word_count,
        output_dir
    );

    Ok(site)
}

/// Render index.html at the site root
fn render_index(
    config: &Config,
    site: &Site,
    assembler: &PageAssembler,
    output_dir: &Path,
) -> Result<()> {
    let body = match &site.index {
        Some(index) => index.body_html.clone(),
        None => {
            let today = chrono::Local::now().date_naive();
            assembler
                .render_index_body(config.site.description.as_deref(), site, today)
                .context("Failed to render index body")?
        }
    };

    let sidebar = navigation::sidebar(&site.registry, INDEX_PATH);
    let sidebar_html = assembler
        .render_sidebar(&sidebar, INDEX_BASE_PATH)
        .context("Failed to render index sidebar")?;

    let html = assembler
        .assemble(
            "Home",
            &body,
            &sidebar_html,
            &navigation::entry_neighbors(&site.registry),
            INDEX_BASE_PATH,
        )
        .context("Failed to render index page")?;

    let output_path = output_dir.join(INDEX_PATH);
    fs::write(&output_path, html).with_context(|| format!("Failed to write {:?}", output_path))?;

    tracing::debug!("Rendered index");
    Ok(())
}
