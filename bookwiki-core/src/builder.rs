//! Site building logic - loads the registry and renders every page.

use crate::{
    config::{Config, ConfigError},
    markdown::MarkdownProcessor,
    models::Site,
    pipeline::PagePipeline,
    registry::{Registry, RegistryError},
};
use bookwiki_types::{ChapterRecord, ChapterSpec, PageRecord};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to scan chapter directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid registry: {0}")]
    Registry(#[from] RegistryError),
}

/// Registry plus the markdown source of every page, in flatten order
#[derive(Debug, Clone)]
pub struct LoadedBook {
    pub registry: Registry,
    pub sources: Vec<String>,
}

/// Main site builder
pub struct SiteBuilder {
    config: Config,
    processor: MarkdownProcessor,
}

impl SiteBuilder {
    pub fn new(config: Config) -> Self {
        let processor = MarkdownProcessor::new().with_table_headers(config.table_headers);
        Self { config, processor }
    }

    /// Build the whole site in memory
    pub fn build(&self) -> Result<Site, BuildError> {
        let LoadedBook { registry, sources } =
            load_book(&self.config.chapters_dir(), &self.config.chapters)?;

        tracing::info!(
            "Found {} pages in {} chapters",
            registry.page_count(),
            registry.chapters().len()
        );

        let pipeline = PagePipeline::new(&registry, self.processor.clone());

        let pages = registry
            .flattened()
            .par_iter()
            .zip(sources.par_iter())
            .map(|(page, source)| {
                tracing::debug!("Rendering {}", page.path);
                pipeline.render_page(page, source)
            })
            .collect();

        let index = match self.config.index_file() {
            Some(path) => {
                let source = read_source(&path)?;
                Some(pipeline.render_index(&source))
            }
            None => None,
        };

        let word_count = sources.iter().map(|s| s.split_whitespace().count()).sum();

        Ok(Site {
            registry,
            pages,
            index,
            word_count,
        })
    }
}

/// Scan the configured chapter directories and build the registry
///
/// Chapters whose directory does not exist are skipped. Within a chapter,
/// `*.md` files are read in lexicographic filename order.
pub fn load_book(chapters_dir: &Path, specs: &[ChapterSpec]) -> Result<LoadedBook, BuildError> {
    let mut chapters = Vec::new();
    let mut sources = Vec::new();

    for spec in specs {
        let chapter_path = chapters_dir.join(&spec.id);
        if !chapter_path.is_dir() {
            tracing::warn!("Skipping missing chapter directory {:?}", chapter_path);
            continue;
        }

        let mut pages = Vec::new();
        for file in markdown_files(&chapter_path)? {
            let content = read_source(&file)?;

            let stem = file
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();
            let title = extract_title(&content)
                .map(str::to_string)
                .unwrap_or_else(|| stem.clone());

            pages.push(PageRecord::for_chapter(&spec.id, stem, title));
            sources.push(content);
        }

        tracing::debug!("Chapter {} has {} pages", spec.id, pages.len());
        chapters.push(ChapterRecord::new(&spec.id, &spec.name).with_pages(pages));
    }

    let registry = Registry::new(chapters)?;
    Ok(LoadedBook { registry, sources })
}

fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>, BuildError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if entry.file_type().is_file() && entry.path().extension().is_some_and(|ext| ext == "md") {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

fn read_source(path: &Path) -> Result<String, BuildError> {
    fs::read_to_string(path).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Text of the first `# ` heading line, if any
pub fn extract_title(content: &str) -> Option<&str> {
    content
        .lines()
        .filter_map(|line| line.strip_prefix("# "))
        .map(str::trim)
        .find(|title| !title.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn sample_book() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        let chapters = dir.path().join("chapters");
        write(&chapters, "01-basics/02-second.md", "# Second Page\n\nBack to [[First]].");
        write(&chapters, "01-basics/01-first.md", "Intro without heading\n\n# First Title\n");
        write(&chapters, "01-basics/notes.txt", "ignored");
        write(&chapters, "02-advanced/01-deep.md", "# Deep Dive\n\n| A |\n|---|\n| 1 |");
        dir
    }

    fn sample_config(dir: &Path) -> Config {
        let yaml = r#"
site:
  title: "Test Book"
chapters:
  - { id: 01-basics, name: Basics }
  - { id: 99-missing, name: Missing }
  - { id: 02-advanced, name: Advanced }
"#;
        let path = dir.join("bookwiki.yml");
        fs::write(&path, yaml).unwrap();
        Config::from_file(&path).unwrap()
    }

    #[test]
    fn test_extract_title() {
        assert_eq!(extract_title("text\n# Title\n# Other"), Some("Title"));
        assert_eq!(extract_title("## Not h1\n#  \n"), None);
        assert_eq!(extract_title("# Windows\r\nbody"), Some("Windows"));
    }

    #[test]
    fn test_load_book_orders_and_skips() {
        let dir = sample_book();
        let config = sample_config(dir.path());

        let book = load_book(&config.chapters_dir(), &config.chapters).unwrap();
        let registry = &book.registry;

        let ids: Vec<&str> = registry.chapters().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["01-basics", "02-advanced"]);

        let flat = registry.flattened();
        assert_eq!(flat.len(), 3);
        assert_eq!(flat[0], PageRecord::for_chapter("01-basics", "01-first", "First Title"));
        assert_eq!(flat[1].title, "Second Page");
        assert_eq!(flat[2].path, "02-advanced/01-deep.html");
        assert_eq!(book.sources.len(), 3);
        assert!(book.sources[2].starts_with("# Deep Dive"));
    }

    #[test]
    fn test_title_falls_back_to_stem() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "c/01-untitled.md", "no heading here");

        let book = load_book(dir.path(), &[ChapterSpec::new("c", "C")]).unwrap();
        assert_eq!(book.registry.flattened()[0].title, "01-untitled");
    }

    #[test]
    fn test_build_renders_pages_in_flatten_order() {
        let dir = sample_book();
        let config = sample_config(dir.path());

        let site = SiteBuilder::new(config).build().unwrap();
        let paths: Vec<&str> = site.pages.iter().map(|p| p.page.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "01-basics/01-first.html",
                "01-basics/02-second.html",
                "02-advanced/01-deep.html"
            ]
        );

        let second = site.find_page("01-basics/02-second.html").unwrap();
        assert!(second
            .body_html
            .contains("<a href=\"../01-basics/01-first.html\">First</a>"));
        assert_eq!(second.neighbors.next.as_ref().unwrap().title, "Deep Dive");

        let deep = &site.pages[2];
        assert!(deep.body_html.contains("<tr><th>A</th></tr>"));
        assert!(deep.neighbors.next.is_none());
        assert!(site.index.is_none());
        assert!(site.word_count > 0);
    }

    #[test]
    fn test_build_with_index_file() {
        let dir = sample_book();
        let mut config = sample_config(dir.path());
        write(dir.path(), "index.md", "# Welcome\n\nStart at [[Deep Dive]].");
        config.paths.index = Some(PathBuf::from("index.md"));

        let site = SiteBuilder::new(config).build().unwrap();
        let index = site.index.unwrap();
        assert!(index
            .body_html
            .contains("<a href=\"02-advanced/01-deep.html\">Deep Dive</a>"));
    }

    #[test]
    fn test_missing_index_file_is_an_error() {
        let dir = sample_book();
        let mut config = sample_config(dir.path());
        config.paths.index = Some(PathBuf::from("absent.md"));

        let err = SiteBuilder::new(config).build().unwrap_err();
        assert!(matches!(err, BuildError::Io { .. }));
    }
}
