//! # bookwiki-core
//!
//! Core library for the bookwiki static site generator.
//!
//! This crate turns an ordered set of chapter directories into rendered page
//! bodies: it builds the page registry, resolves `[[wikilinks]]`, transpiles
//! the constrained markdown dialect and derives sidebar and prev/next
//! navigation. Wrapping bodies into full documents lives in `bookwiki-render`.

pub mod builder;
pub mod config;
pub mod markdown;
pub mod models;
pub mod navigation;
pub mod pipeline;
pub mod registry;
pub mod slug;

pub use builder::{load_book, BuildError, LoadedBook, SiteBuilder};
pub use config::{Config, ConfigError};
pub use markdown::{MarkdownProcessor, TableHeaderMode, WikilinkResolver};
pub use models::{RenderedIndex, RenderedPage, Site};
pub use navigation::{NavLink, Neighbors, Sidebar, SidebarEntry, SidebarGroup};
pub use pipeline::{PagePipeline, CHAPTER_BASE_PATH, INDEX_BASE_PATH};
pub use registry::{Registry, RegistryError};
pub use slug::slugify;

pub use bookwiki_types::{ChapterRecord, ChapterSpec, PageRecord};
