//! # bookwiki-render
//!
//! Page shell rendering for bookwiki.
//!
//! This crate wraps rendered page bodies into complete HTML documents using
//! Askama templates: the sidebar, the prev/next control and the generated
//! index body.

pub mod templates;

pub use templates::{
    group_thousands, IndexTemplate, PageAssembler, PageTemplate, RenderError, SidebarTemplate,
    STYLESHEET,
};
