//! Wikilink resolution for [[target]] and [[target|text]] syntax.

use crate::registry::Registry;
use crate::slug::slugify;
use bookwiki_types::PageRecord;
use regex::{Captures, Regex};
use std::sync::OnceLock;

static WIKILINK_REGEX: OnceLock<Regex> = OnceLock::new();

fn wikilink_regex() -> &'static Regex {
    WIKILINK_REGEX.get_or_init(|| Regex::new(r"\[\[([^\]]+)\]\]").unwrap())
}

/// Rewrites wikilinks in raw markdown into anchors
///
/// Runs on the raw source before block transpilation, so the display text of
/// a resolved link still goes through bold/italic/code substitution.
pub struct WikilinkResolver<'a> {
    registry: &'a Registry,
    base_path: &'a str,
}

impl<'a> WikilinkResolver<'a> {
    /// `base_path` prefixes every href ("../" for chapter pages, "" for the index)
    pub fn new(registry: &'a Registry, base_path: &'a str) -> Self {
        Self {
            registry,
            base_path,
        }
    }

    /// Rewrite every wikilink in `text`
    pub fn resolve(&self, text: &str) -> String {
        if !text.contains("[[") {
            return text.to_string();
        }

        wikilink_regex()
            .replace_all(text, |caps: &Captures<'_>| {
                let (target, display) = split_wikilink(&caps[1]);
                match self.lookup(target) {
                    Some(page) => {
                        format!("<a href=\"{}\">{}</a>", page.href(self.base_path), display)
                    }
                    None => display.to_string(),
                }
            })
            .into_owned()
    }

    /// First page in flatten order whose slug contains the target slug, or
    /// whose slugified title equals it
    ///
    /// A target that slugifies to nothing is a substring of every slug, so
    /// it lands on the first page.
    pub fn lookup(&self, target: &str) -> Option<&'a PageRecord> {
        let candidate = slugify(target);
        self.registry
            .flattened()
            .iter()
            .find(|page| page.slug.contains(&candidate) || slugify(&page.title) == candidate)
    }
}

/// Split `Target|Display` on the first pipe
fn split_wikilink(inner: &str) -> (&str, &str) {
    match inner.split_once('|') {
        Some((target, display)) => (target, display),
        None => (inner, inner),
    }
}
