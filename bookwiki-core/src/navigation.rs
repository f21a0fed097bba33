//! Sidebar and prev/next navigation derived from registry order.

use crate::registry::Registry;
use bookwiki_types::PageRecord;
use serde::Serialize;

/// Output path of the generated index document
pub const INDEX_PATH: &str = "index.html";

/// A resolved navigation link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub title: String,
    pub path: String,
}

impl NavLink {
    pub fn href(&self, base_path: &str) -> String {
        format!("{}{}", base_path, self.path)
    }
}

impl From<&PageRecord> for NavLink {
    fn from(page: &PageRecord) -> Self {
        Self {
            title: page.title.clone(),
            path: page.path.clone(),
        }
    }
}

/// Neighbours of a page in flatten order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Neighbors {
    pub prev: Option<NavLink>,
    pub next: Option<NavLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarEntry {
    pub title: String,
    pub path: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarGroup {
    pub chapter_id: String,
    pub name: String,
    pub entries: Vec<SidebarEntry>,
}

/// Sidebar structure: a home link followed by one group per chapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sidebar {
    pub home: NavLink,
    pub groups: Vec<SidebarGroup>,
}

/// Build the sidebar for the page at `current_path`
///
/// Pass [`INDEX_PATH`] (or any path not in the registry) to get a sidebar
/// with no active page entry.
pub fn sidebar(registry: &Registry, current_path: &str) -> Sidebar {
    let groups = registry
        .chapters()
        .iter()
        .map(|chapter| SidebarGroup {
            chapter_id: chapter.id.clone(),
            name: chapter.display_name.clone(),
            entries: chapter
                .pages
                .iter()
                .map(|page| SidebarEntry {
                    title: page.title.clone(),
                    path: page.path.clone(),
                    active: page.path == current_path,
                })
                .collect(),
        })
        .collect();

    Sidebar {
        home: NavLink {
            title: "Home".to_string(),
            path: INDEX_PATH.to_string(),
        },
        groups,
    }
}

/// Previous and next pages around `current_path`
pub fn neighbors(registry: &Registry, current_path: &str) -> Neighbors {
    let flat = registry.flattened();
    let Some(idx) = registry.position(current_path) else {
        return Neighbors::default();
    };

    Neighbors {
        prev: idx.checked_sub(1).map(|i| NavLink::from(&flat[i])),
        next: flat.get(idx + 1).map(NavLink::from),
    }
}

/// Neighbours of the index document: nothing before it, the first page after
pub fn entry_neighbors(registry: &Registry) -> Neighbors {
    Neighbors {
        prev: None,
        next: registry.flattened().first().map(NavLink::from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::sample_registry;

    #[test]
    fn test_sidebar_marks_active_page() {
        let registry = sample_registry();
        let sidebar = sidebar(&registry, "01-foundations/02-training.html");

        assert_eq!(sidebar.home.path, "index.html");
        assert_eq!(sidebar.groups.len(), 2);
        assert_eq!(sidebar.groups[1].name, "The Scaling Problem");

        let active: Vec<&str> = sidebar
            .groups
            .iter()
            .flat_map(|g| g.entries.iter())
            .filter(|e| e.active)
            .map(|e| e.path.as_str())
            .collect();
        assert_eq!(active, vec!["01-foundations/02-training.html"]);
    }

    #[test]
    fn test_sidebar_for_index_has_no_active_entry() {
        let registry = sample_registry();
        let sidebar = sidebar(&registry, INDEX_PATH);
        assert!(sidebar
            .groups
            .iter()
            .flat_map(|g| g.entries.iter())
            .all(|e| !e.active));
    }

    #[test]
    fn test_first_and_last_pages() {
        let registry = sample_registry();
        let flat = registry.flattened();

        let first = neighbors(&registry, &flat[0].path);
        assert!(first.prev.is_none());
        assert_eq!(first.next.unwrap().path, flat[1].path);

        let last = neighbors(&registry, &flat[flat.len() - 1].path);
        assert!(last.next.is_none());
        assert_eq!(last.prev.unwrap().path, flat[flat.len() - 2].path);
    }

    #[test]
    fn test_interior_pages_cross_chapter_boundaries() {
        let registry = sample_registry();
        let nav = neighbors(&registry, "01-foundations/02-training.html");

        assert_eq!(nav.prev.unwrap().title, "What is AI?");
        assert_eq!(nav.next.unwrap().path, "02-scaling/01-scaling-laws.html");

        for page in &registry.flattened()[1..registry.page_count() - 1] {
            let nav = neighbors(&registry, &page.path);
            assert!(nav.prev.is_some() && nav.next.is_some());
        }
    }

    #[test]
    fn test_unknown_path_and_entry_neighbors() {
        let registry = sample_registry();
        assert_eq!(neighbors(&registry, "nowhere.html"), Neighbors::default());

        let entry = entry_neighbors(&registry);
        assert!(entry.prev.is_none());
        assert_eq!(entry.next.unwrap().path, "01-foundations/01-what-is-ai.html");

        let empty = Registry::new(Vec::new()).unwrap();
        assert_eq!(entry_neighbors(&empty), Neighbors::default());
    }
}
