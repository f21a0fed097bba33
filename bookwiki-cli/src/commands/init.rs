//! Init command implementation.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = include_str!("../../../bookwiki.yml.example");

/// Initialize a new bookwiki project
pub fn init_project(path: Option<&Path>) -> Result<()> {
    let root = path.unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(root).with_context(|| format!("Failed to create {:?}", root))?;

    write_config(root)?;
    scaffold_chapters(root)?;

    println!("✓ bookwiki initialized in {:?}", root);
    println!("  - Edit bookwiki.yml to set the title and chapter order");
    println!("  - Write pages in chapters/<chapter-id>/");
    Ok(())
}

fn write_config(root: &Path) -> Result<()> {
    let config_path = root.join("bookwiki.yml");
    if config_path.exists() {
        println!("bookwiki.yml already exists at {:?}", config_path);
        return Ok(());
    }

    fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {:?}", config_path))?;
    println!("Created {:?}", config_path);
    Ok(())
}

fn scaffold_chapters(root: &Path) -> Result<()> {
    let chapters = root.join("chapters");
    let starters = [
        ("01-getting-started", "01-welcome.md", WELCOME),
        ("02-going-further", "01-formatting.md", FORMATTING),
    ];

    for (chapter, file, content) in starters {
        let dir = chapters.join(chapter);
        fs::create_dir_all(&dir).with_context(|| format!("Failed to create {:?}", dir))?;

        let page = dir.join(file);
        if !page.exists() {
            fs::write(&page, content).with_context(|| format!("Failed to write {:?}", page))?;
            println!("Created {:?}", page);
        }
    }

    Ok(())
}

const WELCOME: &str = r#"# Welcome

This is the first page of your book. Pages are ordered by file name within
each chapter, and chapters follow the order in `bookwiki.yml`.

Link to other pages by title with [[Formatting]] or give the link your own
text with [[formatting|the formatting guide]].

Build the site with:

```
bookwiki build
```
"#;

const FORMATTING: &str = r#"# Formatting

Use **bold**, *italic* and `code` inside paragraphs.

- Bullet lists
- work as expected

1. So do
2. numbered lists

| Syntax | Result |
|--------|--------|
| `**x**` | bold |

> Blockquotes hold a single line.

Back to [[Welcome]].
"#;
