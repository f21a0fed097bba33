//! Line-oriented markdown to HTML transpiler.
//!
//! This is deliberately not a CommonMark implementation. Every source line is
//! classified on its own against a fixed precedence (fence, heading,
//! blockquote, table, list, paragraph) and most malformed input degrades to
//! something printable instead of failing.

pub mod inline;
pub mod wikilinks;

use serde::{Deserialize, Serialize};

pub use inline::format_inline;
pub use wikilinks::WikilinkResolver;

/// Number of previously emitted lines scanned when deciding whether a table
/// row is a header row or a data row
pub const TABLE_HEADER_LOOKBACK: usize = 5;

const FENCE: &str = "```";

/// How table rows are classified as header (`th`) or data (`td`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableHeaderMode {
    /// A row is a header unless one of the last [`TABLE_HEADER_LOOKBACK`]
    /// output lines already holds a row. Interleaved separators or unrelated
    /// lines can turn several rows into headers.
    #[default]
    Lookback,
    /// Only the first row of each table is a header
    Persistent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn open_tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "<ul>",
            ListKind::Ordered => "<ol>",
        }
    }

    fn close_tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "</ul>",
            ListKind::Ordered => "</ol>",
        }
    }
}

/// The single active block context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockState {
    None,
    Code,
    List(ListKind),
    Table { rows: usize },
}

/// Markdown processor for the constrained book dialect
#[derive(Debug, Clone, Default)]
pub struct MarkdownProcessor {
    table_headers: TableHeaderMode,
}

impl MarkdownProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table_headers(mut self, mode: TableHeaderMode) -> Self {
        self.table_headers = mode;
        self
    }

    /// Convert markdown to an HTML body fragment
    pub fn convert(&self, markdown: &str) -> String {
        self.convert_lines(markdown).join("\n")
    }

    /// Convert markdown to HTML fragment lines
    pub fn convert_lines(&self, markdown: &str) -> Vec<String> {
        let mut transpiler = Transpiler::new(self.table_headers);
        for line in markdown.split('\n') {
            transpiler.push_line(line.strip_suffix('\r').unwrap_or(line));
        }
        transpiler.finish()
    }
}

struct Transpiler {
    mode: TableHeaderMode,
    state: BlockState,
    out: Vec<String>,
}

impl Transpiler {
    fn new(mode: TableHeaderMode) -> Self {
        Self {
            mode,
            state: BlockState::None,
            out: Vec::new(),
        }
    }

    fn push_line(&mut self, line: &str) {
        if line.starts_with(FENCE) {
            if self.state == BlockState::Code {
                self.out.push("</code></pre>".to_string());
                self.state = BlockState::None;
            } else {
                self.close_block();
                self.out.push("<pre><code>".to_string());
                self.state = BlockState::Code;
            }
            return;
        }

        if self.state == BlockState::Code {
            self.out.push(line.to_string());
            return;
        }

        // Headings and blockquotes leave any open list or table untouched
        if let Some(heading) = heading(line) {
            self.out.push(heading);
            return;
        }

        if let Some(quote) = line.strip_prefix("> ") {
            self.out.push(format!("<blockquote>{}</blockquote>", quote));
            return;
        }

        let trimmed = line.trim();

        if line.contains('|') && trimmed.starts_with('|') {
            self.push_table_line(trimmed);
            return;
        } else if matches!(self.state, BlockState::Table { .. }) {
            self.out.push("</table>".to_string());
            self.state = BlockState::None;
        }

        if let Some((kind, item)) = list_item(trimmed) {
            if !matches!(self.state, BlockState::List(_)) {
                self.out.push(kind.open_tag().to_string());
                self.state = BlockState::List(kind);
            }
            self.out.push(format!("<li>{}</li>", item));
            return;
        }

        // A list only ends at a blank line; other lines render inside it
        if let BlockState::List(kind) = self.state {
            if trimmed.is_empty() {
                self.out.push(kind.close_tag().to_string());
                self.state = BlockState::None;
            }
        }

        let formatted = format_inline(line);
        if formatted.trim().is_empty() {
            self.out.push(String::new());
        } else {
            self.out.push(format!("<p>{}</p>", formatted));
        }
    }

    fn push_table_line(&mut self, trimmed: &str) {
        let rows = match self.state {
            BlockState::Table { rows } => rows,
            _ => {
                self.close_block();
                self.out.push("<table>".to_string());
                0
            }
        };
        self.state = BlockState::Table { rows };

        if is_separator_row(trimmed) {
            return;
        }

        let header = match self.mode {
            TableHeaderMode::Lookback => !self
                .out
                .iter()
                .rev()
                .take(TABLE_HEADER_LOOKBACK)
                .any(|l| l.contains("<tr>")),
            TableHeaderMode::Persistent => rows == 0,
        };
        let tag = if header { "th" } else { "td" };

        let fields: Vec<&str> = trimmed.split('|').collect();
        let cells = if fields.len() >= 2 {
            &fields[1..fields.len() - 1]
        } else {
            &[][..]
        };

        let mut row = String::from("<tr>");
        for cell in cells {
            row.push_str(&format!("<{tag}>{}</{tag}>", cell.trim()));
        }
        row.push_str("</tr>");

        self.out.push(row);
        self.state = BlockState::Table { rows: rows + 1 };
    }

    /// Close the active list or table before another block context opens
    fn close_block(&mut self) {
        match self.state {
            BlockState::None => {}
            BlockState::Code => self.out.push("</code></pre>".to_string()),
            BlockState::List(kind) => self.out.push(kind.close_tag().to_string()),
            BlockState::Table { .. } => self.out.push("</table>".to_string()),
        }
        self.state = BlockState::None;
    }

    fn finish(mut self) -> Vec<String> {
        self.close_block();
        self.out
    }
}

fn heading(line: &str) -> Option<String> {
    if let Some(rest) = line.strip_prefix("# ") {
        Some(format!("<h1>{}</h1>", rest))
    } else if let Some(rest) = line.strip_prefix("## ") {
        Some(format!("<h2>{}</h2>", rest))
    } else {
        line.strip_prefix("### ")
            .map(|rest| format!("<h3>{}</h3>", rest))
    }
}

fn is_separator_row(trimmed: &str) -> bool {
    trimmed
        .chars()
        .all(|c| c == '|' || c == '-' || c.is_whitespace())
}

/// Recognize `- item`, `* item` and `1. item` (at most two digits)
fn list_item(trimmed: &str) -> Option<(ListKind, &str)> {
    if let Some(item) = trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
    {
        return Some((ListKind::Unordered, item));
    }

    let digits = trimmed.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 || digits > 2 {
        return None;
    }
    trimmed[digits..]
        .strip_prefix(". ")
        .map(|item| (ListKind::Ordered, item))
}
