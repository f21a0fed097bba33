//! Inline formatting: bold, italic and code spans.

use regex::Regex;
use std::sync::OnceLock;

static BOLD_REGEX: OnceLock<Regex> = OnceLock::new();
static ITALIC_REGEX: OnceLock<Regex> = OnceLock::new();
static CODE_REGEX: OnceLock<Regex> = OnceLock::new();

fn bold_regex() -> &'static Regex {
    BOLD_REGEX.get_or_init(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap())
}

fn italic_regex() -> &'static Regex {
    ITALIC_REGEX.get_or_init(|| Regex::new(r"\*([^*]+)\*").unwrap())
}

fn code_regex() -> &'static Regex {
    CODE_REGEX.get_or_init(|| Regex::new(r"`([^`]+)`").unwrap())
}

/// Apply inline substitutions in fixed order: bold, italic, then code
///
/// Code spans are substituted last, so `**x**` inside backticks is already
/// bold by the time the code span is formed.
pub fn format_inline(line: &str) -> String {
    let bolded = bold_regex().replace_all(line, "<strong>${1}</strong>");
    let emphasized = italic_regex().replace_all(&bolded, "<em>${1}</em>");
    code_regex()
        .replace_all(&emphasized, "<code>${1}</code>")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_italic_code() {
        assert_eq!(format_inline("**a**"), "<strong>a</strong>");
        assert_eq!(format_inline("*a*"), "<em>a</em>");
        assert_eq!(format_inline("`a`"), "<code>a</code>");
        assert_eq!(
            format_inline("**bold** and *it* and `x`"),
            "<strong>bold</strong> and <em>it</em> and <code>x</code>"
        );
    }

    #[test]
    fn test_order_bold_before_code() {
        assert_eq!(
            format_inline("`**x**`"),
            "<code><strong>x</strong></code>"
        );
    }

    #[test]
    fn test_unbalanced_markers_stay() {
        assert_eq!(format_inline("2 * 3 = 6"), "2 * 3 = 6");
        assert_eq!(format_inline("a ` tick"), "a ` tick");
        assert_eq!(format_inline("plain"), "plain");
    }
}
