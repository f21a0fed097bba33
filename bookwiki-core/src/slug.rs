//! Slug generation and normalization.

/// Convert a string to a URL-safe slug
///
/// Rules:
/// - Lowercase
/// - Remove everything except `a-z`, `0-9`, whitespace, underscores and hyphens
/// - Collapse runs of whitespace, underscores and hyphens into one hyphen
/// - Trim leading/trailing hyphens
///
/// A title made only of punctuation slugifies to the empty string.
///
/// # Examples
///
/// ```
/// use bookwiki_core::slugify;
///
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// assert_eq!(slugify("Business & Market Context"), "business-market-context");
/// assert_eq!(slugify("???"), "");
/// ```
pub fn slugify(input: &str) -> String {
    let lowercased = input.to_lowercase();

    let mut slug = String::with_capacity(lowercased.len());
    let mut pending_hyphen = false;

    for c in lowercased.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen {
                slug.push('-');
                pending_hyphen = false;
            }
            slug.push(c);
        } else if c.is_whitespace() || c == '_' || c == '-' {
            pending_hyphen = true;
        }
        // Anything else is dropped without breaking the current run
    }

    // Leading separators still emit a hyphen before the first word
    slug.trim_matches('-').to_string()
}
