//! Directory-name normalization for page labels
//!
//! Labels coming off the platform are free-form ("Épreuve Finale!", "TP 1")
//! and have to become deterministic, filesystem-safe directory names. The
//! mapping is intentionally lossy: two distinct labels can normalize to the
//! same slug, in which case their contents merge into one directory. That
//! merge is accepted behavior, not something the crawler detects.

use deunicode::deunicode;

/// Normalizes a label into a directory-safe slug
///
/// # Normalization Steps
///
/// 1. Strip diacritics (transliterate to ASCII)
/// 2. Lower-case
/// 3. Drop every character outside `[a-z0-9\s-]`
/// 4. Map whitespace runs to single hyphens
/// 5. Collapse repeated hyphens
/// 6. Trim leading/trailing hyphens
///
/// A label that normalizes to nothing at all falls back to `"untitled"` so
/// the result is always a usable path component.
///
/// # Examples
///
/// ```
/// use atelier_mirror::slug::normalize;
///
/// assert_eq!(normalize("Épreuve Finale!"), "epreuve-finale");
/// assert_eq!(normalize("  a -- b  "), "a-b");
/// ```
pub fn normalize(label: &str) -> String {
    let ascii = deunicode(label).to_lowercase();

    let mut slug = String::with_capacity(ascii.len());
    for c in ascii.chars() {
        if c.is_whitespace() {
            slug.push('-');
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            slug.push(c);
        }
        // everything else is dropped
    }

    // Collapse runs of hyphens left over from adjacent separators
    let mut collapsed = String::with_capacity(slug.len());
    for c in slug.chars() {
        if c == '-' && collapsed.ends_with('-') {
            continue;
        }
        collapsed.push(c);
    }

    let trimmed = collapsed.trim_matches('-');
    if trimmed.is_empty() {
        "untitled".to_string()
    } else {
        trimmed.to_string()
    }
}
