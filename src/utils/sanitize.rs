//! Utilities for turning user-facing names into safe file names.
//!
//! Flow and email names come straight from the API and end up as archive
//! entry names and output file names.

const FALLBACK_STEM: &str = "Unnamed";

/// Converts a flow or email name into a file stem.
///
/// Spaces and path separators become underscores and control characters are
/// dropped. Names that would be empty or consist only of dots fall back to
/// `Unnamed`, so the result is always a single, non-traversing path component.
///
/// # Examples
///
/// ```
/// use flow_email_extractor::utils::sanitize::file_stem;
///
/// assert_eq!(file_stem("Welcome Email #1"), "Welcome_Email_#1");
/// assert_eq!(file_stem("a/b"), "a_b");
/// ```
pub fn file_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            other => other,
        })
        .collect();

    if stem.chars().all(|c| c == '.') {
        FALLBACK_STEM.to_string()
    } else {
        stem
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spaces_become_underscores() {
        assert_eq!(file_stem("Abandoned Cart Flow"), "Abandoned_Cart_Flow");
    }

    #[test]
    fn test_path_separators_replaced() {
        assert_eq!(file_stem("../etc/passwd"), ".._etc_passwd");
        assert_eq!(file_stem(r"a\b"), "a_b");
    }

    #[test]
    fn test_control_characters_dropped() {
        assert_eq!(file_stem("line\nbreak\t"), "linebreak");
    }

    #[test]
    fn test_degenerate_names_fall_back() {
        assert_eq!(file_stem(""), "Unnamed");
        assert_eq!(file_stem(".."), "Unnamed");
        assert_eq!(file_stem("\u{7}"), "Unnamed");
    }

    #[test]
    fn test_unicode_preserved() {
        assert_eq!(file_stem("Bienvenue à bord"), "Bienvenue_à_bord");
    }
}
