/// Normalizes a page title into a path-safe archive stem: path separators
/// and whitespace become `_`. Returns `None` when nothing usable remains.
pub fn sanitize_title(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .trim()
        .chars()
        .map(|c| if c == '/' || c.is_whitespace() { '_' } else { c })
        .collect();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// File name for a page's archive. The title must already be sanitized.
pub fn archive_filename(title: &str) -> String {
    format!("{title}.zip")
}

#[cfg(test)]
mod tests {
    use super::{archive_filename, sanitize_title};

    #[test]
    fn replaces_separators_and_spaces() {
        assert_eq!(
            sanitize_title("A Title / With Parts").as_deref(),
            Some("A_Title___With_Parts")
        );
    }

    #[test]
    fn trims_before_replacing() {
        assert_eq!(sanitize_title("  padded  ").as_deref(), Some("padded"));
    }

    #[test]
    fn empty_titles_are_rejected() {
        assert_eq!(sanitize_title(""), None);
        assert_eq!(sanitize_title("   "), None);
    }

    #[test]
    fn archive_filename_appends_extension() {
        assert_eq!(archive_filename("My_Title"), "My_Title.zip");
    }
}
