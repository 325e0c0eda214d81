//! Shared text normalization helpers.

/// Trim an optional string and drop empty values.
///
/// # Returns
/// `None` when the input is missing or whitespace-only; otherwise the trimmed
/// string.
pub fn normalize_optional_nonempty(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Borrowed variant of [`normalize_optional_nonempty`].
pub fn trimmed_nonempty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Return the final path component of `path`, accepting both separators.
pub fn path_basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Longest prefix of `content` that fits in `max_bytes` without splitting a
/// UTF-8 character.
pub fn utf8_prefix(content: &str, max_bytes: usize) -> &str {
    if content.len() <= max_bytes {
        return content;
    }
    let mut end = max_bytes;
    while end > 0 && !content.is_char_boundary(end) {
        end = end.saturating_sub(1);
    }
    &content[..end]
}

#[cfg(test)]
mod tests {
    use super::{normalize_optional_nonempty, path_basename, trimmed_nonempty, utf8_prefix};

    #[test]
    fn normalize_optional_nonempty_trims_and_drops_blank() {
        assert_eq!(
            normalize_optional_nonempty(Some("  value  ".to_string())),
            Some("value".to_string())
        );
        assert_eq!(normalize_optional_nonempty(Some("   ".to_string())), None);
        assert_eq!(normalize_optional_nonempty(None), None);
        assert_eq!(trimmed_nonempty(Some(" python ")), Some("python"));
        assert_eq!(trimmed_nonempty(Some("\t")), None);
    }

    #[test]
    fn path_basename_handles_both_separators() {
        assert_eq!(path_basename("src/main.rs"), "main.rs");
        assert_eq!(path_basename("C:\\work\\build.ps1"), "build.ps1");
        assert_eq!(path_basename("Makefile"), "Makefile");
        assert_eq!(path_basename("dir/"), "");
    }

    #[test]
    fn utf8_prefix_never_splits_characters() {
        let text = "aé€";
        assert_eq!(utf8_prefix(text, 2), "a");
        assert_eq!(utf8_prefix(text, 3), "aé");
        assert_eq!(utf8_prefix(text, 64), text);
    }
}
