//! Shortening of long archive paths for table cells
//!
//! Only affects what is printed; file deltas keep their full paths.

const FRAMEWORK_MARKER: &str = ".framework/";

/// Paths mentioning a framework are shortened beyond this many characters
pub const FRAMEWORK_PATH_LIMIT: usize = 40;
/// The part after `.framework/` is cut to its tail beyond this many characters
pub const FRAMEWORK_FILE_PART_LIMIT: usize = 25;
/// Other paths are cut to their tail beyond this many characters
pub const PATH_LIMIT: usize = 50;

/// Shorten an archive path for display
///
/// Framework paths keep `<name>.framework/` followed by the (possibly
/// tail-truncated) file part; other long paths keep their tail.
///
/// # Examples
///
/// ```
/// use ipa_diff::report::display::display_path;
///
/// assert_eq!(
///     display_path("Payload/Runner.app/Frameworks/App.framework/flutter_assets/AssetManifest.bin"),
///     "App.framework/...sets/AssetManifest.bin"
/// );
/// assert_eq!(display_path("Payload/Runner.app/icon.png"), "Payload/Runner.app/icon.png");
/// ```
pub fn display_path(path: &str) -> String {
    let length = path.chars().count();

    if path.contains("Framework") && length > FRAMEWORK_PATH_LIMIT {
        let parts: Vec<&str> = path.split(FRAMEWORK_MARKER).collect();
        match parts.as_slice() {
            [host, file_part] => {
                let name = host.rsplit('/').next().unwrap_or(host);
                let file_part = if file_part.chars().count() > FRAMEWORK_FILE_PART_LIMIT {
                    format!("...{}", tail(file_part, FRAMEWORK_FILE_PART_LIMIT - 3))
                } else {
                    file_part.to_string()
                };
                format!("{}.framework/{}", name, file_part)
            }
            _ => path.to_string(),
        }
    } else if length > PATH_LIMIT {
        format!("...{}", tail(path, PATH_LIMIT - 3))
    } else {
        path.to_string()
    }
}

/// Last `count` characters of `s`
fn tail(s: &str, count: usize) -> &str {
    let skip = s.chars().count().saturating_sub(count);
    s.char_indices()
        .nth(skip)
        .map_or("", |(index, _)| &s[index..])
}

/// Truncate a label with an ellipsis if it exceeds `max_len` characters
///
/// # Examples
///
/// ```
/// use ipa_diff::report::display::truncate_str;
///
/// assert_eq!(truncate_str("short", 10), "short");
/// assert_eq!(truncate_str("Framework - very_long_name", 12), "Framework...");
/// ```
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_paths_are_unchanged() {
        assert_eq!(display_path("a/b.png"), "a/b.png");
        assert_eq!(
            display_path("Frameworks/Foo.framework/Foo"),
            "Frameworks/Foo.framework/Foo"
        );
    }

    #[test]
    fn test_framework_path_keeps_framework_and_file() {
        assert_eq!(
            display_path("Payload/Runner.app/Frameworks/Flutter.framework/Flutter"),
            "Flutter.framework/Flutter"
        );
    }

    #[test]
    fn test_framework_file_part_is_tail_truncated() {
        let shown = display_path(
            "Payload/Runner.app/Frameworks/App.framework/flutter_assets/packages/cupertino_icons/assets/CupertinoIcons.ttf",
        );
        assert_eq!(shown, "App.framework/...ets/CupertinoIcons.ttf");
        assert_eq!(shown.len(), "App.framework/".len() + 25);
    }

    #[test]
    fn test_nested_framework_path_is_left_alone() {
        // Two markers split into three parts
        let path = "Payload/Runner.app/Frameworks/Outer.framework/Frameworks/Inner.framework/Inner";
        assert_eq!(display_path(path), path);
    }

    #[test]
    fn test_long_plain_path_keeps_tail() {
        let path = "Payload/Runner.app/Assets/Images/Onboarding/Background/hero_image@3x.png";
        let shown = display_path(path);
        assert!(shown.starts_with("..."));
        assert_eq!(shown.len(), 50);
        assert!(shown.ends_with("hero_image@3x.png"));
    }

    #[test]
    fn test_lowercase_framework_word_uses_plain_rule() {
        // Marker check needs the capitalised word
        let path = "Payload/Runner.app/plugins/some_library.framework/some_library_resources.dat";
        let shown = display_path(path);
        assert_eq!(shown.chars().count(), 50);
    }

    #[test]
    fn test_tail_handles_multibyte_characters() {
        assert_eq!(tail("日本語テキスト", 3), "キスト");
        assert_eq!(tail("ab", 5), "ab");
    }

    #[test]
    fn test_truncate_str_edge_cases() {
        assert_eq!(truncate_str("test", 4), "test");
        assert_eq!(truncate_str("test", 2), "...");
        assert_eq!(truncate_str("abcdefghij", 8), "abcde...");
    }
}
