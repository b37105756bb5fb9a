/// Turns a stored asset path into a client-usable URL.
///
/// Stored paths stay relative or root-relative in the database; they are
/// absolutized only when building a response. Already-absolute inputs pass
/// through untouched, so the function is idempotent. An empty path is the
/// "no image" sentinel and maps to an empty string, never an error.
pub fn resolve(path: &str, base_url: &str) -> String {
    if path.is_empty() {
        return String::new();
    }

    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }

    let base = base_url.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://x.test";

    #[test]
    fn test_empty_path_is_no_image_sentinel() {
        assert_eq!(resolve("", BASE), "");
    }

    #[test]
    fn test_absolute_urls_pass_through() {
        assert_eq!(resolve("http://cdn.test/a.png", BASE), "http://cdn.test/a.png");
        assert_eq!(
            resolve("https://cdn.test/a.png", BASE),
            "https://cdn.test/a.png"
        );
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let once = resolve("/assets/x.jpg", BASE);
        assert_eq!(resolve(&once, BASE), once);
    }

    #[test]
    fn test_root_relative_join() {
        assert_eq!(resolve("/a/b.png", BASE), "https://x.test/a/b.png");
    }

    #[test]
    fn test_relative_join() {
        assert_eq!(resolve("a/b.png", BASE), "https://x.test/a/b.png");
    }

    #[test]
    fn test_no_duplicate_separator_with_trailing_slash_base() {
        assert_eq!(resolve("/a.png", "https://x.test/"), "https://x.test/a.png");
        assert_eq!(resolve("a.png", "https://x.test/"), "https://x.test/a.png");
    }
}
