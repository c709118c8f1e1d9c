//! Content types by file extension.

use std::path::Path;

/// Fallback for unknown extensions.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

const CONTENT_TYPES: &[(&str, &str)] = &[
    ("html", "text/html; charset=utf-8"),
    ("css", "text/css; charset=utf-8"),
    ("js", "application/javascript; charset=utf-8"),
    ("json", "application/json; charset=utf-8"),
    ("svg", "image/svg+xml"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("ico", "image/x-icon"),
    ("txt", "text/plain; charset=utf-8"),
    ("map", "application/json; charset=utf-8"),
];

/// Content type for a file, judged by its extension (case-insensitive).
pub fn content_type(path: &Path) -> &'static str {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return DEFAULT_CONTENT_TYPE;
    };

    CONTENT_TYPES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(ext))
        .map(|(_, content_type)| *content_type)
        .unwrap_or(DEFAULT_CONTENT_TYPE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions() {
        assert_eq!(content_type(Path::new("index.html")), "text/html; charset=utf-8");
        assert_eq!(content_type(Path::new("a/b/app.js")), "application/javascript; charset=utf-8");
        assert_eq!(content_type(Path::new("photo.JPG")), "image/jpeg");
        assert_eq!(content_type(Path::new("app.js.map")), "application/json; charset=utf-8");
    }

    #[test]
    fn unknown_extensions_are_binary() {
        assert_eq!(content_type(Path::new("archive.tar.gz")), DEFAULT_CONTENT_TYPE);
        assert_eq!(content_type(Path::new("Makefile")), DEFAULT_CONTENT_TYPE);
    }
}
