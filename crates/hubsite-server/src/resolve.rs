//! Mapping request paths onto the publish root.

use std::path::{Component, Path, PathBuf};

/// Outcome of resolving a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The request maps to this file system path (which may not exist)
    File(PathBuf),

    /// The path lies outside the base path
    OutsideBase,

    /// The normalized path climbs above the publish root
    Escapes,
}

/// Resolve a raw request target (path plus optional query/fragment).
///
/// `base_path` must already be normalized (`/hub`, or empty for the site
/// root). Empty or directory-like paths resolve to their `index.html`.
pub fn resolve_request_path(request: &str, base_path: &str, root: &Path) -> Resolution {
    let Some(rest) = strip_base(request, base_path) else {
        return Resolution::OutsideBase;
    };

    let rest = rest.strip_prefix('/').unwrap_or(rest);
    let clean = rest.split(['?', '#']).next().unwrap_or_default();

    let target = if clean.is_empty() || clean.ends_with('/') {
        format!("{}index.html", clean)
    } else {
        clean.to_string()
    };

    match normalize(&target) {
        Some(segments) => {
            let mut path = root.to_path_buf();
            path.extend(segments);
            Resolution::File(path)
        }
        None => Resolution::Escapes,
    }
}

/// The part of `request` after `base_path`, if the request is under it.
fn strip_base<'a>(request: &'a str, base_path: &str) -> Option<&'a str> {
    let rest = request.strip_prefix(base_path)?;

    if rest.is_empty() || rest.starts_with(['/', '?', '#']) {
        Some(rest)
    } else {
        None
    }
}

/// Lexically normalize a relative path into its segments.
///
/// Returns `None` when a `..` would climb above the starting directory, or
/// when a segment is not a plain file name (a drive prefix such as `C:`
/// would replace the root when pushed).
fn normalize(path: &str) -> Option<Vec<&str>> {
    let mut segments = Vec::new();

    for segment in path.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            s if is_plain_name(s) => segments.push(s),
            _ => return None,
        }
    }

    Some(segments)
}

/// A single normal path component with no drive or volume syntax.
fn is_plain_name(segment: &str) -> bool {
    let mut components = Path::new(segment).components();

    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !segment.contains(':')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> PathBuf {
        PathBuf::from("/srv/site")
    }

    fn file(rel: &str) -> Resolution {
        Resolution::File(root().join(rel))
    }

    #[test]
    fn base_root_resolves_to_index() {
        assert_eq!(resolve_request_path("/hub", "/hub", &root()), file("index.html"));
        assert_eq!(resolve_request_path("/hub/", "/hub", &root()), file("index.html"));
        assert_eq!(resolve_request_path("/hub?x=1", "/hub", &root()), file("index.html"));
    }

    #[test]
    fn directory_like_paths_get_index() {
        assert_eq!(
            resolve_request_path("/hub/alpha/", "/hub", &root()),
            file("alpha/index.html")
        );
    }

    #[test]
    fn strips_query_and_fragment() {
        assert_eq!(
            resolve_request_path("/hub/app.js?v=3", "/hub", &root()),
            file("app.js")
        );
        assert_eq!(
            resolve_request_path("/hub/page.html#top", "/hub", &root()),
            file("page.html")
        );
    }

    #[test]
    fn outside_base_is_rejected() {
        assert_eq!(resolve_request_path("/other/x", "/hub", &root()), Resolution::OutsideBase);
        assert_eq!(resolve_request_path("/hubble", "/hub", &root()), Resolution::OutsideBase);
    }

    #[test]
    fn traversal_is_detected() {
        assert_eq!(
            resolve_request_path("/hub/../secret.txt", "/hub", &root()),
            Resolution::Escapes
        );
        assert_eq!(
            resolve_request_path("/hub/alpha/../../etc/passwd", "/hub", &root()),
            Resolution::Escapes
        );
        assert_eq!(
            resolve_request_path("/hub/a\\..\\..\\x", "/hub", &root()),
            Resolution::Escapes
        );
    }

    #[test]
    fn drive_prefixes_are_rejected() {
        assert_eq!(
            resolve_request_path("/hub/C:/Windows/win.ini", "/hub", &root()),
            Resolution::Escapes
        );
        assert_eq!(
            resolve_request_path("/hub/alpha/c:x", "/hub", &root()),
            Resolution::Escapes
        );
        assert_eq!(
            resolve_request_path("/hub/file.txt:stream", "/hub", &root()),
            Resolution::Escapes
        );
    }

    #[test]
    fn inner_parent_segments_are_normalized() {
        assert_eq!(
            resolve_request_path("/hub/alpha/../beta/./index.html", "/hub", &root()),
            file("beta/index.html")
        );
        assert_eq!(
            resolve_request_path("/hub//etc/passwd", "/hub", &root()),
            file("etc/passwd")
        );
    }

    #[test]
    fn empty_base_serves_site_root() {
        assert_eq!(resolve_request_path("/alpha/", "", &root()), file("alpha/index.html"));
    }
}
