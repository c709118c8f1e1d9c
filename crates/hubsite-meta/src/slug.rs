//! Slug generation from directory names.

use std::sync::LazyLock;

use regex::Regex;

static CAMEL_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid camel-case pattern"));

static NON_ALNUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9]+").expect("valid separator pattern"));

static HYPHEN_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-{2,}").expect("valid hyphen pattern"));

/// Convert a directory name into a lowercase, hyphen-separated slug.
///
/// Camel-case boundaries become word breaks (`BetaSite` -> `beta-site`) and
/// every run of non-alphanumeric characters collapses to a single hyphen.
/// Names with no ASCII alphanumerics at all fall back to the lowercased
/// original so that every project still gets a path segment.
pub fn slugify(name: &str) -> String {
    let split = CAMEL_BOUNDARY.replace_all(name, "$1-$2");
    let hyphenated = NON_ALNUM.replace_all(&split, "-");
    let collapsed = HYPHEN_RUN.replace_all(&hyphenated, "-");
    let slug = collapsed.trim_matches('-').to_lowercase();

    if slug.is_empty() {
        name.to_lowercase()
    } else {
        slug
    }
}

/// Normalize a URL base path to `/segment` form: one leading slash, no
/// trailing slash. The site root normalizes to an empty string.
pub fn normalize_base_path(base: &str) -> String {
    let trimmed = base.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

/// Public URL of a published project: `<base>/<slug>/`.
pub fn publish_href(base_path: &str, slug: &str) -> String {
    format!("{}/{}/", normalize_base_path(base_path), slug)
}
