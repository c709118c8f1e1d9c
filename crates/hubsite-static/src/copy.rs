//! Recursive directory copy with path-segment exclusions.

use std::fs;
use std::io;
use std::path::Path;

use walkdir::WalkDir;

/// Copy everything under `source` into `destination`.
///
/// Entries whose path relative to `source` contains one of the `exclude`
/// segments (e.g. `.git`, `node_modules`) are skipped together with their
/// contents. Existing files in `destination` are overwritten. Returns the
/// number of files copied.
pub fn copy_tree(source: &Path, destination: &Path, exclude: &[String]) -> io::Result<usize> {
    fs::create_dir_all(destination)?;

    let mut copied = 0;

    let walker = WalkDir::new(source)
        .min_depth(1)
        .into_iter()
        .filter_entry(|entry| !is_excluded(entry.path(), source, exclude));

    for entry in walker {
        let entry = entry.map_err(io::Error::other)?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(io::Error::other)?;
        let target = destination.join(relative);

        let file_type = entry.file_type();
        if file_type.is_dir() {
            fs::create_dir_all(&target)?;
        } else if file_type.is_file() {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        } else {
            tracing::debug!("Skipping non-regular file {}", entry.path().display());
        }
    }

    Ok(copied)
}

fn is_excluded(path: &Path, root: &Path, exclude: &[String]) -> bool {
    let Ok(relative) = path.strip_prefix(root) else {
        return false;
    };

    relative.components().any(|component| {
        let segment = component.as_os_str();
        exclude.iter().any(|name| segment == name.as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn default_exclude() -> Vec<String> {
        vec![".git".to_string(), "node_modules".to_string()]
    }

    #[test]
    fn copies_nested_files() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("src");
        let dst = temp.path().join("dst");
        fs::create_dir_all(src.join("assets/img")).unwrap();
        fs::write(src.join("index.html"), "<h1>hi</h1>").unwrap();
        fs::write(src.join("assets/img/logo.svg"), "<svg/>").unwrap();

        let count = copy_tree(&src, &dst, &default_exclude()).unwrap();

        assert_eq!(count, 2);
        assert_eq!(fs::read_to_string(dst.join("index.html")).unwrap(), "<h1>hi</h1>");
        assert!(dst.join("assets/img/logo.svg").exists());
    }

    #[test]
    fn skips_excluded_segments() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("src");
        let dst = temp.path().join("dst");
        fs::create_dir_all(src.join(".git/objects")).unwrap();
        fs::create_dir_all(src.join("lib/node_modules/pkg")).unwrap();
        fs::write(src.join(".git/HEAD"), "ref").unwrap();
        fs::write(src.join("lib/node_modules/pkg/index.js"), "x").unwrap();
        fs::write(src.join("lib/main.js"), "y").unwrap();

        let count = copy_tree(&src, &dst, &default_exclude()).unwrap();

        assert_eq!(count, 1);
        assert!(dst.join("lib/main.js").exists());
        assert!(!dst.join(".git").exists());
        assert!(!dst.join("lib/node_modules").exists());
    }

    #[test]
    fn exclusion_ignores_segments_above_source() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("node_modules/project");
        let dst = temp.path().join("dst");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("index.html"), "ok").unwrap();

        let count = copy_tree(&src, &dst, &default_exclude()).unwrap();

        assert_eq!(count, 1);
        assert!(dst.join("index.html").exists());
    }

    #[test]
    fn overwrites_existing_files() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("src");
        let dst = temp.path().join("dst");
        fs::create_dir_all(&src).unwrap();
        fs::create_dir_all(&dst).unwrap();
        fs::write(src.join("a.txt"), "new").unwrap();
        fs::write(dst.join("a.txt"), "old").unwrap();

        copy_tree(&src, &dst, &[]).unwrap();

        assert_eq!(fs::read_to_string(dst.join("a.txt")).unwrap(), "new");
    }
}
