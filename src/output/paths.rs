// src/output/paths.rs
//! Pure functions for path calculations and filename generation.
//!
//! This module handles all path-related operations without
//! performing any I/O operations.

use std::path::{Component, Path, PathBuf};

/// Sanitizes a string to be safe for use as a filename.
pub fn sanitize_filename(name: &str) -> String {
    let mut safe_name = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect::<String>();

    // Trim whitespace and dots
    safe_name = safe_name.trim().trim_matches('.').to_string();

    // Limit length
    if safe_name.chars().count() > 100 {
        safe_name = safe_name.chars().take(100).collect();
    }

    // Default if empty
    if safe_name.is_empty() {
        safe_name = "unnamed".to_string();
    }

    safe_name
}

/// File name of a page's exported JSON.
pub fn page_data_filename(page_id: &str) -> String {
    format!("{}.json", sanitize_filename(page_id))
}

/// Expresses `target` relative to `base_dir`, with forward slashes so the
/// reference works as a URL path too. Falls back to `target` itself when
/// no relative path exists (different drive, relative vs absolute).
pub fn relative_reference(target: &Path, base_dir: &Path) -> String {
    let relative = pathdiff::diff_paths(target, base_dir).unwrap_or_else(|| target.to_path_buf());
    relative.to_string_lossy().replace('\\', "/")
}

/// Normalizes a path by resolving `..` and `.` components.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::ParentDir => {
                let last = components.last().copied();
                match last {
                    // `..` at the root stays at the root.
                    Some(Component::RootDir | Component::Prefix(_)) => {}
                    Some(Component::Normal(_)) => {
                        components.pop();
                    }
                    _ => components.push(component),
                }
            }
            Component::CurDir => {}
            c => components.push(c),
        }
    }

    components.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Hello/World"), "Hello_World");
        assert_eq!(sanitize_filename("Test:File*Name"), "Test_File_Name");
        assert_eq!(sanitize_filename("   spaces   "), "spaces");
        assert_eq!(sanitize_filename("...dots..."), "dots");
        assert_eq!(sanitize_filename(""), "unnamed");
    }

    #[test]
    fn test_page_data_filename() {
        assert_eq!(page_data_filename("abc123"), "abc123.json");
    }

    #[test]
    fn test_relative_reference() {
        let reference = relative_reference(
            Path::new("/work/site/public/notion-data/abc/1.png"),
            Path::new("/work/site"),
        );
        assert_eq!(reference, "public/notion-data/abc/1.png");

        let reference = relative_reference(Path::new("/elsewhere/1.png"), Path::new("/work/site"));
        assert_eq!(reference, "../../elsewhere/1.png");
    }

    #[test]
    fn test_normalize_path() {
        let path = Path::new("/home/user/../user/./file.txt");
        assert_eq!(normalize_path(path), Path::new("/home/user/file.txt"));

        // `..` never climbs above the root.
        assert_eq!(normalize_path(Path::new("/a/../../x")), Path::new("/x"));
        assert_eq!(normalize_path(Path::new("/../..")), Path::new("/"));
        // A relative path keeps its leading parents.
        assert_eq!(normalize_path(Path::new("../a/../b")), Path::new("../b"));
    }
}
