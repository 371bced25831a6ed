// src/output/writer.rs
//! Performs the actual filesystem writes.
//!
//! This module is the only place where file I/O operations occur,
//! keeping the rest of the codebase pure and testable.

use crate::error::AppError;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Writes bytes to a file, creating parent directories and overwriting any
/// existing file.
pub fn write_file(path: &Path, content: &[u8]) -> Result<usize, AppError> {
    log::debug!("Writing {} bytes to {}", content.len(), path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, content)?;

    log::debug!("Wrote file: {}", path.display());
    Ok(content.len())
}

/// Serializes `value` as indented JSON and writes it to `path`.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<usize, AppError> {
    let json = serde_json::to_string_pretty(value)?;
    write_file(path, json.as_bytes())
}

/// Creates a directory and its parents. Succeeds if it already exists.
pub fn create_directory(path: &Path) -> Result<(), AppError> {
    log::debug!("Creating directory: {}", path.display());

    if path.exists() {
        if path.is_dir() {
            log::debug!("Directory already exists: {}", path.display());
            return Ok(());
        } else {
            return Err(AppError::Io(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!("Path exists but is not a directory: {}", path.display()),
            )));
        }
    }

    fs::create_dir_all(path)?;
    log::debug!("Created directory: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_directory_is_idempotent() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("a/b/c");
        create_directory(&dir).unwrap();
        create_directory(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn create_directory_rejects_files() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("file");
        fs::write(&file, b"x").unwrap();
        assert!(create_directory(&file).is_err());
    }

    #[test]
    fn write_json_overwrites_with_indented_output() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("out/page.json");
        write_file(&path, b"old contents that are longer").unwrap();
        write_json(&path, &json!({ "a": 1 })).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\n  \"a\": 1\n}");
    }
}
