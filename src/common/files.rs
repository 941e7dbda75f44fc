//! Atomic artifact writes.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write `content` to `path` so readers see either the old file or the new one.
///
/// Creates parent directories, writes `<path>.tmp` alongside the target,
/// syncs it, then renames it over `path`. On failure the temp file is
/// removed and `path` is left untouched.
///
/// This replaces the pattern of:
/// ```ignore
/// fs::write(path, content)?; // a crash mid-write leaves a truncated file
/// ```
pub fn write_atomic<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, content: C) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let temp = temp_path(path);
    let result = write_and_sync(&temp, content.as_ref()).and_then(|()| {
        fs::rename(&temp, path).with_context(|| {
            format!("Failed to rename {} to {}", temp.display(), path.display())
        })
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp);
    }
    result
}

fn write_and_sync(temp: &Path, content: &[u8]) -> Result<()> {
    let mut file =
        fs::File::create(temp).with_context(|| format!("Failed to create {}", temp.display()))?;
    file.write_all(content)
        .with_context(|| format!("Failed to write {}", temp.display()))?;
    file.sync_all()
        .with_context(|| format!("Failed to sync {}", temp.display()))?;
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_atomic_creates_parents() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("include/gen/ramdisk_files.h");

        write_atomic(&out, "hello").unwrap();

        assert_eq!(fs::read_to_string(&out).unwrap(), "hello");
        assert!(!dir.path().join("include/gen/ramdisk_files.h.tmp").exists());
    }

    #[test]
    fn test_write_atomic_replaces_existing() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out.h");
        fs::write(&out, "old contents that are longer").unwrap();

        write_atomic(&out, "new").unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap(), "new");
    }

    #[test]
    fn test_failed_rename_leaves_target_and_no_temp() {
        let dir = TempDir::new().unwrap();
        // Renaming a file over a non-empty directory fails.
        let out = dir.path().join("occupied");
        fs::create_dir_all(out.join("child")).unwrap();

        assert!(write_atomic(&out, "data").is_err());
        assert!(out.join("child").is_dir());
        assert!(!dir.path().join("occupied.tmp").exists());
    }

    #[test]
    fn test_temp_path_is_sibling() {
        assert_eq!(
            temp_path(Path::new("/a/b/out.h")),
            PathBuf::from("/a/b/out.h.tmp")
        );
    }
}
