// SPDX-License-Identifier: MPL-2.0
//! Blocking filesystem operations used by the Tools page.
//!
//! Each function maps I/O failures to [`Error::Io`] with the offending path
//! so the message can go straight into the log pane.

use crate::error::{Error, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Text of the file written by [`create_file`].
pub fn file_header(now: DateTime<Local>) -> String {
    format!(
        "# File created by Ultimate GUI\n# Created at: {}\n",
        now.format("%Y-%m-%d %H:%M:%S")
    )
}

/// Checks that `name` is a single path component.
pub fn validate_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || trimmed.contains(['/', '\\'])
    {
        return Err(Error::InvalidName(name.to_string()));
    }
    Ok(trimmed)
}

/// Writes a small header file named `name` inside `dir`.
pub fn create_file(dir: &Path, name: &str, now: DateTime<Local>) -> Result<PathBuf> {
    let path = dir.join(validate_name(name)?);
    fs::write(&path, file_header(now)).map_err(|e| Error::io_at(&path, &e))?;
    Ok(path)
}

/// First characters of a text file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePreview {
    pub name: String,
    pub content: String,
    pub truncated: bool,
}

/// Reads `path` and keeps at most `max_chars` characters.
///
/// Invalid UTF-8 is replaced rather than rejected.
pub fn read_preview(path: &Path, max_chars: usize) -> Result<FilePreview> {
    let bytes = fs::read(path).map_err(|e| Error::io_at(path, &e))?;
    let text = String::from_utf8_lossy(&bytes);

    let mut chars = text.chars();
    let content: String = chars.by_ref().take(max_chars).collect();
    let truncated = chars.next().is_some();

    Ok(FilePreview {
        name: display_name(path),
        content,
        truncated,
    })
}

pub fn delete_file(path: &Path) -> Result<()> {
    fs::remove_file(path).map_err(|e| Error::io_at(path, &e))
}

/// Removes a directory and everything below it.
pub fn delete_folder(path: &Path) -> Result<()> {
    if !path.is_dir() {
        return Err(Error::io_at(
            path,
            &io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
        ));
    }
    fs::remove_dir_all(path).map_err(|e| Error::io_at(path, &e))
}

/// Creates `dir/name` and any missing parents. An existing folder is fine.
pub fn create_folder(dir: &Path, name: &str) -> Result<PathBuf> {
    let path = dir.join(validate_name(name)?);
    fs::create_dir_all(&path).map_err(|e| Error::io_at(&path, &e))?;
    Ok(path)
}

/// Renames `path` within its parent directory.
pub fn rename_path(path: &Path, new_name: &str) -> Result<PathBuf> {
    let new_name = validate_name(new_name)?;
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let target = parent.join(new_name);

    if target == path {
        return Ok(target);
    }
    if target.exists() {
        return Err(Error::AlreadyExists(target.display().to_string()));
    }
    fs::rename(path, &target).map_err(|e| Error::io_at(path, &e))?;
    Ok(target)
}

/// Picks `dest_dir/file_name`, or `{stem}_copy{n}{ext}` with the first free `n`.
pub fn unique_destination(dest_dir: &Path, file_name: &str) -> PathBuf {
    let candidate = dest_dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let as_path = Path::new(file_name);
    let stem = as_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string());
    let ext = as_path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    (1u32..)
        .map(|n| dest_dir.join(format!("{stem}_copy{n}{ext}")))
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

/// Copies a file or directory into `dest_dir` without overwriting anything.
pub fn copy_into(source: &Path, dest_dir: &Path) -> Result<PathBuf> {
    let name = file_name_of(source)?;
    let target = unique_destination(dest_dir, &name);

    if source.is_dir() {
        if target.starts_with(source) {
            return Err(Error::Io(format!(
                "{}: cannot copy a folder into itself",
                source.display()
            )));
        }
        copy_dir_recursive(source, &target)?;
    } else {
        copy_file_preserving(source, &target)?;
    }
    Ok(target)
}

/// Moves `source` into `dest_dir`, copying then removing when a plain rename
/// cannot cross filesystems.
pub fn move_into(source: &Path, dest_dir: &Path) -> Result<PathBuf> {
    let name = file_name_of(source)?;
    let target = dest_dir.join(&name);

    if target == source {
        return Ok(target);
    }
    if target.exists() {
        return Err(Error::AlreadyExists(target.display().to_string()));
    }

    match fs::rename(source, &target) {
        Ok(()) => Ok(target),
        Err(err) if err.kind() == io::ErrorKind::CrossesDevices => {
            tracing::debug!(from = %source.display(), to = %target.display(), "rename crosses devices, copying");
            if source.is_dir() {
                copy_dir_recursive(source, &target)?;
                fs::remove_dir_all(source).map_err(|e| Error::io_at(source, &e))?;
            } else {
                copy_file_preserving(source, &target)?;
                fs::remove_file(source).map_err(|e| Error::io_at(source, &e))?;
            }
            Ok(target)
        }
        Err(err) => Err(Error::io_at(source, &err)),
    }
}

/// Sorted folder and file names of a directory, each list capped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DirectoryListing {
    pub folders: Vec<String>,
    /// File names with their size in bytes.
    pub files: Vec<(String, u64)>,
    pub total_folders: usize,
    pub total_files: usize,
}

pub fn list_directory(dir: &Path, limit: usize) -> Result<DirectoryListing> {
    let mut folders = Vec::new();
    let mut files = Vec::new();

    for entry in fs::read_dir(dir).map_err(|e| Error::io_at(dir, &e))? {
        let entry = entry.map_err(|e| Error::io_at(dir, &e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        // Follows symlinks, so a link to a folder is listed as a folder.
        let Ok(metadata) = fs::metadata(entry.path()) else {
            continue;
        };
        if metadata.is_dir() {
            folders.push(name);
        } else if metadata.is_file() {
            files.push((name, metadata.len()));
        }
    }

    folders.sort();
    files.sort_by(|a, b| a.0.cmp(&b.0));

    let total_folders = folders.len();
    let total_files = files.len();
    folders.truncate(limit);
    files.truncate(limit);

    Ok(DirectoryListing {
        folders,
        files,
        total_folders,
        total_files,
    })
}

/// Human readable size, e.g. `1.5 KB`.
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if size < 1024.0 {
            return format!("{size:.1} {unit}");
        }
        size /= 1024.0;
    }
    format!("{size:.1} TB")
}

/// Last component of `path`, for log lines.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn file_name_of(path: &Path) -> Result<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| Error::InvalidName(path.display().to_string()))
}

fn copy_file_preserving(source: &Path, target: &Path) -> Result<()> {
    // fs::copy carries permission bits over.
    fs::copy(source, target).map_err(|e| Error::io_at(source, &e))?;

    let modified = fs::metadata(source)
        .and_then(|m| m.modified())
        .map_err(|e| Error::io_at(source, &e))?;
    fs::File::options()
        .write(true)
        .open(target)
        .and_then(|file| file.set_modified(modified))
        .map_err(|e| Error::io_at(target, &e))
}

fn copy_dir_recursive(source: &Path, target: &Path) -> Result<()> {
    fs::create_dir_all(target).map_err(|e| Error::io_at(target, &e))?;
    for entry in fs::read_dir(source).map_err(|e| Error::io_at(source, &e))? {
        let entry = entry.map_err(|e| Error::io_at(source, &e))?;
        let from = entry.path();
        let to = target.join(entry.file_name());
        if from.is_dir() {
            copy_dir_recursive(&from, &to)?;
        } else {
            copy_file_preserving(&from, &to)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn fixed_time() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 3, 9, 14, 5, 7)
            .single()
            .expect("valid local time")
    }

    #[test]
    fn create_file_writes_header() {
        let dir = tempdir().expect("temp dir");
        let path = create_file(dir.path(), "notes.txt", fixed_time()).expect("create");

        assert_eq!(path, dir.path().join("notes.txt"));
        let content = fs::read_to_string(&path).expect("read back");
        assert_eq!(
            content,
            "# File created by Ultimate GUI\n# Created at: 2024-03-09 14:05:07\n"
        );
    }

    #[test]
    fn names_with_separators_are_rejected() {
        let dir = tempdir().expect("temp dir");
        for bad in ["", "  ", "..", "a/b", "a\\b"] {
            assert!(
                matches!(create_folder(dir.path(), bad), Err(Error::InvalidName(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn read_preview_truncates_long_files() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("long.txt");
        fs::write(&path, "é".repeat(1500)).expect("write");

        let preview = read_preview(&path, 1000).expect("preview");
        assert_eq!(preview.name, "long.txt");
        assert_eq!(preview.content.chars().count(), 1000);
        assert!(preview.truncated);
    }

    #[test]
    fn read_preview_keeps_short_files_whole() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("short.txt");
        fs::write(&path, "hello").expect("write");

        let preview = read_preview(&path, 1000).expect("preview");
        assert_eq!(preview.content, "hello");
        assert!(!preview.truncated);
    }

    #[test]
    fn read_preview_missing_file_reports_path() {
        let dir = tempdir().expect("temp dir");
        let err = read_preview(&dir.path().join("absent.txt"), 10).unwrap_err();
        assert!(err.detail().contains("absent.txt"));
    }

    #[test]
    fn delete_file_and_folder() {
        let dir = tempdir().expect("temp dir");
        let file = dir.path().join("a.txt");
        fs::write(&file, "x").expect("write");
        delete_file(&file).expect("delete file");
        assert!(!file.exists());

        let folder = dir.path().join("nested");
        fs::create_dir_all(folder.join("deeper")).expect("mkdir");
        fs::write(folder.join("deeper").join("b.txt"), "y").expect("write");
        delete_folder(&folder).expect("delete folder");
        assert!(!folder.exists());
    }

    #[test]
    fn delete_folder_rejects_files() {
        let dir = tempdir().expect("temp dir");
        let file = dir.path().join("a.txt");
        fs::write(&file, "x").expect("write");
        assert!(delete_folder(&file).is_err());
        assert!(file.exists());
    }

    #[test]
    fn create_folder_is_idempotent() {
        let dir = tempdir().expect("temp dir");
        let first = create_folder(dir.path(), "photos").expect("create");
        let second = create_folder(dir.path(), "photos").expect("create again");
        assert_eq!(first, second);
        assert!(first.is_dir());
    }

    #[test]
    fn rename_refuses_to_overwrite() {
        let dir = tempdir().expect("temp dir");
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, "a").expect("write");
        fs::write(&b, "b").expect("write");

        assert!(matches!(
            rename_path(&a, "b.txt"),
            Err(Error::AlreadyExists(_))
        ));

        let renamed = rename_path(&a, "c.txt").expect("rename");
        assert_eq!(renamed, dir.path().join("c.txt"));
        assert!(!a.exists());
        assert_eq!(fs::read_to_string(renamed).expect("read"), "a");
    }

    #[test]
    fn copy_into_numbers_duplicates() {
        let src_dir = tempdir().expect("temp dir");
        let dest_dir = tempdir().expect("temp dir");
        let source = src_dir.path().join("report.txt");
        fs::write(&source, "data").expect("write");

        let first = copy_into(&source, dest_dir.path()).expect("copy");
        let second = copy_into(&source, dest_dir.path()).expect("copy");
        let third = copy_into(&source, dest_dir.path()).expect("copy");

        assert_eq!(first, dest_dir.path().join("report.txt"));
        assert_eq!(second, dest_dir.path().join("report_copy1.txt"));
        assert_eq!(third, dest_dir.path().join("report_copy2.txt"));
    }

    #[test]
    fn copy_into_same_directory_uses_copy_suffix() {
        let dir = tempdir().expect("temp dir");
        let source = dir.path().join("archive");
        fs::write(&source, "data").expect("write");

        let copy = copy_into(&source, dir.path()).expect("copy");
        assert_eq!(copy, dir.path().join("archive_copy1"));
    }

    #[test]
    fn copy_into_preserves_modification_time() {
        let src_dir = tempdir().expect("temp dir");
        let dest_dir = tempdir().expect("temp dir");
        let source = src_dir.path().join("old.txt");
        fs::write(&source, "data").expect("write");

        let past = std::time::SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(1_000_000);
        fs::File::options()
            .write(true)
            .open(&source)
            .and_then(|f| f.set_modified(past))
            .expect("set mtime");

        let copy = copy_into(&source, dest_dir.path()).expect("copy");
        let copied_mtime = fs::metadata(copy).and_then(|m| m.modified()).expect("mtime");
        assert_eq!(copied_mtime, past);
    }

    #[test]
    fn copy_into_copies_directories_recursively() {
        let src_dir = tempdir().expect("temp dir");
        let dest_dir = tempdir().expect("temp dir");
        let tree = src_dir.path().join("tree");
        fs::create_dir_all(tree.join("leaf")).expect("mkdir");
        fs::write(tree.join("leaf").join("f.txt"), "leaf").expect("write");

        let copied = copy_into(&tree, dest_dir.path()).expect("copy");
        assert_eq!(
            fs::read_to_string(copied.join("leaf").join("f.txt")).expect("read"),
            "leaf"
        );
        assert!(tree.exists());
    }

    #[test]
    fn move_into_relocates_file() {
        let src_dir = tempdir().expect("temp dir");
        let dest_dir = tempdir().expect("temp dir");
        let source = src_dir.path().join("move.txt");
        fs::write(&source, "m").expect("write");

        let moved = move_into(&source, dest_dir.path()).expect("move");
        assert_eq!(moved, dest_dir.path().join("move.txt"));
        assert!(!source.exists());
        assert!(moved.exists());
    }

    #[test]
    fn move_into_refuses_to_overwrite() {
        let src_dir = tempdir().expect("temp dir");
        let dest_dir = tempdir().expect("temp dir");
        let source = src_dir.path().join("dup.txt");
        fs::write(&source, "new").expect("write");
        fs::write(dest_dir.path().join("dup.txt"), "old").expect("write");

        assert!(matches!(
            move_into(&source, dest_dir.path()),
            Err(Error::AlreadyExists(_))
        ));
        assert!(source.exists());
    }

    #[test]
    fn list_directory_sorts_and_caps() {
        let dir = tempdir().expect("temp dir");
        for i in (0..25).rev() {
            fs::write(dir.path().join(format!("file{i:02}.txt")), "abc").expect("write");
        }
        fs::create_dir(dir.path().join("zeta")).expect("mkdir");
        fs::create_dir(dir.path().join("alpha")).expect("mkdir");

        let listing = list_directory(dir.path(), 20).expect("list");
        assert_eq!(listing.folders, vec!["alpha", "zeta"]);
        assert_eq!(listing.total_folders, 2);
        assert_eq!(listing.total_files, 25);
        assert_eq!(listing.files.len(), 20);
        assert_eq!(listing.files[0], ("file00.txt".to_string(), 3));
    }

    #[test]
    fn format_size_walks_units() {
        assert_eq!(format_size(0), "0.0 B");
        assert_eq!(format_size(512), "512.0 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.0 GB");
        assert_eq!(format_size(2 * 1024u64.pow(4)), "2.0 TB");
    }
}
