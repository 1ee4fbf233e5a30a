// SPDX-License-Identifier: MPL-2.0
//! File operations of the Tools page and how their results are reported.
//!
//! An [`Operation`] is fully specified (paths and names chosen) before it is
//! confirmed; [`Operation::run`] is the blocking part handed to a worker.

use crate::config::{LIST_DIRECTORY_LIMIT, READ_PREVIEW_CHARS};
use crate::error::Result;
use crate::i18n::I18n;
use crate::tools::fs_ops::{self, display_name};
use crate::tools::{format_size, DirectoryListing, FilePreview};
use crate::ui::dialogs::Tone;
use crate::ui::notifications::Notification;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    CreateFile { dir: PathBuf, name: String },
    ReadFile(PathBuf),
    DeleteFile(PathBuf),
    DeleteFolder(PathBuf),
    CreateFolder { dir: PathBuf, name: String },
    Rename { path: PathBuf, new_name: String },
    Copy { source: PathBuf, dest_dir: PathBuf },
    Move { source: PathBuf, dest_dir: PathBuf },
    List(PathBuf),
}

/// What a successful operation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    FileCreated(PathBuf),
    Preview(FilePreview),
    FileDeleted(PathBuf),
    FolderDeleted(PathBuf),
    FolderCreated(PathBuf),
    Renamed { old: String, new: String },
    Copied { from: PathBuf, to: PathBuf },
    Moved { from: PathBuf, to: PathBuf },
    Listing { dir: PathBuf, listing: DirectoryListing },
}

/// Question shown before an operation runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub tone: Tone,
    pub title: String,
    pub description: String,
}

impl Operation {
    /// Prefix of the translation keys of this operation.
    fn slug(&self) -> &'static str {
        match self {
            Operation::CreateFile { .. } => "create-file",
            Operation::ReadFile(_) => "read-file",
            Operation::DeleteFile(_) => "delete-file",
            Operation::DeleteFolder(_) => "delete-folder",
            Operation::CreateFolder { .. } => "create-folder",
            Operation::Rename { .. } => "rename",
            Operation::Copy { .. } => "copy",
            Operation::Move { .. } => "move",
            Operation::List(_) => "list",
        }
    }

    fn key(&self, suffix: &str) -> String {
        format!("tools-{}-{suffix}", self.slug())
    }

    /// Listing has no side effect and runs without asking.
    pub fn confirmation(&self, i18n: &I18n) -> Option<Confirmation> {
        let path_arg = |path: &Path| path.display().to_string();
        let (tone, args): (Tone, Vec<(&str, String)>) = match self {
            Operation::CreateFile { dir, name } | Operation::CreateFolder { dir, name } => {
                (Tone::Question, vec![("path", path_arg(&dir.join(name)))])
            }
            Operation::ReadFile(path) => (Tone::Question, vec![("path", path_arg(path))]),
            Operation::DeleteFile(path) | Operation::DeleteFolder(path) => {
                (Tone::Warning, vec![("path", path_arg(path))])
            }
            Operation::Rename { path, new_name } => (
                Tone::Question,
                vec![("old", display_name(path)), ("new", new_name.clone())],
            ),
            Operation::Copy { source, dest_dir } | Operation::Move { source, dest_dir } => (
                Tone::Question,
                vec![("source", path_arg(source)), ("destination", path_arg(dest_dir))],
            ),
            Operation::List(_) => return None,
        };

        let args: Vec<(&str, &str)> = args.iter().map(|(k, v)| (*k, v.as_str())).collect();
        Some(Confirmation {
            tone,
            title: i18n.tr(&self.key("confirm-title")),
            description: i18n.tr_with_args(&self.key("confirm"), &args),
        })
    }

    /// Overlay message while the operation runs.
    pub fn loading_message(&self, i18n: &I18n) -> String {
        i18n.tr(&self.key("loading"))
    }

    /// Log entry for a failed run.
    pub fn error_entry(&self, error: &crate::error::Error, i18n: &I18n) -> String {
        i18n.tr_with_args(&self.key("error"), &[("error", error.detail().as_str())])
    }

    /// Performs the operation. Blocking.
    pub fn run(self) -> Result<Outcome> {
        tracing::info!(operation = self.slug(), "running file operation");
        match self {
            Operation::CreateFile { dir, name } => {
                fs_ops::create_file(&dir, &name, chrono::Local::now()).map(Outcome::FileCreated)
            }
            Operation::ReadFile(path) => {
                fs_ops::read_preview(&path, READ_PREVIEW_CHARS).map(Outcome::Preview)
            }
            Operation::DeleteFile(path) => {
                fs_ops::delete_file(&path).map(|()| Outcome::FileDeleted(path))
            }
            Operation::DeleteFolder(path) => {
                fs_ops::delete_folder(&path).map(|()| Outcome::FolderDeleted(path))
            }
            Operation::CreateFolder { dir, name } => {
                fs_ops::create_folder(&dir, &name).map(Outcome::FolderCreated)
            }
            Operation::Rename { path, new_name } => {
                let old = display_name(&path);
                fs_ops::rename_path(&path, &new_name).map(|renamed| Outcome::Renamed {
                    old,
                    new: display_name(&renamed),
                })
            }
            Operation::Copy { source, dest_dir } => {
                fs_ops::copy_into(&source, &dest_dir).map(|to| Outcome::Copied { from: source, to })
            }
            Operation::Move { source, dest_dir } => {
                fs_ops::move_into(&source, &dest_dir).map(|to| Outcome::Moved { from: source, to })
            }
            Operation::List(dir) => fs_ops::list_directory(&dir, LIST_DIRECTORY_LIMIT)
                .map(|listing| Outcome::Listing { dir, listing }),
        }
    }
}

impl Outcome {
    /// Entries appended to the log, in order.
    pub fn log_entries(&self, i18n: &I18n) -> Vec<String> {
        let path = |p: &Path| p.display().to_string();
        match self {
            Outcome::FileCreated(p) => {
                vec![i18n.tr_with_args("tools-file-created", &[("path", path(p).as_str())])]
            }
            Outcome::Preview(preview) => {
                let mut content = preview.content.clone();
                if preview.truncated {
                    content.push('\n');
                    content.push_str(&i18n.tr("tools-read-truncated"));
                }
                vec![
                    i18n.tr_with_args("tools-reading", &[("name", preview.name.as_str())]),
                    content,
                ]
            }
            Outcome::FileDeleted(p) => {
                vec![i18n.tr_with_args("tools-file-deleted", &[("path", path(p).as_str())])]
            }
            Outcome::FolderDeleted(p) => {
                vec![i18n.tr_with_args("tools-folder-deleted", &[("path", path(p).as_str())])]
            }
            Outcome::FolderCreated(p) => {
                vec![i18n.tr_with_args("tools-folder-created", &[("path", path(p).as_str())])]
            }
            Outcome::Renamed { old, new } => vec![i18n.tr_with_args(
                "tools-renamed",
                &[("old", old.as_str()), ("new", new.as_str())],
            )],
            Outcome::Copied { from, to } => vec![i18n.tr_with_args(
                "tools-copied",
                &[("from", path(from).as_str()), ("to", path(to).as_str())],
            )],
            Outcome::Moved { from, to } => vec![i18n.tr_with_args(
                "tools-moved",
                &[("from", path(from).as_str()), ("to", path(to).as_str())],
            )],
            Outcome::Listing { dir, listing } => vec![listing_entry(dir, listing, i18n)],
        }
    }

    /// Toast shown in addition to the log entry.
    pub fn notification(&self) -> Option<Notification> {
        let path = |p: &Path| p.display().to_string();
        match self {
            Outcome::FileCreated(p) => {
                Some(Notification::info("notify-file-created").with_arg("path", path(p)))
            }
            Outcome::FileDeleted(_) => Some(Notification::info("notify-file-deleted")),
            Outcome::FolderDeleted(_) => Some(Notification::info("notify-folder-deleted")),
            Outcome::FolderCreated(p) => {
                Some(Notification::info("notify-folder-created").with_arg("path", path(p)))
            }
            _ => None,
        }
    }
}

/// "📁 Contents of" block: folders then files, with totals.
pub fn listing_entry(dir: &Path, listing: &DirectoryListing, i18n: &I18n) -> String {
    let mut lines = vec![i18n.tr_with_args(
        "tools-list-header",
        &[("dir", dir.display().to_string().as_str())],
    )];

    lines.push(String::new());
    lines.push(i18n.tr_with_args(
        "tools-list-folders",
        &[("count", listing.total_folders.to_string().as_str())],
    ));
    lines.extend(listing.folders.iter().map(|name| format!("  └─ 📁 {name}")));
    if listing.total_folders > listing.folders.len() {
        lines.push(more_line(listing.total_folders - listing.folders.len(), i18n));
    }

    lines.push(String::new());
    lines.push(i18n.tr_with_args(
        "tools-list-files",
        &[("count", listing.total_files.to_string().as_str())],
    ));
    lines.extend(
        listing
            .files
            .iter()
            .map(|(name, size)| format!("  └─ 📄 {name} ({})", format_size(*size))),
    );
    if listing.total_files > listing.files.len() {
        lines.push(more_line(listing.total_files - listing.files.len(), i18n));
    }

    lines.join("\n")
}

fn more_line(hidden: usize, i18n: &I18n) -> String {
    i18n.tr_with_args("tools-list-more", &[("count", hidden.to_string().as_str())])
}
