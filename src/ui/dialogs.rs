// SPDX-License-Identifier: MPL-2.0
//! Native dialogs: Yes/No questions and file pickers.
//!
//! Every function is async and opens a platform dialog through `rfd`, so
//! pages can wrap them in `Task::perform` without blocking the event loop.

use std::path::PathBuf;

/// How prominent a confirmation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Question,
    /// Destructive action.
    Warning,
}

impl Tone {
    fn level(self) -> rfd::MessageLevel {
        match self {
            Tone::Question => rfd::MessageLevel::Info,
            Tone::Warning => rfd::MessageLevel::Warning,
        }
    }
}

/// Asks a Yes/No question. Closing the dialog counts as No.
pub async fn confirm(tone: Tone, title: String, description: String) -> bool {
    let answer = rfd::AsyncMessageDialog::new()
        .set_level(tone.level())
        .set_title(&title)
        .set_description(&description)
        .set_buttons(rfd::MessageButtons::YesNo)
        .show()
        .await;

    let accepted = matches!(answer, rfd::MessageDialogResult::Yes);
    tracing::debug!(%title, accepted, "confirmation answered");
    accepted
}

/// File filter shown in the picker, e.g. `("Video Files", ["mp4", "mkv"])`.
#[derive(Debug, Clone)]
pub struct Filter {
    pub name: String,
    pub extensions: Vec<String>,
}

impl Filter {
    pub fn new(name: impl Into<String>, extensions: &[&str]) -> Self {
        Self {
            name: name.into(),
            extensions: extensions.iter().map(|e| (*e).to_string()).collect(),
        }
    }
}

pub async fn pick_file(title: String, filters: Vec<Filter>) -> Option<PathBuf> {
    let mut dialog = rfd::AsyncFileDialog::new().set_title(&title);
    for filter in &filters {
        dialog = dialog.add_filter(&filter.name, &filter.extensions);
    }
    dialog.pick_file().await.map(|h| h.path().to_path_buf())
}

pub async fn pick_folder(title: String) -> Option<PathBuf> {
    rfd::AsyncFileDialog::new()
        .set_title(&title)
        .pick_folder()
        .await
        .map(|h| h.path().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_owns_extensions() {
        let filter = Filter::new("Audio Files", &["mp3", "wav"]);
        assert_eq!(filter.name, "Audio Files");
        assert_eq!(filter.extensions, vec!["mp3".to_string(), "wav".to_string()]);
    }

    #[test]
    fn warnings_use_warning_level() {
        assert!(matches!(Tone::Warning.level(), rfd::MessageLevel::Warning));
        assert!(matches!(Tone::Question.level(), rfd::MessageLevel::Info));
    }
}
