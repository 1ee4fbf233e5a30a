// SPDX-License-Identifier: MPL-2.0
//! Append-only output pane of the Tools page.

/// Width of the `=` rule written after every entry.
pub const SEPARATOR_WIDTH: usize = 50;

/// Read-only text log. Each entry is followed by a separator line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolLog {
    seed: String,
    text: String,
}

impl ToolLog {
    /// Creates a log holding only `seed` (the "ready" line).
    pub fn new(seed: impl Into<String>) -> Self {
        let seed = seed.into();
        Self {
            text: seed.clone(),
            seed,
        }
    }

    /// Appends one entry and its separator.
    pub fn push_entry(&mut self, entry: impl AsRef<str>) {
        let entry = entry.as_ref().trim_end_matches('\n');
        if !self.text.is_empty() {
            self.text.push_str("\n\n");
        }
        self.text.push_str(entry);
        self.text.push('\n');
        self.text.push_str(&separator());
    }

    /// Resets the pane to the seed line.
    pub fn clear(&mut self) {
        self.text = self.seed.clone();
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn is_pristine(&self) -> bool {
        self.text == self.seed
    }
}

fn separator() -> String {
    "=".repeat(SEPARATOR_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    const READY: &str = "Ready. Click a button to run a command...";

    #[test]
    fn new_log_shows_seed() {
        let log = ToolLog::new(READY);
        assert_eq!(log.text(), READY);
        assert!(log.is_pristine());
    }

    #[test]
    fn entries_end_with_separator() {
        let mut log = ToolLog::new(READY);
        log.push_entry("✅ Ping complete!\n");

        let expected = format!("{READY}\n\n✅ Ping complete!\n{}", "=".repeat(50));
        assert_eq!(log.text(), expected);
        assert!(!log.is_pristine());
    }

    #[test]
    fn every_entry_gets_its_own_separator() {
        let mut log = ToolLog::new(READY);
        log.push_entry("one");
        log.push_entry("two");
        assert_eq!(log.text().matches(&"=".repeat(50)).count(), 2);
    }

    #[test]
    fn clear_restores_seed() {
        let mut log = ToolLog::new(READY);
        log.push_entry("something");
        log.clear();
        assert_eq!(log.text(), READY);
    }
}
