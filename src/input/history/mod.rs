mod file_ops;

use std::{io, path::Path};

/// Ordered log of submitted command lines.
///
/// Entries keep submission order, duplicates included, and are never
/// reordered. `appended` marks how far the store has been flushed by the
/// incremental-append operation; it never exceeds `entries.len()`.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<String>,
    appended: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a submitted line. Blank lines are ignored.
    pub fn append(&mut self, line: &str) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return;
        }
        self.entries.push(trimmed.to_string());
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Extends the store with the non-blank lines of `path`. Existing
    /// entries are kept; the checkpoint does not move.
    pub fn load_from(&mut self, path: &Path) -> io::Result<usize> {
        let lines = file_ops::load_lines(path)?;
        let added = lines.len();
        self.entries.extend(lines);
        Ok(added)
    }

    /// Overwrites `path` with the entire store.
    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        file_ops::overwrite_lines(path, &self.entries)
    }

    /// Appends entries recorded since the last checkpoint to `path`,
    /// then advances the checkpoint.
    pub fn append_since_checkpoint(&mut self, path: &Path) -> io::Result<usize> {
        let fresh = &self.entries[self.appended..];
        file_ops::append_lines(path, fresh)?;
        let added = fresh.len();
        self.appended = self.entries.len();
        Ok(added)
    }

    /// Moves the checkpoint to the end of the store, so the next
    /// incremental append starts from here.
    pub fn checkpoint_to_end(&mut self) {
        self.appended = self.entries.len();
    }

    #[cfg(test)]
    fn checkpoint(&self) -> usize {
        self.appended
    }
}
