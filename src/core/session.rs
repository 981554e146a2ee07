use std::{
    io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use crate::core::env::ExecutableIndex;
use crate::input::History;

/// Per-process shell state: the in-memory history, the executable index,
/// and the configured history file path.
///
/// The index sits behind `Arc<Mutex<…>>` because the completer is cloned
/// into the line editor and both copies must observe rescans; everything
/// still runs on the main thread.
pub struct Session {
    history: History,
    executables: Arc<Mutex<ExecutableIndex>>,
    histfile: Option<PathBuf>,
}

impl Session {
    pub fn new(histfile: Option<PathBuf>) -> Self {
        let mut index = ExecutableIndex::new();
        index.rescan();

        Session {
            history: History::new(),
            executables: Arc::new(Mutex::new(index)),
            histfile,
        }
    }

    /// Loads the configured history file if it exists, then advances the
    /// incremental-append checkpoint past the loaded entries.
    pub fn load_history_file(&mut self) -> io::Result<usize> {
        let path = match &self.histfile {
            Some(path) if path.exists() => path.clone(),
            _ => return Ok(0),
        };

        let added = self.history.load_from(&path)?;
        self.history.checkpoint_to_end();
        Ok(added)
    }

    /// Writes the whole in-memory history back to the configured file.
    /// A no-op when no history file is configured.
    pub fn flush_history(&self) -> io::Result<()> {
        if let Some(path) = &self.histfile {
            self.history.save_to(path)?;
        }
        Ok(())
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    pub fn executables(&self) -> &Arc<Mutex<ExecutableIndex>> {
        &self.executables
    }

    pub fn histfile(&self) -> Option<&Path> {
        self.histfile.as_deref()
    }
}
