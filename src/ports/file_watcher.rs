//! File watcher port (trait).
//! Lets watch mode notice edits to the diff inputs and the style sheet.

use std::path::PathBuf;

/// Events from the file watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileEvent {
    /// A watched file was written, created or removed.
    Changed(PathBuf),
}

/// Port for watching a fixed set of files.
pub trait FileWatcher: Send {
    /// Drain pending events (non-blocking), returning each changed file once.
    fn take_changes(&self) -> Vec<PathBuf>;
}
