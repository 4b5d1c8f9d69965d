pub mod aligner;
pub mod file_watcher;

pub use aligner::Aligner;
pub use file_watcher::{FileEvent, FileWatcher};
