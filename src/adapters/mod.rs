pub mod notify_file_watcher;
pub mod similar_aligner;

pub use notify_file_watcher::NotifyFileWatcher;
pub use similar_aligner::{AlignAlgorithm, SimilarAligner};
