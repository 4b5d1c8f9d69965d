//! Notify implementation of the FileWatcher port.

use crate::ports::{FileEvent, FileWatcher};
use anyhow::{Context, Result};
use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

pub struct NotifyFileWatcher {
    _watcher: RecommendedWatcher,
    event_rx: Receiver<FileEvent>,
}

impl NotifyFileWatcher {
    /// Watch the given files.
    ///
    /// Parent directories are watched rather than the files themselves so
    /// that editors which save by replacing the file are still noticed.
    pub fn new(files: &[PathBuf]) -> Result<Self> {
        let targets: BTreeSet<PathBuf> = files.iter().map(|p| absolute(p)).collect();
        let dirs: BTreeSet<PathBuf> = targets
            .iter()
            .filter_map(|p| p.parent().map(Path::to_path_buf))
            .collect();

        let (event_tx, event_rx): (Sender<FileEvent>, Receiver<FileEvent>) = mpsc::channel();

        let config = Config::default().with_poll_interval(Duration::from_millis(500));

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<notify::Event, notify::Error>| {
                let event = match res {
                    Ok(event) => event,
                    Err(e) => {
                        tracing::warn!(error = %e, "file watcher error");
                        return;
                    }
                };
                use notify::EventKind::*;
                if !matches!(event.kind, Create(_) | Modify(_) | Remove(_)) {
                    return;
                }
                for path in event.paths {
                    if targets.contains(&path) {
                        let _ = event_tx.send(FileEvent::Changed(path));
                    }
                }
            },
            config,
        )
        .context("Failed to create file watcher")?;

        for dir in &dirs {
            watcher
                .watch(dir, RecursiveMode::NonRecursive)
                .with_context(|| format!("Failed to watch {}", dir.display()))?;
            tracing::debug!(dir = %dir.display(), "watching directory");
        }

        Ok(Self {
            _watcher: watcher,
            event_rx,
        })
    }
}

impl FileWatcher for NotifyFileWatcher {
    fn take_changes(&self) -> Vec<PathBuf> {
        let mut changed = BTreeSet::new();
        while let Ok(FileEvent::Changed(path)) = self.event_rx.try_recv() {
            changed.insert(path);
        }
        changed.into_iter().collect()
    }
}

fn absolute(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
