//! Re-analyze reviews while they are being written

use crate::config::is_review_file;
use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::time::Duration;

/// Editors write a file in several steps; events within this window form one batch
const DEBOUNCE_MS: u64 = 300;

/// Which changed paths are worth re-analyzing
#[derive(Debug, Clone, PartialEq, Eq)]
enum ChangeFilter {
    /// Only the named file, whatever its extension
    File(PathBuf),
    /// Any file matching the review patterns
    Reviews(Vec<String>),
}

impl ChangeFilter {
    fn matches(&self, path: &Path) -> bool {
        match self {
            ChangeFilter::File(target) => {
                path == target || path.canonicalize().is_ok_and(|p| &p == target)
            }
            ChangeFilter::Reviews(patterns) => {
                let patterns: Vec<&str> = patterns.iter().map(String::as_str).collect();
                is_review_file(path, &patterns)
            }
        }
    }
}

/// Watches a review file or directory and yields the review files that changed
pub struct ReviewWatcher {
    _watcher: RecommendedWatcher,
    receiver: Receiver<notify::Result<notify::Event>>,
    filter: ChangeFilter,
}

fn is_write(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Create(_) | EventKind::Modify(_))
}

impl ReviewWatcher {
    /// Start watching `path`. A directory is watched recursively for files
    /// matching `review_patterns`; a single file is watched through its parent
    /// directory and only its own changes are reported.
    pub fn watch(path: &Path, review_patterns: &[&str]) -> notify::Result<Self> {
        let (tx, rx) = channel();
        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            Config::default().with_poll_interval(Duration::from_millis(DEBOUNCE_MS)),
        )?;

        let filter = if path.is_dir() {
            watcher.watch(path, RecursiveMode::Recursive)?;
            ChangeFilter::Reviews(review_patterns.iter().map(|p| p.to_string()).collect())
        } else {
            let parent = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            watcher.watch(parent, RecursiveMode::NonRecursive)?;
            ChangeFilter::File(path.canonicalize().unwrap_or_else(|_| path.to_path_buf()))
        };

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
            filter,
        })
    }

    /// Paths touched by a create or modify event that pass the filter
    fn reviews_in_event(event: &notify::Event, filter: &ChangeFilter) -> Vec<PathBuf> {
        if !is_write(&event.kind) {
            return vec![];
        }
        event
            .paths
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect()
    }

    /// Block until a review changes, then collect further changes for DEBOUNCE_MS.
    /// Returns an empty batch when the watcher shuts down or reports an error.
    pub fn next_changes(&self) -> Vec<PathBuf> {
        let mut changed = BTreeSet::new();

        match self.receiver.recv_timeout(Duration::from_secs(3600)) {
            Ok(Ok(event)) => changed.extend(Self::reviews_in_event(&event, &self.filter)),
            Ok(Err(_)) | Err(_) => return vec![],
        }

        std::thread::sleep(Duration::from_millis(DEBOUNCE_MS));
        while let Ok(ev) = self.receiver.try_recv() {
            if let Ok(event) = ev {
                changed.extend(Self::reviews_in_event(&event, &self.filter));
            }
        }

        changed.into_iter().collect()
    }
}
