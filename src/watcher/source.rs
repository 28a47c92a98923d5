//! Change sources feeding the watch loop

use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError};
use std::time::Duration;

use notify::event::ModifyKind;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::Serialize;

use crate::error::{StyleError, StyleResult};

/// Coarse kind of a filesystem notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Create,
    Modify,
    Rename,
    Remove,
    Other,
}

/// One filesystem notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeNotice {
    pub kind: ChangeKind,
    pub paths: Vec<PathBuf>,
}

impl ChangeNotice {
    pub fn new(kind: ChangeKind, paths: Vec<PathBuf>) -> Self {
        Self { kind, paths }
    }

    /// Map a `notify` event; reads (`Access`) are not changes.
    pub fn from_event(event: Event) -> Option<Self> {
        let kind = match event.kind {
            EventKind::Access(_) => return None,
            EventKind::Create(_) => ChangeKind::Create,
            EventKind::Modify(ModifyKind::Name(_)) => ChangeKind::Rename,
            EventKind::Modify(_) => ChangeKind::Modify,
            EventKind::Remove(_) => ChangeKind::Remove,
            EventKind::Any | EventKind::Other => ChangeKind::Other,
        };
        Some(Self::new(kind, event.paths))
    }

    /// True when every path in the notice is `file` (compared canonically).
    pub fn only_concerns(&self, file: &Path) -> bool {
        !self.paths.is_empty() && self.paths.iter().all(|p| same_file(p, file))
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Result of waiting on a change source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourcePoll {
    Change(ChangeNotice),
    /// Nothing arrived within the timeout
    Idle,
    /// The source will never produce another notice
    Closed,
}

/// Anything that yields change notices to the watch loop
pub trait ChangeSource {
    fn poll(&mut self, timeout: Duration) -> SourcePoll;
}

/// `notify`-backed source; dropping it releases the OS watch handle.
pub struct NotifySource {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
}

impl NotifySource {
    /// Subscribe recursively to `dir`.
    pub fn subscribe(dir: &Path) -> StyleResult<Self> {
        let (tx, rx) = channel();

        let watch_error = |e: notify::Error| StyleError::Watch {
            path: dir.to_path_buf(),
            message: e.to_string(),
        };

        let mut watcher = RecommendedWatcher::new(tx, Config::default()).map_err(watch_error)?;
        watcher
            .watch(dir, RecursiveMode::Recursive)
            .map_err(watch_error)?;

        log::debug!("Subscribed to changes under {}", dir.display());
        Ok(Self {
            _watcher: watcher,
            rx,
        })
    }
}

impl ChangeSource for NotifySource {
    fn poll(&mut self, timeout: Duration) -> SourcePoll {
        match self.rx.recv_timeout(timeout) {
            Ok(Ok(event)) => match ChangeNotice::from_event(event) {
                Some(notice) => SourcePoll::Change(notice),
                None => SourcePoll::Idle,
            },
            Ok(Err(e)) => {
                log::warn!("watch backend error: {}", e);
                SourcePoll::Idle
            }
            Err(RecvTimeoutError::Timeout) => SourcePoll::Idle,
            Err(RecvTimeoutError::Disconnected) => SourcePoll::Closed,
        }
    }
}
