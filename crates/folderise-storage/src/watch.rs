//! Recursive folder watching built on `notify`.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use notify::event::{CreateKind, ModifyKind, RemoveKind, RenameMode};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::debouncer::EventDebouncer;
use crate::event::{WatchEvent, WatchEventKind, is_hidden_path};

const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);
const POLL_INTERVAL: Duration = Duration::from_millis(50);
const CHANNEL_CAPACITY: usize = 256;

/// Error starting a watcher.
#[derive(Debug, thiserror::Error)]
#[error("Cannot watch {}: {source}", root.display())]
pub struct WatchError {
    /// Folder that could not be watched.
    pub root: PathBuf,
    /// Underlying notify error.
    #[source]
    pub source: notify::Error,
}

/// Watches a folder recursively and emits debounced [`WatchEvent`]s.
#[derive(Clone, Debug)]
pub struct FsWatcher {
    root: PathBuf,
    debounce: Duration,
}

impl FsWatcher {
    /// Create a watcher for `root` with the default 100ms debounce window.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            debounce: DEFAULT_DEBOUNCE,
        }
    }

    /// Override the debounce window.
    #[must_use]
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Start watching.
    ///
    /// Must be called from within a Tokio runtime. Events stop when the
    /// returned [`WatchHandle`] is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError`] if the platform watcher cannot be created or
    /// the folder cannot be registered.
    pub fn watch(&self) -> Result<(mpsc::Receiver<WatchEvent>, WatchHandle), WatchError> {
        let to_error = |source| WatchError {
            root: self.root.clone(),
            source,
        };

        let (raw_tx, mut raw_rx) = mpsc::channel::<WatchEvent>(CHANNEL_CAPACITY);
        let (out_tx, out_rx) = mpsc::channel::<WatchEvent>(CHANNEL_CAPACITY);

        let root = self.root.clone();
        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            match res {
                Ok(event) => {
                    for event in classify(&event) {
                        if is_hidden_path(&root, &event.path) {
                            continue;
                        }
                        // Callback runs on the notify thread, outside the runtime.
                        if raw_tx.blocking_send(event).is_err() {
                            return;
                        }
                    }
                }
                Err(e) => tracing::warn!(error = %e, "Watcher error"),
            }
        })
        .map_err(to_error)?;

        watcher
            .watch(&self.root, RecursiveMode::Recursive)
            .map_err(to_error)?;

        let debouncer = Arc::new(EventDebouncer::new(self.debounce));

        let record_debouncer = Arc::clone(&debouncer);
        let record_task = tokio::spawn(async move {
            while let Some(event) = raw_rx.recv().await {
                tracing::debug!(kind = %event.kind, path = %event.path.display(), "Recorded filesystem event");
                record_debouncer.record(event);
            }
        });

        let drain_task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(POLL_INTERVAL);
            loop {
                interval.tick().await;
                for event in debouncer.drain_ready() {
                    if out_tx.send(event).await.is_err() {
                        return;
                    }
                }
            }
        });

        tracing::info!(root = %self.root.display(), "Initial scan complete. Ready for changes");

        Ok((
            out_rx,
            WatchHandle {
                _watcher: watcher,
                tasks: vec![record_task, drain_task],
            },
        ))
    }
}

/// Keeps a watcher alive. Dropping it stops event delivery.
pub struct WatchHandle {
    _watcher: RecommendedWatcher,
    tasks: Vec<JoinHandle<()>>,
}

impl WatchHandle {
    /// Stop watching explicitly.
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

impl std::fmt::Debug for WatchHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchHandle")
            .field("tasks", &self.tasks.len())
            .finish_non_exhaustive()
    }
}

/// Translate a raw notify event into zero or more watch events.
fn classify(event: &Event) -> Vec<WatchEvent> {
    let paths = &event.paths;
    let each = |kind: WatchEventKind| -> Vec<WatchEvent> {
        paths.iter().map(|p| WatchEvent::new(kind, p.clone())).collect()
    };
    let appeared = |path: &PathBuf| {
        let kind = if path.is_dir() {
            WatchEventKind::AddDir
        } else {
            WatchEventKind::Add
        };
        WatchEvent::new(kind, path.clone())
    };

    match event.kind {
        EventKind::Create(CreateKind::Folder) => each(WatchEventKind::AddDir),
        EventKind::Create(CreateKind::File) => each(WatchEventKind::Add),
        EventKind::Create(_) => paths.iter().map(appeared).collect(),

        EventKind::Modify(ModifyKind::Name(mode)) => match mode {
            RenameMode::From => each(WatchEventKind::Unlink),
            RenameMode::To => paths.iter().map(appeared).collect(),
            RenameMode::Both => {
                let mut events = Vec::with_capacity(2);
                if let Some(from) = paths.first() {
                    events.push(WatchEvent::new(WatchEventKind::Unlink, from.clone()));
                }
                if let Some(to) = paths.get(1) {
                    events.push(appeared(to));
                }
                events
            }
            _ => paths
                .iter()
                .map(|p| {
                    if p.exists() {
                        appeared(p)
                    } else {
                        WatchEvent::new(WatchEventKind::Unlink, p.clone())
                    }
                })
                .collect(),
        },
        EventKind::Modify(ModifyKind::Metadata(_)) => Vec::new(),
        EventKind::Modify(_) => paths
            .iter()
            .filter(|p| !p.is_dir())
            .map(|p| WatchEvent::new(WatchEventKind::Change, p.clone()))
            .collect(),

        EventKind::Remove(RemoveKind::Folder) => each(WatchEventKind::UnlinkDir),
        EventKind::Remove(_) => each(WatchEventKind::Unlink),

        EventKind::Access(_) | EventKind::Any | EventKind::Other => Vec::new(),
    }
}
