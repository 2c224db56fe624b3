//! Event debouncing for the watch adapter.
//!
//! Coalesces multiple filesystem events into single events per path,
//! reducing redundant invalidations when editors emit several events per save.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::event::{WatchEvent, WatchEventKind};

/// Pending event waiting to be emitted.
struct PendingEvent {
    kind: WatchEventKind,
    deadline: Instant,
}

/// Thread-safe event debouncer.
pub(crate) struct EventDebouncer {
    pending: Mutex<HashMap<PathBuf, PendingEvent>>,
    debounce_duration: Duration,
}

impl EventDebouncer {
    /// Create a new debouncer with the specified debounce duration.
    pub(crate) fn new(debounce_duration: Duration) -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
            debounce_duration,
        }
    }

    /// Record an event, coalescing with any pending event for the same path.
    pub(crate) fn record(&self, event: WatchEvent) {
        let mut pending = self
            .pending
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let deadline = Instant::now() + self.debounce_duration;

        pending
            .entry(event.path)
            .and_modify(|existing| {
                existing.kind = Self::coalesce(existing.kind, event.kind);
                existing.deadline = deadline;
            })
            .or_insert(PendingEvent {
                kind: event.kind,
                deadline,
            });
    }

    /// Coalesce two event kinds for the same path.
    ///
    /// A short-lived entry still reports its removal: a page rendered while it
    /// existed has to be invalidated.
    fn coalesce(existing: WatchEventKind, new: WatchEventKind) -> WatchEventKind {
        use WatchEventKind::{Add, Change, Unlink};

        match (existing, new) {
            (Add, Change) => Add,
            (Unlink, Add) => Change,
            (_, new) => new,
        }
    }

    /// Drain events that have passed their debounce deadline.
    pub(crate) fn drain_ready(&self) -> Vec<WatchEvent> {
        let mut pending = self
            .pending
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let now = Instant::now();

        let ready_paths: Vec<PathBuf> = pending
            .iter()
            .filter(|(_, event)| event.deadline <= now)
            .map(|(path, _)| path.clone())
            .collect();

        ready_paths
            .into_iter()
            .filter_map(|path| {
                let event = pending.remove(&path)?;
                Some(WatchEvent {
                    kind: event.kind,
                    path,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn event(kind: WatchEventKind) -> WatchEvent {
        WatchEvent::new(kind, "/site/a/notes.md")
    }

    #[test]
    fn test_single_event_emitted_after_deadline() {
        let debouncer = EventDebouncer::new(Duration::from_millis(10));

        debouncer.record(event(WatchEventKind::Change));
        assert!(debouncer.drain_ready().is_empty());

        thread::sleep(Duration::from_millis(15));

        let events = debouncer.drain_ready();
        assert_eq!(events, vec![event(WatchEventKind::Change)]);
        assert!(debouncer.drain_ready().is_empty());
    }

    #[test]
    fn test_multiple_changes_coalesce() {
        let debouncer = EventDebouncer::new(Duration::from_millis(10));

        debouncer.record(event(WatchEventKind::Change));
        debouncer.record(event(WatchEventKind::Change));
        debouncer.record(event(WatchEventKind::Change));

        thread::sleep(Duration::from_millis(15));

        assert_eq!(debouncer.drain_ready().len(), 1);
    }

    #[test]
    fn test_add_then_unlink_reports_unlink() {
        let debouncer = EventDebouncer::new(Duration::from_millis(10));

        debouncer.record(WatchEvent::new(WatchEventKind::Add, "/site/a/new.png"));
        debouncer.record(WatchEvent::new(WatchEventKind::Unlink, "/site/a/new.png"));

        thread::sleep(Duration::from_millis(15));

        assert_eq!(
            debouncer.drain_ready(),
            vec![WatchEvent::new(WatchEventKind::Unlink, "/site/a/new.png")]
        );
    }

    #[test]
    fn test_short_lived_dir_reports_unlink_dir() {
        let debouncer = EventDebouncer::new(Duration::from_millis(10));

        debouncer.record(WatchEvent::new(WatchEventKind::AddDir, "/site/tmp"));
        debouncer.record(WatchEvent::new(WatchEventKind::UnlinkDir, "/site/tmp"));

        thread::sleep(Duration::from_millis(15));

        assert_eq!(
            debouncer.drain_ready(),
            vec![WatchEvent::new(WatchEventKind::UnlinkDir, "/site/tmp")]
        );
    }

    #[test]
    fn test_multiple_paths_independent() {
        let debouncer = EventDebouncer::new(Duration::from_millis(10));

        debouncer.record(WatchEvent::new(WatchEventKind::Change, "/site/a.md"));
        debouncer.record(WatchEvent::new(WatchEventKind::AddDir, "/site/b"));

        thread::sleep(Duration::from_millis(15));

        assert_eq!(debouncer.drain_ready().len(), 2);
    }

    #[test]
    fn test_coalesce_combinations() {
        use WatchEventKind::{Add, AddDir, Change, Unlink, UnlinkDir};

        assert_eq!(EventDebouncer::coalesce(Add, Change), Add);
        assert_eq!(EventDebouncer::coalesce(Add, Unlink), Unlink);
        assert_eq!(EventDebouncer::coalesce(AddDir, UnlinkDir), UnlinkDir);
        assert_eq!(EventDebouncer::coalesce(Unlink, Add), Change);
        assert_eq!(EventDebouncer::coalesce(Change, Unlink), Unlink);
        assert_eq!(EventDebouncer::coalesce(UnlinkDir, AddDir), AddDir);
        assert_eq!(EventDebouncer::coalesce(Change, Change), Change);
    }
}
