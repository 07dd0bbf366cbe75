// src/watch/watcher.rs

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use notify::event::EventKind;
use notify::{Config, Event, PollWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::Profile;
use crate::engine::{BuildRequest, RuntimeEvent, Trigger};
use crate::errors::Result;
use crate::watch::patterns::WatchTarget;

/// Interval at which watched files are stat-polled.
pub const POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Installs one live watch subscription per target.
///
/// Production uses [`PollWatchBackend`]; tests can record targets instead.
pub trait WatchBackend: Send + Sync {
    /// Start watching `target` for the rest of the process, sending a
    /// `BuildRequested` for `profile` on every change.
    fn watch(
        &self,
        target: WatchTarget,
        profile: Arc<Profile>,
        events_tx: mpsc::Sender<RuntimeEvent>,
    ) -> Result<()>;
}

/// What a single notify event means for a watch target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Content or metadata changed, or the file (re)appeared.
    Changed,
    /// The file went away.
    Removed,
    Ignored,
}

pub fn classify(kind: &EventKind) -> ChangeKind {
    match kind {
        EventKind::Modify(_) | EventKind::Create(_) => ChangeKind::Changed,
        EventKind::Remove(_) => ChangeKind::Removed,
        _ => ChangeKind::Ignored,
    }
}

/// Whether `event` is about `target` itself.
///
/// A target that is a directory also receives events for its children;
/// those are not changes of the target.
pub fn concerns_target(event: &Event, target: &Path) -> bool {
    event.paths.is_empty() || event.paths.iter().any(|p| p == target)
}

/// Watch backend built on `notify::PollWatcher`.
///
/// Each target gets its own poller and its own Tokio task, which owns the
/// poller and lives as long as the process. There is no unwatch.
#[derive(Debug, Clone)]
pub struct PollWatchBackend {
    interval: Duration,
}

impl Default for PollWatchBackend {
    fn default() -> Self {
        Self::new(POLL_INTERVAL)
    }
}

impl PollWatchBackend {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl WatchBackend for PollWatchBackend {
    fn watch(
        &self,
        target: WatchTarget,
        profile: Arc<Profile>,
        events_tx: mpsc::Sender<RuntimeEvent>,
    ) -> Result<()> {
        // Channel from the blocking notify poll thread into the async world.
        let (notify_tx, mut notify_rx) =
            mpsc::unbounded_channel::<notify::Result<Event>>();

        let mut watcher = PollWatcher::new(
            move |res: notify::Result<Event>| {
                if let Err(err) = notify_tx.send(res) {
                    warn!(error = %err, "failed to forward notify event");
                }
            },
            // mtime is only compared at whole-second resolution, so a rewrite
            // within the same second is only seen by hashing contents.
            Config::default()
                .with_poll_interval(self.interval)
                .with_compare_contents(true),
        )?;

        watcher.watch(target.as_path(), RecursiveMode::NonRecursive)?;
        info!(path = %target.path(), profile = profile.index, "watching file");

        tokio::spawn(async move {
            // The poller stops when dropped; keep it for the task's lifetime.
            let _watcher = watcher;

            while let Some(res) = notify_rx.recv().await {
                let event = match res {
                    Ok(event) => event,
                    Err(err) => {
                        warn!(path = %target.path(), error = %err, "file watch error");
                        continue;
                    }
                };

                debug!(?event, path = %target.path(), "received notify event");

                if !concerns_target(&event, target.as_path()) {
                    continue;
                }

                match classify(&event.kind) {
                    ChangeKind::Changed => {
                        let request = BuildRequest::new(
                            Arc::clone(&profile),
                            Trigger::File(target.as_path().to_path_buf()),
                        );
                        if events_tx
                            .send(RuntimeEvent::BuildRequested(request))
                            .await
                            .is_err()
                        {
                            debug!(path = %target.path(), "runtime gone; watcher stopping");
                            break;
                        }
                    }
                    ChangeKind::Removed => {
                        warn!(path = %target.path(), "watched file disappeared");
                    }
                    ChangeKind::Ignored => {}
                }
            }

            debug!(path = %target.path(), "watcher task finished");
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, MetadataKind, ModifyKind, RemoveKind};

    #[test]
    fn modify_and_create_count_as_changes() {
        assert_eq!(
            classify(&EventKind::Modify(ModifyKind::Metadata(MetadataKind::WriteTime))),
            ChangeKind::Changed
        );
        assert_eq!(classify(&EventKind::Create(CreateKind::File)), ChangeKind::Changed);
    }

    #[test]
    fn remove_and_access_do_not_build() {
        assert_eq!(classify(&EventKind::Remove(RemoveKind::Any)), ChangeKind::Removed);
        assert_eq!(classify(&EventKind::Access(AccessKind::Any)), ChangeKind::Ignored);
        assert_eq!(classify(&EventKind::Other), ChangeKind::Ignored);
    }

    #[test]
    fn child_events_do_not_concern_directory_target() {
        let target = Path::new("src/nested");
        let own = Event::new(EventKind::Modify(ModifyKind::Any)).add_path(target.to_path_buf());
        let child = Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path(target.join("deep.c"));

        assert!(concerns_target(&own, target));
        assert!(!concerns_target(&child, target));
        assert!(concerns_target(&Event::new(EventKind::Any), target));
    }

    #[test]
    fn default_interval_is_one_second() {
        assert_eq!(PollWatchBackend::default().interval(), Duration::from_millis(1000));
    }
}
