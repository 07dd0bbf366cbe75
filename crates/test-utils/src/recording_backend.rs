use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use autobuild::config::Profile;
use autobuild::engine::{BuildRequest, RuntimeEvent, Trigger};
use autobuild::errors::Result;
use autobuild::watch::{WatchBackend, WatchTarget};

/// One subscription recorded by [`RecordingWatchBackend`].
#[derive(Clone)]
pub struct InstalledWatch {
    pub target: WatchTarget,
    pub profile: Arc<Profile>,
    events_tx: mpsc::Sender<RuntimeEvent>,
}

/// A watch backend that records targets instead of polling the filesystem.
///
/// [`fire`](Self::fire) simulates a change on a path, behaving like every
/// subscription on that path noticed it.
#[derive(Clone, Default)]
pub struct RecordingWatchBackend {
    installed: Arc<Mutex<Vec<InstalledWatch>>>,
}

impl RecordingWatchBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn installed(&self) -> Vec<InstalledWatch> {
        self.installed.lock().unwrap().clone()
    }

    /// Sorted target paths across all profiles.
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self
            .installed()
            .iter()
            .map(|w| w.target.path().to_string())
            .collect();
        paths.sort();
        paths
    }

    /// Sorted target paths for one profile.
    pub fn paths_for(&self, profile: usize) -> Vec<String> {
        let mut paths: Vec<String> = self
            .installed()
            .iter()
            .filter(|w| w.profile.index == profile)
            .map(|w| w.target.path().to_string())
            .collect();
        paths.sort();
        paths
    }

    /// Simulate a change of `path`; returns how many subscriptions fired.
    pub async fn fire(&self, path: &str) -> usize {
        let matching: Vec<InstalledWatch> = self
            .installed()
            .into_iter()
            .filter(|w| w.target.path() == path)
            .collect();

        for watch in &matching {
            let request = BuildRequest::new(
                Arc::clone(&watch.profile),
                Trigger::File(watch.target.as_path().to_path_buf()),
            );
            watch
                .events_tx
                .send(RuntimeEvent::BuildRequested(request))
                .await
                .expect("runtime channel closed");
        }
        matching.len()
    }
}

impl WatchBackend for RecordingWatchBackend {
    fn watch(
        &self,
        target: WatchTarget,
        profile: Arc<Profile>,
        events_tx: mpsc::Sender<RuntimeEvent>,
    ) -> Result<()> {
        self.installed.lock().unwrap().push(InstalledWatch {
            target,
            profile,
            events_tx,
        });
        Ok(())
    }
}
