// src/watch/scanner.rs

//! Directory scanning and trigger installation.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use anyhow::anyhow;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::config::{ConfigFile, Profile};
use crate::engine::{BuildRequest, RuntimeEvent, Trigger};
use crate::errors::{AutobuildError, Result};
use crate::exec::report::{target_line, Console};
use crate::fs::FileSystem;
use crate::watch::patterns::{compile_patterns, match_entries};
use crate::watch::watcher::WatchBackend;

/// Installs watchers for a profile's files and fires its startup build.
///
/// All collaborators are passed in at construction, nothing is global.
#[derive(Clone)]
pub struct TriggerInstaller {
    fs: Arc<dyn FileSystem>,
    backend: Arc<dyn WatchBackend>,
    console: Console,
    events_tx: mpsc::Sender<RuntimeEvent>,
}

impl fmt::Debug for TriggerInstaller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriggerInstaller")
            .field("fs", &self.fs)
            .finish_non_exhaustive()
    }
}

impl TriggerInstaller {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        backend: Arc<dyn WatchBackend>,
        console: Console,
        events_tx: mpsc::Sender<RuntimeEvent>,
    ) -> Self {
        Self {
            fs,
            backend,
            console,
            events_tx,
        }
    }

    /// Install every active profile of `config`, in document order.
    ///
    /// Disabled profiles get neither watchers nor a startup build.
    pub async fn install_config(&self, config: &ConfigFile) -> Result<Vec<JoinHandle<usize>>> {
        let mut handles = Vec::new();
        for profile in config.active_profiles() {
            handles.extend(self.install(Arc::new(profile.clone())).await?);
        }
        Ok(handles)
    }

    /// Install one profile.
    ///
    /// - Spawns one scan task per configured directory. Scans run
    ///   independently; a failing directory only logs an error.
    /// - Then requests the `INIT` build right away, without waiting for any
    ///   scan to finish.
    ///
    /// The returned handles resolve to the number of targets each directory
    /// installed. Dropping them does not stop the scans.
    pub async fn install(&self, profile: Arc<Profile>) -> Result<Vec<JoinHandle<usize>>> {
        info!(
            profile = profile.index,
            command = %profile.build_command,
            dirs = profile.file_list.len(),
            "installing profile"
        );

        let handles = profile
            .file_list
            .iter()
            .map(|(dir, patterns)| {
                let scan = DirectoryScan {
                    dir: dir.clone(),
                    patterns: patterns.clone(),
                    profile: Arc::clone(&profile),
                    installer: self.clone(),
                };
                tokio::spawn(scan.run())
            })
            .collect();

        self.events_tx
            .send(RuntimeEvent::BuildRequested(BuildRequest::new(
                Arc::clone(&profile),
                Trigger::Init,
            )))
            .await
            .map_err(|_| AutobuildError::Other(anyhow!("runtime event channel closed")))?;

        Ok(handles)
    }
}

/// One directory's worth of scanning work.
struct DirectoryScan {
    dir: String,
    patterns: Vec<String>,
    profile: Arc<Profile>,
    installer: TriggerInstaller,
}

impl DirectoryScan {
    async fn run(self) -> usize {
        let entries = match self.list().await {
            Ok(entries) => entries,
            Err(err) => {
                error!(
                    dir = %self.dir,
                    profile = self.profile.index,
                    error = %format!("{err:#}"),
                    "failed to list watch directory"
                );
                return 0;
            }
        };

        let patterns = compile_patterns(&self.dir, &self.patterns);
        let targets = match_entries(&self.dir, &entries, &patterns);
        let mut installed = 0;

        for target in targets {
            self.installer.console.line(&target_line(target.path()));

            match self.installer.backend.watch(
                target.clone(),
                Arc::clone(&self.profile),
                self.installer.events_tx.clone(),
            ) {
                Ok(()) => installed += 1,
                Err(err) => {
                    error!(path = %target.path(), error = %err, "failed to watch file");
                }
            }
        }

        info!(
            dir = %self.dir,
            profile = self.profile.index,
            entries = entries.len(),
            installed,
            "directory scanned"
        );
        installed
    }

    async fn list(&self) -> anyhow::Result<Vec<String>> {
        let fs = Arc::clone(&self.installer.fs);
        let dir = self.dir.clone();
        tokio::task::spawn_blocking(move || fs.list_dir(Path::new(&dir))).await?
    }
}
