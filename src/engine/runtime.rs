// src/engine/runtime.rs

use std::fmt;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::errors::Result;
use crate::exec::ExecutorBackend;

use super::{BuildRequest, RuntimeEvent};

/// Consumes `RuntimeEvent`s and delegates every build request to an
/// `ExecutorBackend`.
///
/// The loop itself never waits for a build to finish, so a slow build does
/// not hold up requests coming from other files or profiles.
pub struct Runtime<E: ExecutorBackend> {
    event_rx: mpsc::Receiver<RuntimeEvent>,
    executor: E,
    dispatched: u64,
}

impl<E: ExecutorBackend> fmt::Debug for Runtime<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("dispatched", &self.dispatched)
            .finish_non_exhaustive()
    }
}

impl<E: ExecutorBackend> Runtime<E> {
    pub fn new(event_rx: mpsc::Receiver<RuntimeEvent>, executor: E) -> Self {
        Self {
            event_rx,
            executor,
            dispatched: 0,
        }
    }

    /// Main event loop.
    ///
    /// Returns when a shutdown is requested or every sender has been dropped.
    /// Yields the number of builds dispatched.
    pub async fn run(mut self) -> Result<u64> {
        info!("autobuild runtime started");

        while let Some(event) = self.event_rx.recv().await {
            debug!(?event, "runtime received event");

            match event {
                RuntimeEvent::BuildRequested(request) => self.dispatch(request).await?,
                RuntimeEvent::ShutdownRequested => {
                    info!("shutdown requested, stopping runtime");
                    return Ok(self.dispatched);
                }
            }
        }

        info!("runtime event channel closed; exiting");
        Ok(self.dispatched)
    }

    async fn dispatch(&mut self, request: BuildRequest) -> Result<()> {
        debug!(
            profile = request.profile.index,
            trigger = %request.trigger,
            "dispatching build"
        );
        self.dispatched += 1;
        self.executor.spawn_build(request).await
    }
}
