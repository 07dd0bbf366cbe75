// src/exec/backend.rs

//! Pluggable executor backend abstraction.
//!
//! The runtime talks to an `ExecutorBackend` instead of spawning processes
//! itself. This makes it easy to swap in a fake executor in tests while
//! keeping the production executor in [`executor_loop`](super::executor_loop).

use std::future::Future;
use std::pin::Pin;

use tokio::sync::mpsc;

use crate::engine::BuildRequest;
use crate::errors::{Error, Result};
use crate::exec::report::Console;

use super::executor_loop::spawn_executor;

/// Trait abstracting how build requests are executed.
///
/// Implementations must return as soon as the build has been handed off;
/// awaiting the build itself would serialize builds behind one another.
pub trait ExecutorBackend: Send {
    fn spawn_build(
        &mut self,
        request: BuildRequest,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Real executor backend used in production.
///
/// Wraps the background loop from [`spawn_executor`] and forwards requests
/// to it over an mpsc channel.
pub struct RealExecutorBackend {
    tx: mpsc::Sender<BuildRequest>,
}

impl RealExecutorBackend {
    /// Create a new backend writing its build report to `console`.
    ///
    /// This spawns the background executor loop immediately, so it must be
    /// called from within a Tokio runtime.
    pub fn new(console: Console) -> Self {
        let tx = spawn_executor(console);
        Self { tx }
    }
}

impl ExecutorBackend for RealExecutorBackend {
    fn spawn_build(
        &mut self,
        request: BuildRequest,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        // Clone the sender so the future doesn't borrow `self` across `await`.
        let tx = self.tx.clone();

        Box::pin(async move {
            tx.send(request).await.map_err(Error::from)?;
            Ok(())
        })
    }
}
