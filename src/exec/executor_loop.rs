// src/exec/executor_loop.rs

//! Background loop that turns build requests into build tasks.

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::engine::BuildRequest;
use crate::exec::report::Console;
use crate::exec::runner::run_build;

/// Spawn the background executor loop.
///
/// The returned `mpsc::Sender<BuildRequest>` is what `RealExecutorBackend`
/// forwards requests into. Each request is executed in its own Tokio task:
/// builds for the same profile or even the same file may overlap, and none
/// is ever cancelled or queued behind another.
pub fn spawn_executor(console: Console) -> mpsc::Sender<BuildRequest> {
    let (tx, mut rx) = mpsc::channel::<BuildRequest>(32);

    tokio::spawn(async move {
        info!("executor loop started");

        while let Some(request) = rx.recv().await {
            let console = console.clone();
            tokio::spawn(async move {
                let invocation = run_build(&request, &console).await;
                debug!(
                    trigger = %invocation.trigger,
                    status = invocation.status,
                    "build task finished"
                );
            });
        }

        info!("executor loop finished (channel closed)");
    });

    tx
}
