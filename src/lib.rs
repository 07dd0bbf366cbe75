// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod watch;

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::info;

use crate::cli::CliArgs;
use crate::config::load_config;
use crate::engine::{Runtime, RuntimeEvent};
use crate::errors::Result;
use crate::exec::{Console, RealExecutorBackend};
use crate::fs::RealFileSystem;
use crate::watch::{PollWatchBackend, TriggerInstaller};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (fatal on error)
/// - the stdout console shared by every build
/// - executor
/// - directory scanning + per-file watchers for each active profile
/// - Ctrl-C handling
///
/// Under normal operation this never returns.
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = args.config_path();
    let cfg = load_config(&config_path)?;
    info!(
        path = %config_path.display(),
        profiles = cfg.profiles.len(),
        active = cfg.active_profiles().count(),
        "autobuild starting"
    );

    let console = Console::stdout();

    // Runtime event channel.
    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);

    let executor = RealExecutorBackend::new(console.clone());

    let installer = TriggerInstaller::new(
        Arc::new(RealFileSystem),
        Arc::new(PollWatchBackend::default()),
        console,
        rt_tx.clone(),
    );

    // Ctrl-C → graceful shutdown.
    {
        let tx = rt_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
        });
    }

    let runtime = Runtime::new(rt_rx, executor);
    let runtime_task = tokio::spawn(runtime.run());

    // Scans keep running in the background; their handles are not needed.
    installer.install_config(&cfg).await?;

    let dispatched = runtime_task.await.map_err(errors::Error::from)??;
    info!(dispatched, "autobuild stopped");
    Ok(())
}
