// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running the configured build
//! command, using `tokio::process::Command`, and reporting each outcome on
//! the shared [`Console`].
//!
//! - [`args`] expands the `$TARGET` placeholder.
//! - [`runner`] runs a single build to completion and captures its output.
//! - [`report`] formats report lines and owns the serialized stdout sink.
//! - [`executor_loop`] spawns one task per build request.
//! - [`backend`] provides the `ExecutorBackend` trait and the
//!   `RealExecutorBackend` that the runtime uses in production, and which
//!   tests can replace with a fake implementation.

pub mod args;
pub mod backend;
pub mod executor_loop;
pub mod report;
pub mod runner;

pub use args::{substitute_args, TARGET_PLACEHOLDER};
pub use backend::{ExecutorBackend, RealExecutorBackend};
pub use executor_loop::spawn_executor;
pub use report::{Console, SharedBuffer};
pub use runner::{run_build, BuildInvocation, SPAWN_FAILURE_STATUS};
