// src/watch/mod.rs

//! File watching and trigger installation.
//!
//! This module is responsible for:
//! - Listing each configured directory once at startup (non-recursive).
//! - Matching entry names against the directory's regex patterns.
//! - Installing one poll-based watcher per matched file.
//! - Firing each profile's `INIT` build.
//!
//! Files created after startup are not picked up until restart.

pub mod patterns;
pub mod scanner;
pub mod watcher;

pub use patterns::{compile_patterns, match_entries, WatchTarget};
pub use scanner::TriggerInstaller;
pub use watcher::{classify, concerns_target, ChangeKind, PollWatchBackend, WatchBackend, POLL_INTERVAL};
