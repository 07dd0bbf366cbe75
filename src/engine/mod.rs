// src/engine/mod.rs

//! Orchestration engine for autobuild.
//!
//! Watchers and the startup installer never run builds themselves; they send
//! [`RuntimeEvent::BuildRequested`] into one channel. The [`Runtime`] loop
//! hands each request to an [`ExecutorBackend`](crate::exec::ExecutorBackend)
//! which starts it immediately. There is no queue and no cancellation: every
//! request becomes its own build, concurrently with any still running.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Profile;

pub mod runtime;

pub use runtime::Runtime;

/// Label used for the synthetic startup build.
pub const INIT_LABEL: &str = "INIT";

/// What caused a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// One-off build fired when a profile is installed.
    Init,
    /// A watched file changed.
    File(PathBuf),
}

impl Trigger {
    /// The value substituted for `$TARGET` and shown in the build announcement.
    pub fn label(&self) -> String {
        match self {
            Trigger::Init => INIT_LABEL.to_string(),
            Trigger::File(path) => path.to_string_lossy().into_owned(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Trigger::Init => None,
            Trigger::File(path) => Some(path),
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// A request to run one profile's build command for one trigger.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    pub profile: Arc<Profile>,
    pub trigger: Trigger,
}

impl BuildRequest {
    pub fn new(profile: Arc<Profile>, trigger: Trigger) -> Self {
        Self { profile, trigger }
    }
}

/// Events flowing into the runtime from the installer, watchers and signals.
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    /// Start a build now.
    BuildRequested(BuildRequest),
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_trigger_uses_literal_label() {
        assert_eq!(Trigger::Init.label(), "INIT");
        assert_eq!(Trigger::Init.to_string(), "INIT");
        assert!(Trigger::Init.path().is_none());
    }

    #[test]
    fn file_trigger_label_is_the_path_verbatim() {
        let t = Trigger::File(PathBuf::from("./src/x.c"));
        assert_eq!(t.label(), "./src/x.c");
        assert_eq!(t.path(), Some(Path::new("./src/x.c")));
    }
}
