#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use autobuild::config::{ConfigFile, Profile};

/// Builder for `Profile` to simplify test setup.
pub struct ProfileBuilder {
    profile: Profile,
}

impl ProfileBuilder {
    pub fn new(command: &str) -> Self {
        Self {
            profile: Profile {
                index: 0,
                enabled: true,
                file_list: BTreeMap::new(),
                build_command: command.to_string(),
                build_args: Vec::new(),
            },
        }
    }

    pub fn index(mut self, index: usize) -> Self {
        self.profile.index = index;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.profile.enabled = false;
        self
    }

    /// Add (or extend) a directory with the given patterns.
    pub fn watch_dir(mut self, dir: &str, patterns: &[&str]) -> Self {
        self.profile
            .file_list
            .entry(dir.to_string())
            .or_default()
            .extend(patterns.iter().map(|p| p.to_string()));
        self
    }

    pub fn arg(mut self, arg: &str) -> Self {
        self.profile.build_args.push(arg.to_string());
        self
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.profile
            .build_args
            .extend(args.iter().map(|a| a.to_string()));
        self
    }

    pub fn build(self) -> Profile {
        self.profile
    }

    pub fn build_arc(self) -> Arc<Profile> {
        Arc::new(self.profile)
    }
}

/// Builder for `ConfigFile`; profile indices follow insertion order.
#[derive(Default)]
pub struct ConfigFileBuilder {
    profiles: Vec<Profile>,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(mut self, profile: ProfileBuilder) -> Self {
        let index = self.profiles.len();
        self.profiles.push(profile.index(index).build());
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile {
            profiles: self.profiles,
        }
    }
}
