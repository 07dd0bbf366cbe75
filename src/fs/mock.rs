// src/fs/mock.rs

use super::FileSystem;
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// In-memory directory listing used by tests.
///
/// Only directories and their immediate entry names are modelled; file
/// contents are irrelevant to the scanner.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    dirs: Arc<Mutex<HashMap<PathBuf, Vec<String>>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` as an entry of `dir`, creating the directory if needed.
    pub fn add_file(&self, dir: impl AsRef<Path>, name: &str) {
        let mut dirs = self.dirs.lock().unwrap();
        let entries = dirs.entry(dir.as_ref().to_path_buf()).or_default();
        if !entries.iter().any(|e| e == name) {
            entries.push(name.to_string());
        }
    }

    /// Register an empty directory.
    pub fn add_dir(&self, dir: impl AsRef<Path>) {
        let mut dirs = self.dirs.lock().unwrap();
        dirs.entry(dir.as_ref().to_path_buf()).or_default();
    }
}

impl FileSystem for MockFileSystem {
    fn list_dir(&self, path: &Path) -> Result<Vec<String>> {
        let dirs = self.dirs.lock().unwrap();
        match dirs.get(path) {
            Some(entries) => Ok(entries.clone()),
            None => Err(anyhow!("Not a directory or not found: {:?}", path)),
        }
    }
}
