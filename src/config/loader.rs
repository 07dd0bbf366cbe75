// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{ConfigDocument, ConfigFile};
use crate::errors::Result;

/// Default location of the build config, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "./tools/build.json";

/// Load a configuration file from a given path and return the raw
/// `ConfigDocument`.
///
/// This only performs JSON deserialization. Use [`load_config`] to get the
/// resolved profile list the rest of the application works with.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ConfigDocument> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let doc: ConfigDocument = serde_json::from_str(&contents)?;

    Ok(doc)
}

/// Load a configuration file from path and resolve it into a `ConfigFile`.
///
/// This is the recommended entry point for the rest of the application.
/// There is no semantic validation beyond decoding: directory existence and
/// regex compilation are checked later, per directory, by the scanner.
pub fn load_config(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let doc = load_from_path(&path)?;
    let config = ConfigFile::from(doc);
    tracing::debug!(
        path = %path.as_ref().display(),
        profiles = config.profiles.len(),
        "config loaded"
    );
    Ok(config)
}

/// Helper to resolve the default config path.
pub fn default_config_path() -> PathBuf {
    PathBuf::from(DEFAULT_CONFIG_PATH)
}
