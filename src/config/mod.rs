// src/config/mod.rs

//! Configuration loading for autobuild.
//!
//! Responsibilities:
//! - Define the JSON-backed data model (`model.rs`).
//! - Load a config file from disk and resolve it into a flat list of
//!   profiles (`loader.rs`).

pub mod loader;
pub mod model;

pub use loader::{default_config_path, load_config, load_from_path};
pub use model::{ConfigDocument, ConfigFile, Profile, RawProfile};
