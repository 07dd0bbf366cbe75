// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! The surface is deliberately tiny: `autobuild [CONFIG]`.

use std::path::PathBuf;

use clap::Parser;

use crate::config::loader::default_config_path;

/// Command-line arguments for `autobuild`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "autobuild",
    version,
    about = "Watch files and re-run a build command whenever one of them changes.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the build config (JSON).
    ///
    /// Default: `./tools/build.json`.
    #[arg(value_name = "CONFIG")]
    pub config: Option<PathBuf>,
}

impl CliArgs {
    /// Config path given on the command line, or the default location.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(default_config_path)
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_argument_uses_default_config() {
        let args = CliArgs::try_parse_from(["autobuild"]).unwrap();
        assert_eq!(args.config_path(), PathBuf::from("./tools/build.json"));
    }

    #[test]
    fn positional_argument_overrides_config() {
        let args = CliArgs::try_parse_from(["autobuild", "conf/dev.json"]).unwrap();
        assert_eq!(args.config_path(), PathBuf::from("conf/dev.json"));
    }

    #[test]
    fn extra_positional_is_rejected() {
        assert!(CliArgs::try_parse_from(["autobuild", "a.json", "b.json"]).is_err());
    }
}
