// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::ConfigFile;
use crate::errors::Result;

/// Load a configuration file from a given path.
///
/// Reads TOML; defaults for missing sections and fields are applied by
/// `serde` + `Default` impls, so an empty file is a valid configuration.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    load_from_str(&contents)
}

/// Parse configuration from a TOML string.
pub fn load_from_str(contents: &str) -> Result<ConfigFile> {
    let config: ConfigFile = toml::from_str(contents)?;
    Ok(config)
}

/// Helper to resolve a default config path.
///
/// Currently this just returns `Runlist.toml` in the current working
/// directory; embedding applications are free to pass their own path to
/// [`load_from_path`].
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Runlist.toml")
}
