//! File sources: the global XDG config file and explicit config files.

use crate::config::paths::xdg_root;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};
use std::path::Path;

/// Add the global config file if it exists.
pub fn add_global_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    match xdg_root::global_config_path() {
        Some(path) => Ok(builder.add_source(File::from(path).required(false))),
        None => Ok(builder),
    }
}

/// Add an explicit config file; it must exist.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }
    Ok(builder.add_source(File::from(path).required(true)))
}
