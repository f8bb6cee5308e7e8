//! MergeService: orchestrates sources and deserializes to DigestConfig.

use crate::config::sources::{environment, file};
use crate::config::DigestConfig;
use config::{Config, ConfigError};
use std::path::Path;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Load config from standard sources.
    /// Precedence: defaults (lowest) -> global file -> explicit file -> environment (highest).
    pub fn load(explicit: Option<&Path>) -> Result<DigestConfig, ConfigError> {
        let builder = Config::builder();
        let builder = file::add_global_to_builder(builder)?;
        let builder = match explicit {
            Some(path) => file::add_to_builder(builder, path)?,
            None => builder,
        };
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load config from a specific file with environment overlay, skipping the global file.
    pub fn load_from_file(path: &Path) -> Result<DigestConfig, ConfigError> {
        let builder = file::add_to_builder(Config::builder(), path)?;
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }
}
