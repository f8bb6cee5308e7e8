//! Environment variable source: VFS_DIGEST_* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

pub const ENV_PREFIX: &str = "VFS_DIGEST";

/// Add environment variable overlay to builder.
/// Uses VFS_DIGEST prefix and __ as separator for nested keys,
/// e.g. `VFS_DIGEST__CACHE__MAX_ENTRIES=50000`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
