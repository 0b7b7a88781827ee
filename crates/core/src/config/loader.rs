//! Configuration file loader for the `.api-bridge/` directory.
//!
//! Only `config.toml` is read. Everything else about a flow (stage order,
//! durations, speed table, catalog) is compiled in.

use crate::config::error::ConfigError;
use crate::config::error::ConfigResult;
use crate::config::models::AppConfig;
use ab_protocol::config_models::FlowConfig;
use std::path::Path;
use tracing::debug;

/// Directory, relative to the root, holding the configuration.
pub const CONFIG_DIR: &str = ".api-bridge";

/// File name of the configuration inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

/// Loads configuration from `<root>/.api-bridge/config.toml`.
///
/// # Arguments
///
/// * `root` - Directory containing the `.api-bridge/` folder
///
/// # Returns
///
/// An `AppConfig`. If the directory or the file is missing, the default
/// configuration is returned rather than an error.
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or is not
/// valid TOML for [`FlowConfig`].
pub async fn load_config(root: &Path) -> ConfigResult<AppConfig> {
    let config_path = root.join(CONFIG_DIR).join(CONFIG_FILE);

    if !config_path.exists() {
        debug!(path = %config_path.display(), "no config file, using defaults");
        return Ok(AppConfig::default());
    }

    let content =
        std::fs::read_to_string(&config_path).map_err(|source| ConfigError::FileRead {
            path: config_path.clone(),
            source,
        })?;

    let flow: FlowConfig =
        toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
            path: config_path.clone(),
            source,
        })?;

    debug!(path = %config_path.display(), mode = %flow.mode, speed = %flow.speed, "config loaded");

    Ok(AppConfig {
        flow,
        source: Some(config_path),
    })
}
