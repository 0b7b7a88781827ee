//! Loaded configuration.

use ab_protocol::config_models::FlowConfig;
use std::path::PathBuf;

/// Application configuration loaded from the `.api-bridge/` directory.
///
/// # Example
///
/// ```rust,no_run
/// use ab_core::config::loader::load_config;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new(".")).await?;
/// println!("mode={} speed={}", config.flow.mode, config.flow.speed);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// Mode and speed for new sessions.
    pub flow: FlowConfig,

    /// File the settings came from, `None` when defaults were used.
    pub source: Option<PathBuf>,
}
