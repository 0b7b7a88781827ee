//! Main entry point for the ab-tui binary.
//!
//! This executable opens the TUI with the configuration found in the
//! current directory.

use ab_core::config::loader::load_config;
use ab_tui::run_app;
use anyhow::Result;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config(Path::new(".")).await?;
    run_app(config.flow).await
}
