//! Command-line entry point for api-bridge.
//!
//! Without a subcommand the interactive TUI is launched. `run` plays one
//! session headlessly and `keys` lists the queries the resolver knows.

mod run;

use ab_core::config::loader::load_config;
use ab_core::resolver::known_keys;
use ab_protocol::{FlowMode, Speed};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "api-bridge", version, about = "Walk a request through frontend, backend and external API")]
struct Cli {
    /// Directory containing `.api-bridge/config.toml`.
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Launch the interactive TUI (default).
    Tui,
    /// Play one session without the TUI.
    Run {
        /// City to look up.
        query: String,
        /// auto or manual. Overrides the config file.
        #[arg(long)]
        mode: Option<FlowMode>,
        /// slow, normal or fast. Overrides the config file.
        #[arg(long)]
        speed: Option<Speed>,
        /// Print the final session as JSON instead of a summary.
        #[arg(long)]
        json: bool,
    },
    /// List the known query keys.
    Keys,
}

#[tokio::main]
async fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let mut config = load_config(&cli.root).await?.flow;

    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => {
            ab_tui::run_app(config)
                .await
                .map_err(|e| color_eyre::eyre::eyre!(e))?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Run {
            query,
            mode,
            speed,
            json,
        } => {
            init_logging();
            if let Some(mode) = mode {
                config.mode = mode;
            }
            if let Some(speed) = speed {
                config.speed = speed;
            }
            run::run_headless(config, &query, json).await
        }
        Command::Keys => {
            for key in known_keys() {
                println!("{key}");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
