//! Headless session runner.

use ab_core::state::controller::FlowController;
use ab_protocol::{Event, FlowConfig, FlowMode, FlowSession, Stage};
use color_eyre::eyre::{bail, eyre};
use colored::Colorize;
use std::process::ExitCode;
use std::time::Instant;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::debug;

/// Play one session for `query` and print it.
///
/// Exits with success when the session completes and failure when it ends
/// in the error stage.
pub async fn run_headless(config: FlowConfig, query: &str, json: bool) -> color_eyre::Result<ExitCode> {
    if query.trim().is_empty() {
        bail!("query must not be empty");
    }

    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let mut controller = FlowController::with_events(config, events_tx);
    let started = Instant::now();

    controller.start(query);
    match config.mode {
        FlowMode::Auto => follow_auto(&mut events_rx, started, json).await?,
        FlowMode::Manual => step_manual(&mut controller, &mut events_rx, started, json),
    }

    let session = controller.state();
    debug!(stage = %session.stage, "headless run finished");

    if json {
        println!("{}", serde_json::to_string_pretty(&session)?);
    } else {
        print_summary(&session);
    }

    Ok(match session.stage {
        Stage::Complete => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}

/// Print events until the session settles.
async fn follow_auto(
    events_rx: &mut UnboundedReceiver<Event>,
    started: Instant,
    quiet: bool,
) -> color_eyre::Result<()> {
    loop {
        let event = events_rx
            .recv()
            .await
            .ok_or_else(|| eyre!("controller stopped before the session settled"))?;
        if !quiet {
            print_event(&event, started);
        }
        if is_final(&event) {
            return Ok(());
        }
    }
}

/// Advance until the session reaches a terminal stage.
fn step_manual(
    controller: &mut FlowController,
    events_rx: &mut UnboundedReceiver<Event>,
    started: Instant,
    quiet: bool,
) {
    loop {
        while let Ok(event) = events_rx.try_recv() {
            if !quiet {
                print_event(&event, started);
            }
        }
        if controller.state().stage.is_terminal() {
            return;
        }
        controller.advance();
    }
}

fn is_final(event: &Event) -> bool {
    matches!(
        event,
        Event::SessionCompleted { .. } | Event::SessionFailed { .. }
    )
}

fn print_event(event: &Event, started: Instant) {
    let elapsed = format!("{:>6}ms", started.elapsed().as_millis()).dimmed();
    match event {
        Event::SessionStarted {
            query,
            mode,
            speed_factor,
            ..
        } => println!("{elapsed} {} \"{query}\" ({mode}, x{speed_factor})", "start".bold()),
        Event::StageEntered {
            stage, stage_index, ..
        } => println!("{elapsed} [{stage_index}] {}", stage.as_str().cyan()),
        Event::SessionCompleted { .. } => println!("{elapsed} {}", "complete".green()),
        Event::SessionFailed { .. } => println!("{elapsed} {}", "error".red()),
        Event::SessionReset { .. } => println!("{elapsed} {}", "reset".yellow()),
    }
}

fn print_summary(session: &FlowSession) {
    match (&session.result, &session.error_message) {
        (Some(record), _) => println!(
            "{} {} ({}) {}°C {}, humidity {}%, wind {} km/h",
            record.icon,
            record.key.bold(),
            record.country,
            record.measurement,
            record.label,
            record.humidity,
            record.wind_speed
        ),
        (None, Some(message)) => eprintln!("{} {message}", "✘".red()),
        (None, None) => eprintln!("{} session ended in {}", "✘".red(), session.stage),
    }
}
