//! Integration tests for automatic sessions.
//!
//! These tests run on tokio's paused clock, so elapsed times are exact
//! multiples of the stage table rather than wall-clock approximations.

mod common;

use ab_core::engine::timing::total_duration;
use ab_core::resolver::known_keys;
use ab_protocol::{Event, FlowMode, Speed, Stage};
use common::*;
use std::time::Duration;
use tokio::time::{sleep, Instant};

const TOLERANCE: Duration = Duration::from_millis(50);

#[tokio::test(start_paused = true)]
async fn test_auto_success_elapsed_matches_speed() {
    for speed in [Speed::Slow, Speed::Normal, Speed::Fast] {
        let (mut controller, mut events_rx) = controller_with_events(FlowMode::Auto, speed);
        let mut state_rx = controller.subscribe();

        let began = Instant::now();
        controller.start("Roma");
        let session = wait_terminal(&mut state_rx).await;
        let elapsed = began.elapsed();

        let expected = total_duration(speed.factor());
        assert_eq!(session.stage, Stage::Complete, "speed {speed}");
        assert!(elapsed >= expected, "{speed}: {elapsed:?} < {expected:?}");
        assert!(elapsed < expected + TOLERANCE, "{speed}: {elapsed:?} too slow");
        assert_eq!(session.result.map(|r| r.measurement), Some(22.0));

        assert_event_sequence(&drain(&mut events_rx));
    }
}

#[tokio::test(start_paused = true)]
async fn test_auto_snapshots_keep_invariants() {
    let (mut controller, _events_rx) = controller_with_events(FlowMode::Auto, Speed::Normal);
    let mut state_rx = controller.subscribe();

    controller.start("New York");

    let mut seen = Vec::new();
    loop {
        let session = state_rx.borrow_and_update().clone();
        assert_session_invariants(&session);
        seen.push(session.stage);
        if session.stage.is_terminal() {
            break;
        }
        state_rx.changed().await.expect("controller dropped");
    }

    assert_eq!(seen.first(), Some(&Stage::Sending));
    assert_eq!(seen.last(), Some(&Stage::Complete));
}

#[tokio::test(start_paused = true)]
async fn test_auto_unknown_query_fails_after_normalizing() {
    let (mut controller, mut events_rx) = controller_with_events(FlowMode::Auto, Speed::Normal);
    let mut state_rx = controller.subscribe();

    controller.start("Unknown City");

    // 800 + 1000 + 1000 + 800 ms in, the session sits on normalizing.
    sleep(Duration::from_millis(3700)).await;
    assert_eq!(controller.state().stage, Stage::Normalizing);

    let session = wait_terminal(&mut state_rx).await;
    assert_eq!(session.stage, Stage::Error);
    assert!(session.result.is_none());

    let message = session.error_message.expect("error message should be set");
    for key in known_keys() {
        assert!(message.contains(key), "{key} missing from {message}");
    }

    let events = drain(&mut events_rx);
    assert_event_sequence(&events);
    assert!(!entered_stages(&events).contains(&Stage::Complete));
}

#[tokio::test(start_paused = true)]
async fn test_auto_ignores_advance() {
    let (mut controller, _events_rx) = controller_with_events(FlowMode::Auto, Speed::Normal);

    controller.start("Roma");
    controller.advance();
    controller.advance();

    assert_eq!(controller.state().stage, Stage::Sending);
    assert!(controller.is_driving());
}

#[tokio::test(start_paused = true)]
async fn test_speed_is_captured_at_start() {
    let (mut controller, _events_rx) = controller_with_events(FlowMode::Auto, Speed::Normal);
    let mut state_rx = controller.subscribe();

    let began = Instant::now();
    controller.start("Tokyo");
    controller.set_speed(Speed::Slow);
    controller.set_mode(FlowMode::Manual);

    let session = wait_terminal(&mut state_rx).await;
    assert_eq!(session.stage, Stage::Complete);
    assert_eq!(session.speed_factor, 1.0);
    assert!(began.elapsed() < total_duration(1.0) + TOLERANCE);
}

#[tokio::test(start_paused = true)]
async fn test_restart_cancels_previous_session() {
    let (mut controller, mut events_rx) = controller_with_events(FlowMode::Auto, Speed::Normal);
    let mut state_rx = controller.subscribe();

    controller.start("Roma");
    let first_id = controller.state().session_id;
    sleep(Duration::from_millis(1500)).await;
    assert_eq!(controller.state().stage, Stage::BackendProcessing);
    drain(&mut events_rx);

    let restarted = Instant::now();
    controller.start("Milano");
    let second_id = controller.state().session_id;
    assert!(second_id > first_id);

    let session = wait_terminal(&mut state_rx).await;
    assert_eq!(session.session_id, second_id);
    assert_eq!(session.result.map(|r| r.key), Some("Milano".to_string()));
    assert!(restarted.elapsed() < total_duration(1.0) + TOLERANCE);

    // Give any stray timer of the first session every chance to fire.
    sleep(Duration::from_secs(30)).await;

    let events = drain(&mut events_rx);
    assert!(events.iter().all(|e| e.session_id() == second_id));
    assert_event_sequence(&events);
    assert_eq!(controller.state().session_id, second_id);
    assert_eq!(controller.state().stage, Stage::Complete);
}

#[tokio::test(start_paused = true)]
async fn test_reset_mid_flight_returns_to_idle() {
    let (mut controller, mut events_rx) = controller_with_events(FlowMode::Auto, Speed::Normal);

    controller.start("Parigi");
    sleep(Duration::from_millis(2000)).await;
    assert_eq!(controller.state().stage, Stage::CallingExternal);

    controller.reset();
    drain(&mut events_rx);
    assert!(!controller.is_driving());

    sleep(Duration::from_secs(30)).await;

    let session = controller.state();
    assert_eq!(session.stage, Stage::Idle);
    assert_eq!(session.stage_index, None);
    assert!(session.query.is_empty());
    assert!(session.result.is_none());
    assert!(session.error_message.is_none());
    assert!(drain(&mut events_rx).is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_reset_after_complete_and_error() {
    let (mut controller, _events_rx) = controller_with_events(FlowMode::Auto, Speed::Fast);
    let mut state_rx = controller.subscribe();

    controller.start("Londra");
    assert_eq!(wait_terminal(&mut state_rx).await.stage, Stage::Complete);
    controller.reset();
    assert_session_invariants(&controller.state());
    assert_eq!(controller.state().stage, Stage::Idle);

    controller.start("Gotham");
    assert_eq!(wait_terminal(&mut state_rx).await.stage, Stage::Error);
    controller.reset();
    assert_session_invariants(&controller.state());
    assert_eq!(controller.state().stage, Stage::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_reset_event_names_previous_session() {
    let (mut controller, mut events_rx) = controller_with_events(FlowMode::Auto, Speed::Normal);

    controller.start("Roma");
    let id = controller.state().session_id;
    controller.reset();

    let events = drain(&mut events_rx);
    assert!(matches!(
        events.last(),
        Some(Event::SessionReset { session_id }) if *session_id == id
    ));
}
