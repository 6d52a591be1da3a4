//! Integration tests for the exercise timers.

use std::time::Duration;

use ocdian_core::timer::{drive, DEFAULT_BODY_PARTS};
use ocdian_core::{Config, ErpDuration, Event, PhaseKind, PhaseTimer, TimerMode, TimerState};

#[test]
fn test_config_shaped_breathing_matches_defaults() {
    let cfg = Config::default();
    let mut timer = cfg.breathing_timer();
    assert_eq!(timer.mode(), TimerMode::Breathing);
    assert_eq!(timer.total_units(), 61);

    timer.start();
    let mut phases = Vec::new();
    while timer.is_running() {
        if let Some(Event::PhaseAdvanced { phase, .. }) = timer.tick() {
            phases.push(phase);
        }
    }
    assert_eq!(phases.len(), 12);
    assert!(phases
        .chunks(2)
        .all(|pair| pair == [PhaseKind::Inhale, PhaseKind::Exhale]));
}

#[test]
fn test_every_erp_duration_counts_down_to_zero() {
    for duration in ErpDuration::ALL {
        let mut timer = PhaseTimer::erp(duration.secs());
        timer.start();
        let mut lowest = timer.remaining_secs();
        while timer.is_running() {
            timer.tick();
            lowest = lowest.min(timer.remaining_secs());
        }
        assert_eq!(timer.ticks(), duration.secs());
        assert_eq!(lowest, 0);
        assert_eq!(timer.state(), TimerState::Completed);
    }
}

#[test]
fn test_events_serialize_with_type_tag() {
    let mut timer = PhaseTimer::body_scan(&DEFAULT_BODY_PARTS, 10);
    let started = serde_json::to_value(timer.start()).unwrap();
    assert_eq!(started["type"], "timer_started");
    assert_eq!(started["mode"], "body_scan");
    assert_eq!(started["label"], "Head");
    assert_eq!(started["total_secs"], 60);
}

#[tokio::test(start_paused = true)]
async fn test_drive_body_scan_reports_each_part() {
    let mut timer = PhaseTimer::body_scan(&DEFAULT_BODY_PARTS, 10);
    timer.start();

    let mut labels = vec![timer.current_phase().unwrap().label.clone()];
    let done = drive(&mut timer, Duration::from_secs(1), |_, event| {
        if let Some(Event::PhaseAdvanced { label, .. }) = event {
            labels.push(label.clone());
        }
    })
    .await;

    assert!(done.is_some());
    assert_eq!(labels, DEFAULT_BODY_PARTS);
    assert_eq!(timer.ticks(), 60);
}
