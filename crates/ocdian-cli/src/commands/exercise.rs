//! Live runner shared by the breathing, body-scan and ERP commands.

use std::io::Write;
use std::time::Duration;

use ocdian_core::timer::drive;
use ocdian_core::{Config, Event, PhaseKind, PhaseTimer, TimerMode};

pub struct RunOptions {
    pub period: Duration,
    pub json: bool,
}

impl RunOptions {
    pub fn new(config: &Config, interval_ms: Option<u64>, json: bool) -> Self {
        let period = interval_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or_else(|| config.tick_interval());
        Self { period, json }
    }
}

/// Ring the terminal bell when a breathing run finishes, if enabled.
pub fn with_signal(timer: PhaseTimer, config: &Config) -> PhaseTimer {
    if config.notifications.haptics {
        timer.with_completion_signal(|| {
            eprint!("\x07");
        })
    } else {
        timer
    }
}

/// Start `timer` and tick it until it completes or the user presses Ctrl-C.
///
/// Returns the timer so callers can inspect the final state.
pub fn run(mut timer: PhaseTimer, opts: &RunOptions) -> Result<PhaseTimer, Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    emit(&timer.start(), opts.json);

    let finished = runtime.block_on(async {
        tokio::select! {
            done = drive(&mut timer, opts.period, |t, event| match event {
                Some(event) => emit(event, opts.json),
                None => countdown(t, opts.json),
            }) => done,
            _ = tokio::signal::ctrl_c() => None,
        }
    });

    if finished.is_none() {
        if let Some(stopped) = timer.stop() {
            emit(&stopped, opts.json);
        }
    }
    tracing::debug!(ticks = timer.ticks(), state = ?timer.state(), "exercise ended");
    Ok(timer)
}

fn emit(event: &Event, json: bool) {
    if json {
        match serde_json::to_string(event) {
            Ok(line) => println!("{line}"),
            Err(e) => tracing::warn!(error = %e, "could not serialize event"),
        }
    } else if let Some(text) = describe(event) {
        println!("{text}");
    }
}

/// Per-second countdown line for the single-phase ERP timer.
fn countdown(timer: &PhaseTimer, json: bool) {
    if json || timer.mode() != TimerMode::Erp {
        return;
    }
    print!("\rTime remaining: {}", format_time(timer.remaining_secs()));
    let _ = std::io::stdout().flush();
}

pub fn describe(event: &Event) -> Option<String> {
    match event {
        Event::TimerStarted {
            mode, label, total_secs, ..
        } => Some(match mode {
            TimerMode::Erp => format!("Exposure started: {}", format_time(*total_secs)),
            _ => format!("{label}..."),
        }),
        Event::PhaseAdvanced {
            phase, label, duration_secs, cycle, ..
        } => Some(match (phase, cycle) {
            (PhaseKind::Inhale, Some(cycle)) => format!("{label} ({duration_secs}s, cycle {cycle})"),
            (PhaseKind::BodyPart, _) => format!("Focus on your {}", label.to_lowercase()),
            _ => format!("{label} ({duration_secs}s)"),
        }),
        Event::TimerStopped { remaining_secs, .. } => {
            Some(format!("\nStopped with {} left.", format_time(*remaining_secs)))
        }
        Event::TimerCompleted { mode, .. } => Some(match mode {
            TimerMode::Erp => "\nExposure complete. Well done for staying with it.".to_string(),
            TimerMode::Breathing => "Breathing exercise complete.".to_string(),
            TimerMode::BodyScan => "Body scan complete.".to_string(),
        }),
        Event::TimerReset { .. } | Event::StateSnapshot { .. } => None,
    }
}

pub fn format_time(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
