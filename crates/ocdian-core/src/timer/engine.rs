//! Phase timer implementation.
//!
//! The phase timer is a tick-counting state machine shared by the breathing,
//! body-scan and ERP exercises. It does not use internal threads - the caller
//! (a host scheduler, or [`drive`](super::drive)) delivers one `tick()` per
//! timer unit.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (Completed | Idle via stop/reset)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = PhaseTimer::erp(300);
//! timer.start();
//! // Once per second:
//! timer.tick(); // Returns Some(Event) on phase change or completion
//! ```

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::handle::{TickHandle, TickWatcher};
use super::schedule::{Phase, PhasePlan, TimerMode};
use super::signal::CompletionSignal;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Completed,
}

/// Tick-driven exercise timer.
///
/// Holds at most one live [`TickHandle`]; `start()` cancels the previous one
/// before arming a new one.
pub struct PhaseTimer {
    plan: PhasePlan,
    state: TimerState,
    phase_index: usize,
    /// Units left in the current phase.
    remaining_secs: u64,
    /// Ticks consumed since the last start.
    ticks: u64,
    handle: Option<TickHandle>,
    signal: Option<Box<dyn CompletionSignal>>,
}

impl PhaseTimer {
    /// Create a timer for the given plan, `Idle` with the first phase ready.
    pub fn new(plan: PhasePlan) -> Self {
        let remaining_secs = plan.phases.first().map(|p| p.duration_secs).unwrap_or(0);
        Self {
            plan,
            state: TimerState::Idle,
            phase_index: 0,
            remaining_secs,
            ticks: 0,
            handle: None,
            signal: None,
        }
    }

    pub fn erp(duration_secs: u64) -> Self {
        Self::new(PhasePlan::erp(duration_secs))
    }

    pub fn breathing(lead_in_secs: u64, phase_secs: u64, cycles: u32) -> Self {
        Self::new(PhasePlan::breathing(lead_in_secs, phase_secs, cycles))
    }

    pub fn body_scan<S: AsRef<str>>(parts: &[S], hold_secs: u64) -> Self {
        Self::new(PhasePlan::body_scan(parts, hold_secs))
    }

    /// Attach the signal fired when an exercise that signals completion ends.
    pub fn with_completion_signal(mut self, signal: impl CompletionSignal + 'static) -> Self {
        self.signal = Some(Box::new(signal));
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn mode(&self) -> TimerMode {
        self.plan.mode
    }

    pub fn plan(&self) -> &PhasePlan {
        &self.plan
    }

    pub fn phase_index(&self) -> usize {
        self.phase_index
    }

    pub fn current_phase(&self) -> Option<&Phase> {
        self.plan.phases.get(self.phase_index)
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Units a full run takes.
    pub fn total_units(&self) -> u64 {
        self.plan.total_secs()
    }

    /// Units left until completion across all phases.
    pub fn remaining_total_secs(&self) -> u64 {
        let later: u64 = self
            .plan
            .phases
            .iter()
            .skip(self.phase_index + 1)
            .map(|p| p.duration_secs)
            .sum();
        match self.state {
            TimerState::Completed => 0,
            _ => self.remaining_secs + later,
        }
    }

    /// 0.0 .. 100.0 progress across the whole exercise.
    pub fn progress_pct(&self) -> f64 {
        let total = self.total_units();
        if total == 0 {
            return if self.state == TimerState::Completed { 100.0 } else { 0.0 };
        }
        let done = total - self.remaining_total_secs().min(total);
        (done as f64 / total as f64 * 100.0).min(100.0)
    }

    pub fn handle(&self) -> Option<&TickHandle> {
        self.handle.as_ref()
    }

    /// Liveness view for a host scheduler; `None` when no tick source is armed.
    pub fn watcher(&self) -> Option<TickWatcher> {
        self.handle.as_ref().map(TickHandle::watcher)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        let phase = self.current_phase();
        Event::StateSnapshot {
            mode: self.mode(),
            state: self.state,
            phase_index: self.phase_index,
            phase: phase.map(|p| p.kind),
            label: phase.map(|p| p.label.clone()).unwrap_or_default(),
            remaining_secs: self.remaining_secs,
            phase_total_secs: phase.map(|p| p.duration_secs).unwrap_or(0),
            progress_pct: self.progress_pct(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin (or restart) the exercise from its first phase.
    pub fn start(&mut self) -> Event {
        self.cancel_handle();
        self.rewind();
        self.handle = Some(TickHandle::arm());
        self.state = TimerState::Running;
        tracing::debug!(mode = ?self.mode(), total = self.total_units(), "timer started");

        // Nothing to count down.
        if self.plan.phases.is_empty() {
            return self.complete();
        }

        let phase = &self.plan.phases[0];
        Event::TimerStarted {
            mode: self.plan.mode,
            phase_index: self.phase_index,
            phase: phase.kind,
            label: phase.label.clone(),
            duration_secs: phase.duration_secs,
            total_secs: self.plan.total_secs(),
            at: Utc::now(),
        }
    }

    /// Cancel the active tick source. No-op unless running.
    pub fn stop(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.cancel_handle();
        self.state = TimerState::Idle;
        tracing::debug!(mode = ?self.mode(), remaining = self.remaining_secs, "timer stopped");
        Some(Event::TimerStopped {
            mode: self.plan.mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Stop and return every counter to its initial value.
    pub fn reset(&mut self) -> Event {
        self.cancel_handle();
        self.rewind();
        self.state = TimerState::Idle;
        Event::TimerReset {
            mode: self.plan.mode,
            at: Utc::now(),
        }
    }

    /// Start when idle or completed, stop when running.
    pub fn toggle(&mut self) -> Event {
        match self.stop() {
            Some(event) => event,
            None => self.start(),
        }
    }

    /// Deliver one timer unit. Returns `Some(Event)` when a phase ends.
    ///
    /// Ignored unless running with a live tick handle.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        if !self.handle.as_ref().is_some_and(TickHandle::is_active) {
            return None;
        }

        self.ticks += 1;
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }

        if self.phase_index + 1 < self.plan.phases.len() {
            self.phase_index += 1;
            let phase = &self.plan.phases[self.phase_index];
            self.remaining_secs = phase.duration_secs;
            return Some(Event::PhaseAdvanced {
                mode: self.plan.mode,
                phase_index: self.phase_index,
                phase: phase.kind,
                label: phase.label.clone(),
                duration_secs: phase.duration_secs,
                cycle: phase.cycle,
                at: Utc::now(),
            });
        }

        Some(self.complete())
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete(&mut self) -> Event {
        self.cancel_handle();
        self.state = TimerState::Completed;
        self.remaining_secs = 0;
        tracing::debug!(mode = ?self.mode(), ticks = self.ticks, "timer completed");

        if self.plan.mode.signals_completion() {
            if let Some(signal) = &self.signal {
                signal.signal();
            }
        }

        Event::TimerCompleted {
            mode: self.plan.mode,
            ticks: self.ticks,
            at: Utc::now(),
        }
    }

    fn cancel_handle(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.cancel();
        }
    }

    fn rewind(&mut self) {
        self.phase_index = 0;
        self.ticks = 0;
        self.remaining_secs = self
            .plan
            .phases
            .first()
            .map(|p| p.duration_secs)
            .unwrap_or(0);
    }
}

impl fmt::Debug for PhaseTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhaseTimer")
            .field("plan", &self.plan)
            .field("state", &self.state)
            .field("phase_index", &self.phase_index)
            .field("remaining_secs", &self.remaining_secs)
            .field("ticks", &self.ticks)
            .field("handle", &self.handle)
            .field("has_signal", &self.signal.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::{PhaseKind, DEFAULT_BODY_PARTS};
    use std::cell::Cell;
    use std::rc::Rc;

    fn run_to_end(timer: &mut PhaseTimer) -> Vec<Event> {
        let mut events = Vec::new();
        while timer.is_running() {
            if let Some(event) = timer.tick() {
                events.push(event);
            }
        }
        events
    }

    #[test]
    fn start_stop_reset() {
        let mut timer = PhaseTimer::erp(60);
        assert_eq!(timer.state(), TimerState::Idle);

        timer.start();
        assert_eq!(timer.state(), TimerState::Running);
        timer.tick();
        timer.tick();

        assert!(timer.stop().is_some());
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.remaining_secs(), 58);
        assert!(timer.handle().is_none());

        timer.reset();
        assert_eq!(timer.remaining_secs(), 60);
        assert_eq!(timer.ticks(), 0);
    }

    #[test]
    fn stop_when_idle_is_noop() {
        let mut timer = PhaseTimer::erp(60);
        assert!(timer.stop().is_none());
        assert!(timer.stop().is_none());
        assert_eq!(timer.state(), TimerState::Idle);
    }

    #[test]
    fn erp_300_ticks_exactly_300_times() {
        let mut timer = PhaseTimer::erp(300);
        timer.start();
        let events = run_to_end(&mut timer);

        assert_eq!(timer.ticks(), 300);
        assert_eq!(timer.remaining_secs(), 0);
        assert_eq!(timer.state(), TimerState::Completed);
        assert_eq!(events.len(), 1);
        assert!(events[0].is_completion());
    }

    #[test]
    fn ticks_after_completion_are_ignored() {
        let mut timer = PhaseTimer::erp(2);
        timer.start();
        run_to_end(&mut timer);
        assert!(timer.tick().is_none());
        assert_eq!(timer.ticks(), 2);
        assert_eq!(timer.remaining_secs(), 0);
    }

    #[test]
    fn ticks_while_idle_are_ignored() {
        let mut timer = PhaseTimer::erp(10);
        assert!(timer.tick().is_none());
        assert_eq!(timer.remaining_secs(), 10);
    }

    #[test]
    fn breathing_runs_61_ticks_and_signals_once() {
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        let mut timer = PhaseTimer::breathing(1, 5, 6)
            .with_completion_signal(move || counter.set(counter.get() + 1));

        timer.start();
        assert_eq!(timer.current_phase().unwrap().kind, PhaseKind::GetReady);
        let events = run_to_end(&mut timer);

        assert_eq!(timer.ticks(), 61);
        assert_eq!(fired.get(), 1);
        // 12 inhale/exhale transitions then completion.
        assert_eq!(events.len(), 13);
        let inhales = events
            .iter()
            .filter(|e| matches!(e, Event::PhaseAdvanced { phase: PhaseKind::Inhale, .. }))
            .count();
        assert_eq!(inhales, 6);
    }

    #[test]
    fn breathing_first_inhale_after_lead_in() {
        let mut timer = PhaseTimer::breathing(1, 5, 6);
        timer.start();
        match timer.tick() {
            Some(Event::PhaseAdvanced { phase, cycle, .. }) => {
                assert_eq!(phase, PhaseKind::Inhale);
                assert_eq!(cycle, Some(1));
            }
            other => panic!("Expected PhaseAdvanced, got {other:?}"),
        }
        assert_eq!(timer.remaining_secs(), 5);
    }

    #[test]
    fn erp_and_body_scan_do_not_signal() {
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        let mut timer = PhaseTimer::body_scan(&DEFAULT_BODY_PARTS, 10)
            .with_completion_signal(move || counter.set(counter.get() + 1));
        timer.start();
        run_to_end(&mut timer);
        assert_eq!(timer.ticks(), 60);
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn body_scan_advances_through_parts() {
        let mut timer = PhaseTimer::body_scan(&DEFAULT_BODY_PARTS, 10);
        timer.start();
        let events = run_to_end(&mut timer);

        let labels: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                Event::PhaseAdvanced { label, .. } => Some(label.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, &DEFAULT_BODY_PARTS[1..]);
        assert!(events.last().unwrap().is_completion());
    }

    #[test]
    fn restart_cancels_previous_handle() {
        let mut timer = PhaseTimer::erp(60);
        timer.start();
        let first = timer.watcher().unwrap();
        timer.tick();

        timer.start();
        let second = timer.watcher().unwrap();
        assert!(!first.is_active());
        assert!(second.is_active());
        assert_ne!(first.id(), second.id());
        assert_eq!(timer.remaining_secs(), 60);
    }

    #[test]
    fn completion_releases_handle() {
        let mut timer = PhaseTimer::erp(1);
        timer.start();
        let watcher = timer.watcher().unwrap();
        timer.tick();
        assert!(!watcher.is_active());
        assert!(timer.handle().is_none());
    }

    #[test]
    fn toggle_alternates_start_and_stop() {
        let mut timer = PhaseTimer::erp(60);
        assert!(matches!(timer.toggle(), Event::TimerStarted { .. }));
        assert!(matches!(timer.toggle(), Event::TimerStopped { .. }));
        assert!(matches!(timer.toggle(), Event::TimerStarted { .. }));
        assert_eq!(timer.remaining_secs(), 60);
    }

    #[test]
    fn empty_plan_completes_on_start() {
        let mut timer = PhaseTimer::erp(0);
        assert!(timer.start().is_completion());
        assert_eq!(timer.state(), TimerState::Completed);
        assert_eq!(timer.progress_pct(), 100.0);
    }

    #[test]
    fn progress_tracks_whole_exercise() {
        let mut timer = PhaseTimer::body_scan(&DEFAULT_BODY_PARTS, 10);
        timer.start();
        for _ in 0..30 {
            timer.tick();
        }
        assert_eq!(timer.remaining_total_secs(), 30);
        assert!((timer.progress_pct() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn snapshot_returns_valid_event() {
        let timer = PhaseTimer::erp(300);
        match timer.snapshot() {
            Event::StateSnapshot {
                state,
                phase_index,
                remaining_secs,
                ..
            } => {
                assert_eq!(state, TimerState::Idle);
                assert_eq!(phase_index, 0);
                assert_eq!(remaining_secs, 300);
            }
            other => panic!("Expected StateSnapshot, got {other:?}"),
        }
    }
}
