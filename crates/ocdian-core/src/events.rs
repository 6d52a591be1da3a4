use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{PhaseKind, TimerMode, TimerState};

/// Every timer state change produces an Event.
/// Front-ends render them; the CLI prints them as JSON lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        mode: TimerMode,
        phase_index: usize,
        phase: PhaseKind,
        label: String,
        duration_secs: u64,
        total_secs: u64,
        at: DateTime<Utc>,
    },
    PhaseAdvanced {
        mode: TimerMode,
        phase_index: usize,
        phase: PhaseKind,
        label: String,
        duration_secs: u64,
        cycle: Option<u32>,
        at: DateTime<Utc>,
    },
    TimerStopped {
        mode: TimerMode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        mode: TimerMode,
        at: DateTime<Utc>,
    },
    TimerCompleted {
        mode: TimerMode,
        ticks: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        mode: TimerMode,
        state: TimerState,
        phase_index: usize,
        phase: Option<PhaseKind>,
        label: String,
        remaining_secs: u64,
        phase_total_secs: u64,
        progress_pct: f64,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn is_completion(&self) -> bool {
        matches!(self, Event::TimerCompleted { .. })
    }
}
