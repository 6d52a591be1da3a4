use serde::{Deserialize, Serialize};

/// Body parts visited by the default body scan, in order.
pub const DEFAULT_BODY_PARTS: [&str; 6] = ["Head", "Shoulders", "Arms", "Chest", "Stomach", "Legs"];

/// Which exercise a timer is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerMode {
    Erp,
    Breathing,
    BodyScan,
}

impl TimerMode {
    /// Whether finishing this exercise fires the completion signal.
    pub fn signals_completion(self) -> bool {
        matches!(self, TimerMode::Breathing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    GetReady,
    Inhale,
    Exhale,
    BodyPart,
    Exposure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub kind: PhaseKind,
    /// Duration in timer units (seconds at the default tick interval).
    pub duration_secs: u64,
    pub label: String,
    /// 1-based breathing cycle this phase belongs to.
    #[serde(default)]
    pub cycle: Option<u32>,
}

impl Phase {
    fn new(kind: PhaseKind, duration_secs: u64, label: impl Into<String>) -> Self {
        Self {
            kind,
            duration_secs,
            label: label.into(),
            cycle: None,
        }
    }
}

/// Ordered phases an exercise walks through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhasePlan {
    pub mode: TimerMode,
    pub phases: Vec<Phase>,
}

impl PhasePlan {
    /// Zero-length phases are dropped; a phase must last at least one tick.
    fn new(mode: TimerMode, phases: Vec<Phase>) -> Self {
        Self {
            mode,
            phases: phases.into_iter().filter(|p| p.duration_secs > 0).collect(),
        }
    }

    /// Single countdown used by the ERP exposure timer.
    pub fn erp(duration_secs: u64) -> Self {
        Self::new(
            TimerMode::Erp,
            vec![Phase::new(PhaseKind::Exposure, duration_secs, "Exposure")],
        )
    }

    /// Get-ready lead-in followed by `cycles` inhale/exhale pairs.
    pub fn breathing(lead_in_secs: u64, phase_secs: u64, cycles: u32) -> Self {
        let mut phases = vec![Phase::new(PhaseKind::GetReady, lead_in_secs, "Get Ready")];
        for cycle in 1..=cycles {
            for (kind, label) in [
                (PhaseKind::Inhale, "Breathe In"),
                (PhaseKind::Exhale, "Breathe Out"),
            ] {
                phases.push(Phase {
                    cycle: Some(cycle),
                    ..Phase::new(kind, phase_secs, label)
                });
            }
        }
        Self::new(TimerMode::Breathing, phases)
    }

    /// One hold per body part, in the given order.
    pub fn body_scan<S: AsRef<str>>(parts: &[S], hold_secs: u64) -> Self {
        let phases = parts
            .iter()
            .map(|part| Phase::new(PhaseKind::BodyPart, hold_secs, part.as_ref()))
            .collect();
        Self::new(TimerMode::BodyScan, phases)
    }

    pub fn total_secs(&self) -> u64 {
        self.phases.iter().map(|p| p.duration_secs).sum()
    }

    /// Units completed up to (but not including) `phase_index`.
    pub fn cumulative_secs(&self, phase_index: usize) -> u64 {
        self.phases
            .iter()
            .take(phase_index)
            .map(|p| p.duration_secs)
            .sum()
    }
}
