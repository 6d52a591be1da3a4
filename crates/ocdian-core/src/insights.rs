//! Insights over the mood history.
//!
//! Everything here is recomputed from the current history on demand; nothing
//! is cached.

use serde::{Deserialize, Serialize};

use crate::mood::{MoodRecord, Trigger};

/// Records shown in the recent-mood chart by default.
pub const DEFAULT_RECENT_WINDOW: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerCount {
    pub trigger: Trigger,
    pub count: usize,
}

/// Trigger frequencies, most frequent first.
///
/// Triggers with equal counts keep the order in which they were first seen
/// while walking the history oldest to newest.
pub fn most_common_triggers(history: &[MoodRecord]) -> Vec<TriggerCount> {
    let mut counts: Vec<TriggerCount> = Vec::new();
    for trigger in history.iter().flat_map(|r| r.triggers.iter().copied()) {
        match counts.iter_mut().find(|c| c.trigger == trigger) {
            Some(c) => c.count += 1,
            None => counts.push(TriggerCount { trigger, count: 1 }),
        }
    }
    // Stable: ties stay in discovery order.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// The last `n` records, oldest first. Fewer than `n` records returns all.
pub fn recent_mood_series(history: &[MoodRecord], n: usize) -> &[MoodRecord] {
    &history[history.len().saturating_sub(n)..]
}

/// Mean mood score, or `None` for an empty history.
pub fn average_mood(history: &[MoodRecord]) -> Option<f64> {
    if history.is_empty() {
        return None;
    }
    let total: u32 = history.iter().map(|r| u32::from(r.mood_score.value())).sum();
    Some(f64::from(total) / history.len() as f64)
}

/// One point of the recent-mood chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodPoint {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub mood_score: u8,
}

/// Everything the insights view renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsReport {
    pub total_checkins: usize,
    pub average_mood: Option<f64>,
    pub most_common_triggers: Vec<TriggerCount>,
    pub recent_moods: Vec<MoodPoint>,
}

impl InsightsReport {
    pub fn build(history: &[MoodRecord], recent_window: usize) -> Self {
        Self {
            total_checkins: history.len(),
            average_mood: average_mood(history),
            most_common_triggers: most_common_triggers(history),
            recent_moods: recent_mood_series(history, recent_window)
                .iter()
                .map(|r| MoodPoint {
                    timestamp: r.timestamp,
                    mood_score: r.mood_score.value(),
                })
                .collect(),
        }
    }
}
