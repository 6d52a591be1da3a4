use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Contextual cause tagged on a mood check-in. Declaration order is the
/// catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Trigger {
    Stress,
    Social,
    Health,
    Work,
    Family,
    Environment,
}

impl Trigger {
    pub const ALL: [Trigger; 6] = [
        Trigger::Stress,
        Trigger::Social,
        Trigger::Health,
        Trigger::Work,
        Trigger::Family,
        Trigger::Environment,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Trigger::Stress => "Stress",
            Trigger::Social => "Social",
            Trigger::Health => "Health",
            Trigger::Work => "Work",
            Trigger::Family => "Family",
            Trigger::Environment => "Environment",
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Trigger {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Trigger::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::UnknownName {
                catalog: "trigger",
                name: wanted.to_string(),
            })
    }
}

/// Self-rated mood, always within 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MoodScore(u8);

impl MoodScore {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::OutOfRange {
                field: "mood score",
                min: Self::MIN,
                max: Self::MAX,
                value: value.into(),
            })
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for MoodScore {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MoodScore> for u8 {
    fn from(score: MoodScore) -> Self {
        score.0
    }
}

/// One mood check-in. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub mood_score: MoodScore,
    pub triggers: BTreeSet<Trigger>,
    pub note: String,
}

impl MoodRecord {
    pub fn new(mood_score: MoodScore, triggers: BTreeSet<Trigger>, note: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            mood_score,
            triggers,
            note: note.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_bounds() {
        assert!(MoodScore::new(0).is_err());
        assert_eq!(MoodScore::new(1).unwrap().value(), 1);
        assert_eq!(MoodScore::new(5).unwrap().value(), 5);
        assert!(MoodScore::new(6).is_err());
    }

    #[test]
    fn score_deserialization_is_validated() {
        assert!(serde_json::from_str::<MoodScore>("3").is_ok());
        assert!(serde_json::from_str::<MoodScore>("9").is_err());
    }

    #[test]
    fn trigger_parse_ignores_case() {
        assert_eq!("stress".parse::<Trigger>().unwrap(), Trigger::Stress);
        assert_eq!(" ENVIRONMENT ".parse::<Trigger>().unwrap(), Trigger::Environment);
        assert!("weather".parse::<Trigger>().is_err());
    }

    #[test]
    fn catalog_order_is_declaration_order() {
        let mut sorted = Trigger::ALL;
        sorted.sort();
        assert_eq!(sorted, Trigger::ALL);
        assert_eq!(Trigger::ALL[0].to_string(), "Stress");
    }
}
