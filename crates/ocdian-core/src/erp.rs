//! Exposure and Response Prevention sessions.
//!
//! A session pairs an exposure challenge with a timed exposure and the
//! user's anxiety rating before and after.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::timer::PhaseTimer;

/// Exposure lengths offered by the ERP timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErpDuration {
    OneMinute,
    FiveMinutes,
    TenMinutes,
}

impl ErpDuration {
    pub const ALL: [ErpDuration; 3] = [
        ErpDuration::OneMinute,
        ErpDuration::FiveMinutes,
        ErpDuration::TenMinutes,
    ];

    pub fn secs(self) -> u64 {
        match self {
            ErpDuration::OneMinute => 60,
            ErpDuration::FiveMinutes => 300,
            ErpDuration::TenMinutes => 600,
        }
    }

    pub fn from_secs(secs: u64) -> Result<Self, ValidationError> {
        Self::ALL
            .into_iter()
            .find(|d| d.secs() == secs)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "erp duration".into(),
                message: format!("{secs}s is not one of 60, 300, 600"),
            })
    }

    pub fn label(self) -> &'static str {
        match self {
            ErpDuration::OneMinute => "1 min",
            ErpDuration::FiveMinutes => "5 min",
            ErpDuration::TenMinutes => "10 min",
        }
    }
}

impl fmt::Display for ErpDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Self-rated anxiety, always within 1..=10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct AnxietyLevel(u8);

impl AnxietyLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::OutOfRange {
                field: "anxiety level",
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

impl Default for AnxietyLevel {
    fn default() -> Self {
        Self(5)
    }
}

impl TryFrom<u8> for AnxietyLevel {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AnxietyLevel> for u8 {
    fn from(level: AnxietyLevel) -> Self {
        level.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExposureSession {
    pub challenge: String,
    pub duration: ErpDuration,
    pub anxiety_before: AnxietyLevel,
    pub anxiety_after: Option<AnxietyLevel>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl ExposureSession {
    pub fn new(challenge: impl Into<String>, duration: ErpDuration, anxiety_before: AnxietyLevel) -> Self {
        Self {
            challenge: challenge.into().trim().to_string(),
            duration,
            anxiety_before,
            anxiety_after: None,
            started_at: Utc::now(),
            completed_at: None,
        }
    }

    /// A fresh ERP countdown for this session's duration.
    pub fn timer(&self) -> PhaseTimer {
        PhaseTimer::erp(self.duration.secs())
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Record the post-exposure rating.
    pub fn complete(&mut self, anxiety_after: AnxietyLevel) {
        self.anxiety_after = Some(anxiety_after);
        self.completed_at = Some(Utc::now());
    }

    /// `after - before`; negative means anxiety dropped.
    pub fn anxiety_change(&self) -> Option<i16> {
        self.anxiety_after
            .map(|after| i16::from(after.value()) - i16::from(self.anxiety_before.value()))
    }
}
