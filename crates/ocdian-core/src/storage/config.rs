//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Tick interval for the exercise timers
//! - Breathing and body-scan exercise shapes
//! - Default ERP exposure duration
//! - Mood history retention
//! - Completion signal (haptic / bell) preference
//!
//! Configuration is stored at `~/.config/ocdian/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::erp::ErpDuration;
use crate::error::{ConfigError, Result};
use crate::timer::{PhaseTimer, DEFAULT_BODY_PARTS};

/// Tick source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Wall-clock length of one timer unit.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

/// Breathing exercise shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreathingConfig {
    #[serde(default = "default_breathing_cycles")]
    pub cycles: u32,
    #[serde(default = "default_breathing_phase_secs")]
    pub phase_secs: u64,
    #[serde(default = "default_lead_in_secs")]
    pub lead_in_secs: u64,
}

/// Body-scan exercise shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyScanConfig {
    #[serde(default = "default_hold_secs")]
    pub hold_secs: u64,
    #[serde(default = "default_body_parts")]
    pub parts: Vec<String>,
}

/// ERP timer defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErpConfig {
    #[serde(default = "default_erp_duration_secs")]
    pub default_duration_secs: u64,
}

/// Mood history settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodConfig {
    /// Keep mood check-ins across runs. Off by default: history lives only
    /// as long as the process.
    #[serde(default)]
    pub persist_history: bool,
    #[serde(default = "default_recent_window")]
    pub recent_window: usize,
}

/// Completion signal configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub haptics: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/ocdian/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub breathing: BreathingConfig,
    #[serde(default)]
    pub body_scan: BodyScanConfig,
    #[serde(default)]
    pub erp: ErpConfig,
    #[serde(default)]
    pub mood: MoodConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

fn default_tick_interval_ms() -> u64 {
    1000
}
fn default_breathing_cycles() -> u32 {
    6
}
fn default_breathing_phase_secs() -> u64 {
    5
}
fn default_lead_in_secs() -> u64 {
    1
}
fn default_hold_secs() -> u64 {
    10
}
fn default_body_parts() -> Vec<String> {
    DEFAULT_BODY_PARTS.iter().map(|p| p.to_string()).collect()
}
fn default_erp_duration_secs() -> u64 {
    60
}
fn default_recent_window() -> usize {
    7
}
fn default_true() -> bool {
    true
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

impl Default for BreathingConfig {
    fn default() -> Self {
        Self {
            cycles: default_breathing_cycles(),
            phase_secs: default_breathing_phase_secs(),
            lead_in_secs: default_lead_in_secs(),
        }
    }
}

impl Default for BodyScanConfig {
    fn default() -> Self {
        Self {
            hold_secs: default_hold_secs(),
            parts: default_body_parts(),
        }
    }
}

impl Default for ErpConfig {
    fn default() -> Self {
        Self {
            default_duration_secs: default_erp_duration_secs(),
        }
    }
}

impl Default for MoodConfig {
    fn default() -> Self {
        Self {
            persist_history: false,
            recent_window: default_recent_window(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self { haptics: true }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Array(_) => serde_json::Value::Array(
                        value
                            .split(',')
                            .map(str::trim)
                            .filter(|s| !s.is_empty())
                            .map(|s| serde_json::Value::String(s.to_string()))
                            .collect(),
                    ),
                    serde_json::Value::Object(_) => return Err(unknown()),
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults when the file is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(ConfigError::from)?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not read config");
                Err(e.into())
            }
        }
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default configuration");
            Self::default()
        })
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Array(items) => Some(
                items
                    .iter()
                    .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving. List values are given
    /// comma-separated.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not parse or
    /// validate. On error `self` is left unchanged.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json)?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and persist.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.apply(key, value)?;
        self.save()
    }

    /// Reject shapes the exercise timers cannot run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key: &str, message: &str| ConfigError::InvalidValue {
            key: key.to_string(),
            message: message.to_string(),
        };

        if self.timer.tick_interval_ms == 0 {
            return Err(invalid("timer.tick_interval_ms", "must be at least 1"));
        }
        if self.breathing.cycles == 0 {
            return Err(invalid("breathing.cycles", "must be at least 1"));
        }
        if self.breathing.phase_secs == 0 {
            return Err(invalid("breathing.phase_secs", "must be at least 1"));
        }
        if self.body_scan.hold_secs == 0 {
            return Err(invalid("body_scan.hold_secs", "must be at least 1"));
        }
        if self.body_scan.parts.is_empty() {
            return Err(invalid("body_scan.parts", "must name at least one body part"));
        }
        if ErpDuration::from_secs(self.erp.default_duration_secs).is_err() {
            return Err(invalid("erp.default_duration_secs", "must be 60, 300 or 600"));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timer.tick_interval_ms)
    }

    /// Breathing timer shaped by this config.
    pub fn breathing_timer(&self) -> PhaseTimer {
        PhaseTimer::breathing(
            self.breathing.lead_in_secs,
            self.breathing.phase_secs,
            self.breathing.cycles,
        )
    }

    /// Body-scan timer shaped by this config.
    pub fn body_scan_timer(&self) -> PhaseTimer {
        PhaseTimer::body_scan(&self.body_scan.parts, self.body_scan.hold_secs)
    }
}
