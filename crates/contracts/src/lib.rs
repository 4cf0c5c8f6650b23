//! v1 cross-boundary contracts shared by the simulation kernel, the CLI,
//! and any presentation layer consuming its output.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod serde_u64_string;

pub const SCHEMA_VERSION_V1: &str = "1.0";

/// Rolling history cap per subject: 24 hours at 15-minute spacing.
pub const HISTORY_CAP: usize = 96;

/// Spacing between seeded history readings, in milliseconds (15 minutes).
pub const SEED_INTERVAL_MS: i64 = 15 * 60 * 1000;

/// Spacing between standalone chart series points, in milliseconds (1 hour).
pub const SERIES_INTERVAL_MS: i64 = 60 * 60 * 1000;

/// Risk classification of a monitored subject. Severity orders
/// `Low < Medium < High`; the ordering exists for display and sorting only,
/// no simulation rule depends on it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One timestamped snapshot of the four tracked signals. Never mutated
/// after creation; updates append a new reading instead.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BiometricReading {
    pub timestamp_ms: i64,
    pub heart_rate_bpm: f64,
    pub stress_level_pct: f64,
    pub movement_intensity_pct: f64,
    pub voice_stress_pct: f64,
}

/// A monitored subject: stable identity, mutable classification, current
/// vitals duplicated at top level for cheap access, and a bounded rolling
/// reading history (oldest first, at most [`HISTORY_CAP`] entries).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Subject {
    pub id: String,
    pub display_name: String,
    pub risk_level: RiskLevel,
    pub heart_rate_bpm: f64,
    pub stress_level_pct: f64,
    pub movement_intensity_pct: f64,
    pub voice_stress_pct: f64,
    pub location: String,
    pub history: Vec<BiometricReading>,
}

impl Subject {
    /// Most recent reading, if any history exists.
    pub fn latest_reading(&self) -> Option<&BiometricReading> {
        self.history.last()
    }

    /// Case-insensitive substring match over id, display name, and
    /// location. An empty query matches everything.
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.id.to_lowercase().contains(&needle)
            || self.display_name.to_lowercase().contains(&needle)
            || self.location.to_lowercase().contains(&needle)
    }
}

/// Configuration for one simulation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SimConfig {
    pub schema_version: String,
    pub run_id: String,
    #[serde(with = "serde_u64_string")]
    pub seed: u64,
    pub subject_count: u16,
    pub tick_interval_ms: u64,
    pub notes: Option<String>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            run_id: "run_local_001".to_string(),
            seed: 1337,
            subject_count: 15,
            tick_interval_ms: 5_000,
            notes: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MonitorEventKind {
    RiskShifted,
    SubjectRelocated,
}

/// One notable population change observed during a tick. The event log is
/// deterministic for a given config and origin timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonitorEvent {
    pub event_id: String,
    pub tick: u64,
    pub sequence_in_tick: u64,
    pub kind: MonitorEventKind,
    pub subject_id: String,
    pub location_id: String,
    #[serde(default)]
    pub details: Option<Value>,
}

/// Full population state at one tick, for export to a caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PopulationSnapshot {
    pub schema_version: String,
    pub run_id: String,
    pub tick: u64,
    pub captured_at_ms: i64,
    pub subjects: Vec<Subject>,
}

/// Aggregate view of a population: counts by classification and zone plus
/// mean vitals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PopulationSummary {
    pub total: usize,
    pub high_count: usize,
    pub medium_count: usize,
    pub low_count: usize,
    pub by_zone: BTreeMap<String, usize>,
    pub mean_heart_rate_bpm: f64,
    pub mean_stress_level_pct: f64,
}

impl fmt::Display for PopulationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total={} high={} medium={} low={} zones={}",
            self.total,
            self.high_count,
            self.medium_count,
            self.low_count,
            self.by_zone.len()
        )
    }
}
