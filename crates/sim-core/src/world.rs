//! SimWorld engine: owns a population and drives whole-population ticks.
//!
//! The engine is the stand-in for the dashboard's refresh timer: each
//! `step` advances every subject once, records notable changes in an event
//! log, and stamps readings at `origin_ms + tick * tick_interval_ms` so a
//! run replays bit-identically from its config and origin.

use std::collections::BTreeMap;

use contracts::{
    MonitorEvent, MonitorEventKind, PopulationSnapshot, PopulationSummary, RiskLevel, SimConfig,
    Subject, SCHEMA_VERSION_V1,
};
use serde_json::{json, Value};

use crate::rng::{subject_stream_seed, TickRng};
use crate::subject::{advance, generate_population};

#[derive(Debug, Clone)]
pub struct SimWorld {
    config: SimConfig,
    origin_ms: i64,
    current_tick: u64,
    subjects: Vec<Subject>,
    event_log: Vec<MonitorEvent>,
}

impl SimWorld {
    /// Build the initial population from the configured seed, with seeded
    /// histories ending just before `origin_ms`.
    pub fn new(config: SimConfig, origin_ms: i64) -> Self {
        let mut rng = TickRng::new(config.seed);
        let subjects =
            generate_population(usize::from(config.subject_count), origin_ms, &mut rng);
        Self {
            config,
            origin_ms,
            current_tick: 0,
            subjects,
            event_log: Vec::new(),
        }
    }

    /// Advance every subject one tick.
    ///
    /// Each subject draws from its own stream derived from
    /// `(seed, subject_id, tick)`, so processing order carries no meaning
    /// and the outcome is independent of iteration order.
    pub fn step(&mut self) {
        self.current_tick += 1;
        let tick = self.current_tick;
        let now_ms = self.tick_timestamp_ms(tick);
        let mut sequence_in_tick = 0u64;

        for idx in 0..self.subjects.len() {
            let seed = subject_stream_seed(self.config.seed, &self.subjects[idx].id, tick);
            let mut rng = TickRng::new(seed);
            let after = advance(&self.subjects[idx], now_ms, &mut rng);
            let before = std::mem::replace(&mut self.subjects[idx], after);
            let subject_id = before.id;
            let new_risk = self.subjects[idx].risk_level;
            let new_location = self.subjects[idx].location.clone();

            if new_risk != before.risk_level {
                let details = json!({
                    "from": before.risk_level.label(),
                    "to": new_risk.label(),
                });
                self.emit_event(
                    tick,
                    sequence_in_tick,
                    MonitorEventKind::RiskShifted,
                    &subject_id,
                    &new_location,
                    Some(details),
                );
                sequence_in_tick += 1;
            }

            if new_location != before.location {
                let details = json!({
                    "from": before.location,
                    "to": new_location.clone(),
                });
                self.emit_event(
                    tick,
                    sequence_in_tick,
                    MonitorEventKind::SubjectRelocated,
                    &subject_id,
                    &new_location,
                    Some(details),
                );
                sequence_in_tick += 1;
            }
        }
    }

    /// Run `n` ticks back to back.
    pub fn step_n(&mut self, n: u64) {
        for _ in 0..n {
            self.step();
        }
    }

    pub fn current_tick(&self) -> u64 {
        self.current_tick
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn events(&self) -> &[MonitorEvent] {
        &self.event_log
    }

    /// Timestamp stamped on readings produced at the given tick.
    pub fn tick_timestamp_ms(&self, tick: u64) -> i64 {
        self.origin_ms + tick as i64 * self.config.tick_interval_ms as i64
    }

    /// Subjects matching an optional risk filter and a free-text query,
    /// in population order.
    pub fn filter(&self, risk: Option<RiskLevel>, query: &str) -> Vec<&Subject> {
        self.subjects
            .iter()
            .filter(|subject| risk.map_or(true, |level| subject.risk_level == level))
            .filter(|subject| subject.matches_query(query))
            .collect()
    }

    /// Export the full population state at the current tick.
    pub fn snapshot(&self) -> PopulationSnapshot {
        PopulationSnapshot {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            run_id: self.config.run_id.clone(),
            tick: self.current_tick,
            captured_at_ms: self.tick_timestamp_ms(self.current_tick),
            subjects: self.subjects.clone(),
        }
    }

    /// Aggregate counts and mean vitals over the current population.
    pub fn summary(&self) -> PopulationSummary {
        let total = self.subjects.len();
        let mut by_zone: BTreeMap<String, usize> = BTreeMap::new();
        let mut high_count = 0;
        let mut medium_count = 0;
        let mut low_count = 0;
        let mut heart_rate_sum = 0.0;
        let mut stress_sum = 0.0;

        for subject in &self.subjects {
            match subject.risk_level {
                RiskLevel::High => high_count += 1,
                RiskLevel::Medium => medium_count += 1,
                RiskLevel::Low => low_count += 1,
            }
            *by_zone.entry(subject.location.clone()).or_default() += 1;
            heart_rate_sum += subject.heart_rate_bpm;
            stress_sum += subject.stress_level_pct;
        }

        let divisor = if total == 0 { 1.0 } else { total as f64 };
        PopulationSummary {
            total,
            high_count,
            medium_count,
            low_count,
            by_zone,
            mean_heart_rate_bpm: heart_rate_sum / divisor,
            mean_stress_level_pct: stress_sum / divisor,
        }
    }

    /// Deterministic digest of the event log and final population state.
    ///
    /// Two runs with the same config and origin produce the same hash;
    /// comparing hashes replaces diffing full snapshots.
    pub fn replay_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf29ce484222325; // FNV offset basis

        for event in &self.event_log {
            h = fnv1a_fold(h, event.tick);
            h = fnv1a_fold(h, event.sequence_in_tick);
            h = fnv1a_fold_str(h, &format!("{:?}", event.kind));
            h = fnv1a_fold_str(h, &event.subject_id);
            h = fnv1a_fold_str(h, &event.location_id);
            if let Some(details) = &event.details {
                h = fnv1a_fold_str(h, &details.to_string());
            }
        }

        for subject in &self.subjects {
            h = fnv1a_fold_str(h, &subject.id);
            h = fnv1a_fold_str(h, subject.risk_level.label());
            h = fnv1a_fold_str(h, &subject.location);
            h = fnv1a_fold(h, subject.heart_rate_bpm.to_bits());
            h = fnv1a_fold(h, subject.stress_level_pct.to_bits());
            h = fnv1a_fold(h, subject.movement_intensity_pct.to_bits());
            h = fnv1a_fold(h, subject.voice_stress_pct.to_bits());
        }

        h
    }

    fn emit_event(
        &mut self,
        tick: u64,
        sequence_in_tick: u64,
        kind: MonitorEventKind,
        subject_id: &str,
        location_id: &str,
        details: Option<Value>,
    ) {
        self.event_log.push(MonitorEvent {
            event_id: format!("tick-{tick:06}-seq-{sequence_in_tick:03}"),
            tick,
            sequence_in_tick,
            kind,
            subject_id: subject_id.to_string(),
            location_id: location_id.to_string(),
            details,
        });
    }
}

/// Fold a u64 value into a running FNV-1a hash.
fn fnv1a_fold(hash: u64, value: u64) -> u64 {
    let mut h = hash;
    for &b in &value.to_le_bytes() {
        h ^= u64::from(b);
        h = h.wrapping_mul(0x100000001b3);
    }
    h
}

/// Fold a string into a running FNV-1a hash, with a separator byte so
/// adjacent strings cannot collide.
fn fnv1a_fold_str(hash: u64, s: &str) -> u64 {
    let mut h = hash;
    for &b in s.as_bytes() {
        h ^= u64::from(b);
        h = h.wrapping_mul(0x100000001b3);
    }
    h ^= 0xff;
    h.wrapping_mul(0x100000001b3)
}
