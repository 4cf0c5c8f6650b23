//! Risk envelopes: the statistical bounds a subject's vitals obey under a
//! given classification, plus the intake and transition rules.
//!
//! All numbers here are normative for the simulation; nothing else in the
//! kernel hard-codes a bound or probability.

use contracts::RiskLevel;

use crate::rng::RandomSource;

/// Per-tick probability that a HIGH-risk subject steps down to MEDIUM.
const HIGH_STEP_DOWN_CHANCE: f64 = 0.05;

/// Per-tick probability that a MEDIUM-risk subject shifts at all; of those
/// shifts, [`MEDIUM_SHIFT_DOWN_WEIGHT`] go to LOW and the rest to HIGH.
const MEDIUM_SHIFT_CHANCE: f64 = 0.03;
const MEDIUM_SHIFT_DOWN_WEIGHT: f64 = 0.7;

/// Per-tick probability that a LOW-risk subject steps up to MEDIUM.
const LOW_STEP_UP_CHANCE: f64 = 0.02;

/// One field's walk parameters: per-tick spread and closed clamp bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldWalk {
    pub spread: f64,
    pub floor: f64,
    pub ceil: f64,
}

impl FieldWalk {
    /// One bounded random-walk step from `value`: a centered draw of width
    /// `spread`, clamped into `[floor, ceil]`.
    pub fn step<R: RandomSource>(&self, value: f64, rng: &mut R) -> f64 {
        (value + (rng.next_f64() * self.spread - self.spread / 2.0)).clamp(self.floor, self.ceil)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.floor && value <= self.ceil
    }
}

/// One field's intake sampling range `[base, base + span)`, drawn
/// integer-valued.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntakeRange {
    pub base: f64,
    pub span: f64,
}

impl IntakeRange {
    pub fn sample<R: RandomSource>(&self, rng: &mut R) -> f64 {
        rng.uniform_step(self.base, self.span)
    }
}

/// Walk envelope for the four tracked vitals under one classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskEnvelope {
    pub heart_rate: FieldWalk,
    pub stress: FieldWalk,
    pub movement: FieldWalk,
    pub voice_stress: FieldWalk,
    /// Per-tick probability of moving to a freshly drawn zone (which may
    /// be the current one).
    pub relocation_chance: f64,
}

/// Intake sampling ranges for the four vitals under one classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntakeProfile {
    pub heart_rate: IntakeRange,
    pub stress: IntakeRange,
    pub movement: IntakeRange,
    pub voice_stress: IntakeRange,
}

const HIGH_ENVELOPE: RiskEnvelope = RiskEnvelope {
    heart_rate: FieldWalk { spread: 10.0, floor: 60.0, ceil: 130.0 },
    stress: FieldWalk { spread: 14.0, floor: 50.0, ceil: 100.0 },
    movement: FieldWalk { spread: 16.0, floor: 30.0, ceil: 100.0 },
    voice_stress: FieldWalk { spread: 12.0, floor: 40.0, ceil: 100.0 },
    relocation_chance: 0.10,
};

const MEDIUM_ENVELOPE: RiskEnvelope = RiskEnvelope {
    heart_rate: FieldWalk { spread: 8.0, floor: 60.0, ceil: 110.0 },
    stress: FieldWalk { spread: 10.0, floor: 30.0, ceil: 80.0 },
    movement: FieldWalk { spread: 12.0, floor: 20.0, ceil: 80.0 },
    voice_stress: FieldWalk { spread: 10.0, floor: 30.0, ceil: 80.0 },
    relocation_chance: 0.08,
};

const LOW_ENVELOPE: RiskEnvelope = RiskEnvelope {
    heart_rate: FieldWalk { spread: 6.0, floor: 55.0, ceil: 90.0 },
    stress: FieldWalk { spread: 8.0, floor: 10.0, ceil: 60.0 },
    movement: FieldWalk { spread: 10.0, floor: 10.0, ceil: 60.0 },
    voice_stress: FieldWalk { spread: 8.0, floor: 10.0, ceil: 60.0 },
    relocation_chance: 0.05,
};

const HIGH_INTAKE: IntakeProfile = IntakeProfile {
    heart_rate: IntakeRange { base: 90.0, span: 30.0 },
    stress: IntakeRange { base: 70.0, span: 30.0 },
    movement: IntakeRange { base: 60.0, span: 40.0 },
    voice_stress: IntakeRange { base: 70.0, span: 30.0 },
};

const MEDIUM_INTAKE: IntakeProfile = IntakeProfile {
    heart_rate: IntakeRange { base: 75.0, span: 20.0 },
    stress: IntakeRange { base: 50.0, span: 20.0 },
    movement: IntakeRange { base: 40.0, span: 30.0 },
    voice_stress: IntakeRange { base: 50.0, span: 20.0 },
};

const LOW_INTAKE: IntakeProfile = IntakeProfile {
    heart_rate: IntakeRange { base: 60.0, span: 25.0 },
    stress: IntakeRange { base: 20.0, span: 30.0 },
    movement: IntakeRange { base: 20.0, span: 30.0 },
    voice_stress: IntakeRange { base: 20.0, span: 30.0 },
};

/// Walk envelope for the given classification.
pub fn walk_envelope(level: RiskLevel) -> &'static RiskEnvelope {
    match level {
        RiskLevel::High => &HIGH_ENVELOPE,
        RiskLevel::Medium => &MEDIUM_ENVELOPE,
        RiskLevel::Low => &LOW_ENVELOPE,
    }
}

/// Intake sampling profile for the given classification.
pub fn intake_profile(level: RiskLevel) -> &'static IntakeProfile {
    match level {
        RiskLevel::High => &HIGH_INTAKE,
        RiskLevel::Medium => &MEDIUM_INTAKE,
        RiskLevel::Low => &LOW_INTAKE,
    }
}

/// Weighted intake classification from a single uniform draw:
/// 40% LOW, 30% MEDIUM, 30% HIGH.
pub fn classify_intake(roll: f64) -> RiskLevel {
    if roll < 0.4 {
        RiskLevel::Low
    } else if roll < 0.7 {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

/// Occasional reclassification, evaluated at the end of a tick so the
/// tick's walk and relocation still ran under the entering level.
pub fn transition_risk<R: RandomSource>(level: RiskLevel, rng: &mut R) -> RiskLevel {
    match level {
        RiskLevel::High => {
            if rng.chance(HIGH_STEP_DOWN_CHANCE) {
                RiskLevel::Medium
            } else {
                RiskLevel::High
            }
        }
        RiskLevel::Medium => {
            if rng.chance(MEDIUM_SHIFT_CHANCE) {
                if rng.next_f64() < MEDIUM_SHIFT_DOWN_WEIGHT {
                    RiskLevel::Low
                } else {
                    RiskLevel::High
                }
            } else {
                RiskLevel::Medium
            }
        }
        RiskLevel::Low => {
            if rng.chance(LOW_STEP_UP_CHANCE) {
                RiskLevel::Medium
            } else {
                RiskLevel::Low
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::TickRng;

    #[test]
    fn classify_intake_honors_thresholds() {
        assert_eq!(classify_intake(0.0), RiskLevel::Low);
        assert_eq!(classify_intake(0.1), RiskLevel::Low);
        assert_eq!(classify_intake(0.4), RiskLevel::Medium);
        assert_eq!(classify_intake(0.5), RiskLevel::Medium);
        assert_eq!(classify_intake(0.7), RiskLevel::High);
        assert_eq!(classify_intake(0.9), RiskLevel::High);
    }

    #[test]
    fn walk_step_never_leaves_clamp_bounds() {
        let mut rng = TickRng::new(11);
        let walk = walk_envelope(RiskLevel::High).heart_rate;
        let mut value = 120.0;
        for _ in 0..10_000 {
            value = walk.step(value, &mut rng);
            assert!(walk.contains(value), "escaped bounds: {value}");
        }
    }

    #[test]
    fn walk_step_clamps_from_outside_bounds() {
        let mut rng = TickRng::new(3);
        let walk = walk_envelope(RiskLevel::Low).heart_rate;
        // A value far above the ceiling comes back inside in one step.
        let value = walk.step(500.0, &mut rng);
        assert!(walk.contains(value));
    }

    #[test]
    fn intake_samples_fall_in_documented_ranges() {
        let mut rng = TickRng::new(21);
        let profile = intake_profile(RiskLevel::Medium);
        for _ in 0..1_000 {
            let hr = profile.heart_rate.sample(&mut rng);
            assert!((75.0..95.0).contains(&hr));
            let stress = profile.stress.sample(&mut rng);
            assert!((50.0..70.0).contains(&stress));
        }
    }

    #[test]
    fn transition_risk_only_reaches_adjacent_or_declared_levels() {
        let mut rng = TickRng::new(8);
        for _ in 0..5_000 {
            // HIGH never jumps straight to LOW.
            assert_ne!(transition_risk(RiskLevel::High, &mut rng), RiskLevel::Low);
            // LOW never jumps straight to HIGH.
            assert_ne!(transition_risk(RiskLevel::Low, &mut rng), RiskLevel::High);
        }
    }
}
