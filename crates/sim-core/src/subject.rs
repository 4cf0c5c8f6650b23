//! Subject fabrication and per-tick advancement.
//!
//! Both operations are value-in/value-out: `advance` never mutates its
//! argument, and neither touches anything outside the supplied random
//! source.

use contracts::{BiometricReading, Subject, HISTORY_CAP};

use crate::catalog::{FIRST_NAMES, LAST_NAMES, ZONES};
use crate::envelope::{classify_intake, intake_profile, transition_risk, walk_envelope};
use crate::history::{push_reading, seed_history};
use crate::rng::RandomSource;

/// Numeric id of the first subject in a batch: ids run `INM-1000` upward.
const ID_SEQUENCE_BASE: usize = 1000;

/// Fabricate exactly `count` subjects with sequential ids, weighted risk
/// classification, risk-scaled intake vitals, and a full seeded history.
pub fn generate_population<R: RandomSource>(
    count: usize,
    now_ms: i64,
    rng: &mut R,
) -> Vec<Subject> {
    (0..count).map(|i| fabricate_subject(i, now_ms, rng)).collect()
}

fn fabricate_subject<R: RandomSource>(index: usize, now_ms: i64, rng: &mut R) -> Subject {
    let id = format!("INM-{}", ID_SEQUENCE_BASE + index);
    let risk_level = classify_intake(rng.next_f64());

    // Seeded history is intentionally not scaled by the drawn risk level;
    // only live ticks are.
    let history = seed_history(HISTORY_CAP, now_ms, rng);

    let intake = intake_profile(risk_level);
    let heart_rate_bpm = intake.heart_rate.sample(rng);
    let stress_level_pct = intake.stress.sample(rng);
    let movement_intensity_pct = intake.movement.sample(rng);
    let voice_stress_pct = intake.voice_stress.sample(rng);

    let display_name = format!("{} {}", rng.pick(&FIRST_NAMES), rng.pick(&LAST_NAMES));
    let location = rng.pick(&ZONES).to_string();

    Subject {
        id,
        display_name,
        risk_level,
        heart_rate_bpm,
        stress_level_pct,
        movement_intensity_pct,
        voice_stress_pct,
        location,
        history,
    }
}

/// Advance a subject by one tick and return the updated value.
///
/// The vitals walk and the relocation draw both use the envelope the
/// subject entered the tick with; reclassification is evaluated last and
/// only affects the stored level going forward. The reading appended to
/// history carries the post-walk vitals stamped at `now_ms`.
pub fn advance<R: RandomSource>(subject: &Subject, now_ms: i64, rng: &mut R) -> Subject {
    let env = walk_envelope(subject.risk_level);

    let heart_rate_bpm = env.heart_rate.step(subject.heart_rate_bpm, rng);
    let stress_level_pct = env.stress.step(subject.stress_level_pct, rng);
    let movement_intensity_pct = env.movement.step(subject.movement_intensity_pct, rng);
    let voice_stress_pct = env.voice_stress.step(subject.voice_stress_pct, rng);

    let location = if rng.chance(env.relocation_chance) {
        rng.pick(&ZONES).to_string()
    } else {
        subject.location.clone()
    };

    let risk_level = transition_risk(subject.risk_level, rng);

    let mut history = subject.history.clone();
    push_reading(
        &mut history,
        BiometricReading {
            timestamp_ms: now_ms,
            heart_rate_bpm,
            stress_level_pct,
            movement_intensity_pct,
            voice_stress_pct,
        },
    );

    Subject {
        id: subject.id.clone(),
        display_name: subject.display_name.clone(),
        risk_level,
        heart_rate_bpm,
        stress_level_pct,
        movement_intensity_pct,
        voice_stress_pct,
        location,
        history,
    }
}
