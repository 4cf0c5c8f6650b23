//! Seeded reading history and the bounded rolling buffer.

use contracts::{BiometricReading, HISTORY_CAP, SEED_INTERVAL_MS};

use crate::rng::RandomSource;

/// Fabricate `count` readings at 15-minute spacing, the newest one interval
/// before `now_ms`, oldest first.
///
/// Ranges are broad and independent of any risk classification; live ticks
/// are the only risk-scaled path.
pub fn seed_history<R: RandomSource>(
    count: usize,
    now_ms: i64,
    rng: &mut R,
) -> Vec<BiometricReading> {
    (0..count)
        .map(|i| BiometricReading {
            timestamp_ms: now_ms - (count - i) as i64 * SEED_INTERVAL_MS,
            heart_rate_bpm: rng.uniform_step(60.0, 50.0),
            stress_level_pct: rng.uniform_step(10.0, 80.0),
            movement_intensity_pct: rng.uniform_step(10.0, 70.0),
            voice_stress_pct: rng.uniform_step(20.0, 60.0),
        })
        .collect()
}

/// Append a reading, evicting from the front once the buffer exceeds
/// [`HISTORY_CAP`]. Oldest entries go first.
pub fn push_reading(history: &mut Vec<BiometricReading>, reading: BiometricReading) {
    history.push(reading);
    if history.len() > HISTORY_CAP {
        let excess = history.len() - HISTORY_CAP;
        history.drain(..excess);
    }
}
