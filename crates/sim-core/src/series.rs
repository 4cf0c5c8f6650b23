//! Standalone chart feed: a synthetic hourly reading series with no
//! linkage to any subject.

use contracts::{BiometricReading, SERIES_INTERVAL_MS};

use crate::rng::RandomSource;

pub const DEFAULT_SERIES_HOURS: usize = 24;

/// `hours` points at hourly spacing, the newest one interval before
/// `now_ms`, oldest first.
pub fn generate_series<R: RandomSource>(
    hours: usize,
    now_ms: i64,
    rng: &mut R,
) -> Vec<BiometricReading> {
    (0..hours)
        .map(|i| BiometricReading {
            timestamp_ms: now_ms - (hours - i) as i64 * SERIES_INTERVAL_MS,
            heart_rate_bpm: rng.uniform_step(70.0, 30.0),
            stress_level_pct: rng.uniform_step(30.0, 60.0),
            movement_intensity_pct: rng.uniform_step(0.0, 100.0),
            voice_stress_pct: rng.uniform_step(0.0, 100.0),
        })
        .collect()
}
