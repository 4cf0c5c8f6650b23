//! Property and statistical coverage for population generation and
//! per-tick advancement.

use contracts::{RiskLevel, SimConfig, Subject, HISTORY_CAP, SEED_INTERVAL_MS};
use proptest::prelude::*;
use sim_core::envelope::{classify_intake, walk_envelope};
use sim_core::{
    advance, generate_population, generate_series, seed_history, subject_stream_seed,
    RandomSource, SimWorld, TickRng,
};

const NOW_MS: i64 = 1_700_000_000_000;

/// Source that returns the same draw forever, pinning every branch.
struct ConstSource(f64);

impl RandomSource for ConstSource {
    fn next_f64(&mut self) -> f64 {
        self.0
    }
}

fn subject_with_level(level: RiskLevel) -> Subject {
    let mut rng = TickRng::new(4242);
    let mut subject = generate_population(1, NOW_MS, &mut rng).remove(0);
    // Pin the classification under test; the first advance clamps the
    // vitals into the matching envelope.
    subject.risk_level = level;
    subject
}

#[test]
fn population_ids_follow_sequence_and_histories_are_full() {
    let mut rng = TickRng::new(1);
    let population = generate_population(40, NOW_MS, &mut rng);

    assert_eq!(population.len(), 40);
    let mut seen = std::collections::BTreeSet::new();
    for (i, subject) in population.iter().enumerate() {
        assert_eq!(subject.id, format!("INM-{}", 1000 + i));
        assert!(seen.insert(subject.id.clone()), "duplicate id {}", subject.id);
        assert_eq!(subject.history.len(), HISTORY_CAP);
    }
}

#[test]
fn repeated_advance_keeps_history_capped_and_consistent() {
    let mut rng = TickRng::new(7);
    let mut subject = generate_population(1, NOW_MS, &mut rng).remove(0);

    for tick in 1..=300 {
        subject = advance(&subject, NOW_MS + tick * 5_000, &mut rng);
        assert!(subject.history.len() <= HISTORY_CAP);
        let newest = subject.history.last().expect("history non-empty");
        assert_eq!(newest.heart_rate_bpm, subject.heart_rate_bpm);
        assert_eq!(newest.stress_level_pct, subject.stress_level_pct);
        assert_eq!(newest.movement_intensity_pct, subject.movement_intensity_pct);
        assert_eq!(newest.voice_stress_pct, subject.voice_stress_pct);
    }
}

#[test]
fn advance_respects_entering_envelope_for_every_level() {
    for level in [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High] {
        let mut subject = subject_with_level(level);
        let mut rng = TickRng::new(55);
        for tick in 1..=200 {
            let env = walk_envelope(subject.risk_level);
            let next = advance(&subject, NOW_MS + tick * 5_000, &mut rng);
            assert!(env.heart_rate.contains(next.heart_rate_bpm));
            assert!(env.stress.contains(next.stress_level_pct));
            assert!(env.movement.contains(next.movement_intensity_pct));
            assert!(env.voice_stress.contains(next.voice_stress_pct));
            subject = next;
        }
    }
}

#[test]
fn high_to_medium_transition_rate_is_about_five_percent() {
    let subject = subject_with_level(RiskLevel::High);
    let trials = 100_000u64;
    let mut demotions = 0u64;

    for trial in 0..trials {
        let mut rng = TickRng::new(subject_stream_seed(99, &subject.id, trial));
        let updated = advance(&subject, NOW_MS + 5_000, &mut rng);
        if updated.risk_level == RiskLevel::Medium {
            demotions += 1;
        }
    }

    let rate = demotions as f64 / trials as f64;
    assert!(
        (0.04..0.06).contains(&rate),
        "high→medium rate {rate} outside tolerance"
    );
}

#[test]
fn medium_transitions_split_toward_low() {
    let subject = subject_with_level(RiskLevel::Medium);
    let trials = 100_000u64;
    let mut to_low = 0u64;
    let mut to_high = 0u64;

    for trial in 0..trials {
        let mut rng = TickRng::new(subject_stream_seed(123, &subject.id, trial));
        match advance(&subject, NOW_MS + 5_000, &mut rng).risk_level {
            RiskLevel::Low => to_low += 1,
            RiskLevel::High => to_high += 1,
            RiskLevel::Medium => {}
        }
    }

    // 3% shift chance, split 70/30: expect ~2.1% down, ~0.9% up.
    let low_rate = to_low as f64 / trials as f64;
    let high_rate = to_high as f64 / trials as f64;
    assert!((0.016..0.026).contains(&low_rate), "medium→low rate {low_rate}");
    assert!((0.005..0.014).contains(&high_rate), "medium→high rate {high_rate}");
}

#[test]
fn intake_classification_is_weighted_40_30_30() {
    let mut rng = TickRng::new(2024);
    let trials = 30_000u64;
    let mut counts = [0u64; 3];

    for _ in 0..trials {
        match classify_intake(rng.next_f64()) {
            RiskLevel::Low => counts[0] += 1,
            RiskLevel::Medium => counts[1] += 1,
            RiskLevel::High => counts[2] += 1,
        }
    }

    let rates: Vec<f64> = counts.iter().map(|&c| c as f64 / trials as f64).collect();
    assert!((0.37..0.43).contains(&rates[0]), "low rate {}", rates[0]);
    assert!((0.27..0.33).contains(&rates[1]), "medium rate {}", rates[1]);
    assert!((0.27..0.33).contains(&rates[2]), "high rate {}", rates[2]);
}

#[test]
fn pinned_draw_classifies_per_threshold_table() {
    assert_eq!(classify_intake(0.1), RiskLevel::Low);
    assert_eq!(classify_intake(0.5), RiskLevel::Medium);
    assert_eq!(classify_intake(0.9), RiskLevel::High);

    // The same pinned draws drive a whole generation call.
    for (draw, expected) in [
        (0.1, RiskLevel::Low),
        (0.5, RiskLevel::Medium),
        (0.9, RiskLevel::High),
    ] {
        let mut source = ConstSource(draw);
        let population = generate_population(1, NOW_MS, &mut source);
        assert_eq!(population[0].risk_level, expected);
    }
}

#[test]
fn seeded_history_timestamps_step_by_fifteen_minutes() {
    let mut rng = TickRng::new(3);
    let history = seed_history(96, NOW_MS, &mut rng);
    assert_eq!(history.len(), 96);
    for pair in history.windows(2) {
        assert_eq!(pair[1].timestamp_ms - pair[0].timestamp_ms, SEED_INTERVAL_MS);
    }
    assert_eq!(
        history.last().map(|r| r.timestamp_ms),
        Some(NOW_MS - SEED_INTERVAL_MS)
    );
}

#[test]
fn chart_series_is_hourly_and_in_range() {
    let mut rng = TickRng::new(4);
    let series = generate_series(24, NOW_MS, &mut rng);
    assert_eq!(series.len(), 24);
    for pair in series.windows(2) {
        assert_eq!(pair[1].timestamp_ms - pair[0].timestamp_ms, 3_600_000);
    }
    for reading in &series {
        assert!((70.0..100.0).contains(&reading.heart_rate_bpm));
        assert!((30.0..90.0).contains(&reading.stress_level_pct));
        assert!((0.0..100.0).contains(&reading.movement_intensity_pct));
        assert!((0.0..100.0).contains(&reading.voice_stress_pct));
    }
}

#[test]
fn advance_is_pure_given_equal_sources() {
    let mut rng = TickRng::new(6);
    let subject = generate_population(1, NOW_MS, &mut rng).remove(0);
    let pristine = subject.clone();

    let mut source_a = TickRng::new(31337);
    let mut source_b = TickRng::new(31337);
    let a = advance(&subject, NOW_MS + 5_000, &mut source_a);
    let b = advance(&subject, NOW_MS + 5_000, &mut source_b);

    assert_eq!(a, b);
    assert_eq!(subject, pristine);
}

proptest! {
    #[test]
    fn any_count_yields_exactly_that_many_subjects(count in 0_usize..64) {
        let mut rng = TickRng::new(11);
        let population = generate_population(count, NOW_MS, &mut rng);
        prop_assert_eq!(population.len(), count);
        for (i, subject) in population.iter().enumerate() {
            prop_assert_eq!(&subject.id, &format!("INM-{}", 1000 + i));
            prop_assert_eq!(subject.history.len(), HISTORY_CAP);
        }
    }

    #[test]
    fn world_runs_are_reproducible(seed in 1_u64..10_000, ticks in 1_u64..20) {
        let mut config = SimConfig::default();
        config.seed = seed;
        config.subject_count = 4;

        let mut world_a = SimWorld::new(config.clone(), NOW_MS);
        let mut world_b = SimWorld::new(config, NOW_MS);
        world_a.step_n(ticks);
        world_b.step_n(ticks);

        prop_assert_eq!(world_a.events(), world_b.events());
        prop_assert_eq!(world_a.replay_hash(), world_b.replay_hash());
    }

    #[test]
    fn vitals_never_escape_their_envelope(seed in 1_u64..5_000) {
        let mut rng = TickRng::new(seed);
        let subject = generate_population(1, NOW_MS, &mut rng).remove(0);
        let env = walk_envelope(subject.risk_level);
        let next = advance(&subject, NOW_MS + 5_000, &mut rng);
        prop_assert!(env.heart_rate.contains(next.heart_rate_bpm));
        prop_assert!(env.stress.contains(next.stress_level_pct));
        prop_assert!(env.movement.contains(next.movement_intensity_pct));
        prop_assert!(env.voice_stress.contains(next.voice_stress_pct));
    }
}
