//! Simulation kernel for the monitoring dashboard: fabricates a population
//! of monitored subjects and evolves their biometric readings tick by tick
//! under risk-dependent envelopes.
//!
//! The kernel holds no global state and consults no wall clock or global
//! RNG. Every operation takes an explicit timestamp and a [`RandomSource`],
//! so a run is a pure function of its configuration.

pub mod catalog;
pub mod envelope;
pub mod history;
pub mod rng;
pub mod series;
pub mod subject;
pub mod world;

pub use history::{push_reading, seed_history};
pub use rng::{subject_stream_seed, RandomSource, TickRng};
pub use series::{generate_series, DEFAULT_SERIES_HOURS};
pub use subject::{advance, generate_population};
pub use world::SimWorld;
