//! Deterministic match simulation for tests and benchmarks.

pub mod rng;
pub mod simulator;

pub use rng::SimRng;
pub use simulator::{MatchSimulator, DEFAULT_EVASION_PROBABILITY};
