//! # pennant-bench
//!
//! Benchmark suite for the Pennant cloth simulator.
//!
//! Provides procedural banner scenarios, a runner that drives them
//! through the frame loop, and CSV/JSON metrics for regression tracking.

pub mod metrics;
pub mod runner;
pub mod scenarios;

pub use metrics::BenchmarkMetrics;
pub use runner::BenchmarkRunner;
pub use scenarios::{Scenario, ScenarioKind};
