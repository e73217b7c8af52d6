//! # pennant-telemetry
//!
//! Event bus for simulation telemetry. Emits structured events
//! (step timing, wind samples, run-state changes, energy) that are
//! consumed by pluggable sinks.

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, SimulationEvent};
pub use sinks::{EventSink, TracingSink, VecSink};
