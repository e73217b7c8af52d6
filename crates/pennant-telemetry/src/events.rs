//! Simulation event types.
//!
//! Events are small value types tagged with the step they belong to.

use serde::{Deserialize, Serialize};

/// A simulation event emitted by the frame driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Step number (0-indexed).
    pub step: u64,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// A step is about to run.
    StepBegin {
        /// Simulated time at the start of the step (seconds).
        sim_time: f64,
    },

    /// A step completed.
    StepEnd {
        /// Wall-clock time spent in the step (seconds).
        wall_time: f64,
    },

    /// Wind sampled for the step.
    Wind {
        strength: f32,
        direction: [f32; 3],
    },

    /// The simulator was played or stopped.
    StateChanged { running: bool },

    /// Kinetic energy after the step.
    Energy { kinetic: f64 },

    /// Free-form event.
    Custom {
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl SimulationEvent {
    pub fn new(step: u64, kind: EventKind) -> Self {
        Self { step, kind }
    }
}
