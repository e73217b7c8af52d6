//! Inspection hooks for live debugging.
//!
//! The frame driver calls hooks at fixed points of every tick, so
//! monitoring code never has to live inside the simulator.
//!
//! ```text
//! for each tick while running:
//!   hook.on_step_begin(...)
//!   hook.on_wind(...)
//!   hook.on_step_end(...)
//! on play/stop:
//!   hook.on_state_change(...)
//! hook.on_simulation_end()
//! ```

use std::sync::mpsc::Sender;

use pennant_telemetry::events::{EventKind, SimulationEvent};

/// Trait for simulation inspection hooks. Every callback defaults to a no-op.
pub trait InspectionHook: Send {
    fn on_step_begin(&mut self, step: u64, sim_time: f64) {
        let _ = (step, sim_time);
    }

    /// Wind sampled for this step. `direction` is unnormalized.
    fn on_wind(&mut self, step: u64, strength: f32, direction: [f32; 3]) {
        let _ = (step, strength, direction);
    }

    fn on_step_end(&mut self, step: u64, wall_time: f64, kinetic_energy: f64) {
        let _ = (step, wall_time, kinetic_energy);
    }

    fn on_state_change(&mut self, step: u64, running: bool) {
        let _ = (step, running);
    }

    fn on_simulation_end(&mut self) {}

    fn name(&self) -> &str;
}

/// Translates hook callbacks into telemetry events.
///
/// Without a sender, events are buffered until drained. With one (see
/// [`EventBus::sender`](pennant_telemetry::EventBus::sender)) they go
/// straight onto the bus.
#[derive(Default)]
pub struct TelemetryHook {
    events: Vec<SimulationEvent>,
    sender: Option<Sender<SimulationEvent>>,
}

impl TelemetryHook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sender(sender: Sender<SimulationEvent>) -> Self {
        Self {
            events: Vec::new(),
            sender: Some(sender),
        }
    }

    /// Takes the buffered events, leaving the hook empty.
    pub fn drain_events(&mut self) -> Vec<SimulationEvent> {
        std::mem::take(&mut self.events)
    }

    fn push(&mut self, step: u64, kind: EventKind) {
        let event = SimulationEvent::new(step, kind);
        match &self.sender {
            // A dropped bus just means nobody is listening any more.
            Some(sender) => {
                let _ = sender.send(event);
            }
            None => self.events.push(event),
        }
    }
}

impl InspectionHook for TelemetryHook {
    fn on_step_begin(&mut self, step: u64, sim_time: f64) {
        self.push(step, EventKind::StepBegin { sim_time });
    }

    fn on_wind(&mut self, step: u64, strength: f32, direction: [f32; 3]) {
        self.push(step, EventKind::Wind { strength, direction });
    }

    fn on_step_end(&mut self, step: u64, wall_time: f64, kinetic_energy: f64) {
        self.push(step, EventKind::StepEnd { wall_time });
        self.push(step, EventKind::Energy { kinetic: kinetic_energy });
    }

    fn on_state_change(&mut self, step: u64, running: bool) {
        self.push(step, EventKind::StateChanged { running });
    }

    fn name(&self) -> &str {
        "telemetry_hook"
    }
}
