//! The frame loop around the simulator.
//!
//! A tick samples the wind, steps the simulator against the surface's
//! current normals, then copies the new positions into the surface and
//! recomputes its normals for the next tick. The driver never schedules
//! itself; whoever owns it calls [`FrameDriver::tick`] once per frame.

use pennant_debug::hooks::InspectionHook;
use pennant_mesh::normals::compute_vertex_normals;
use pennant_mesh::SurfaceMesh;
use pennant_types::PennantResult;

use crate::config::SimulatorConfig;
use crate::simulator::{Simulator, StepOutcome};
use crate::wind::WindSource;

/// Owns a simulator, its surface mesh and the fan.
pub struct FrameDriver {
    simulator: Simulator,
    surface: SurfaceMesh,
    wind: WindSource,
    hooks: Vec<Box<dyn InspectionHook>>,
}

impl FrameDriver {
    pub fn new(simulator: Simulator, wind: WindSource) -> Self {
        let surface = SurfaceMesh::from_cloth(simulator.cloth());
        Self {
            simulator,
            surface,
            wind,
            hooks: Vec::new(),
        }
    }

    pub fn from_config(config: &SimulatorConfig) -> PennantResult<Self> {
        let simulator = Simulator::from_config(config)?;
        Ok(Self::new(simulator, WindSource::new(config.wind.clone())))
    }

    pub fn add_hook(&mut self, hook: Box<dyn InspectionHook>) {
        self.hooks.push(hook);
    }

    /// Runs one frame. While paused nothing moves, not even the fan.
    pub fn tick(&mut self) -> PennantResult<StepOutcome> {
        if !self.simulator.is_running() {
            return Ok(StepOutcome::Paused);
        }

        let step = self.simulator.steps();
        let sim_time = self.simulator.sim_time();
        let sample = self.wind.sample(self.simulator.time_step());

        for hook in &mut self.hooks {
            hook.on_step_begin(step, sim_time);
            hook.on_wind(step, sample.strength, sample.direction.to_array());
        }

        let outcome = self.simulator.step(&sample, &self.surface)?;

        self.surface.sync_positions(self.simulator.cloth())?;
        compute_vertex_normals(&mut self.surface);

        if let StepOutcome::Stepped(report) = outcome {
            let kinetic = self.simulator.cloth().kinetic_energy(self.simulator.time_step());
            for hook in &mut self.hooks {
                hook.on_step_end(report.step, report.wall_time, kinetic);
            }
        }
        Ok(outcome)
    }

    /// Ticks up to `frames` times; returns how many steps executed.
    pub fn run(&mut self, frames: u32) -> PennantResult<u32> {
        self.run_with(frames, |_| {})
    }

    /// Like [`run`](Self::run), calling `after_tick` once per frame, e.g.
    /// to flush a telemetry bus while the run is still going.
    pub fn run_with<F>(&mut self, frames: u32, mut after_tick: F) -> PennantResult<u32>
    where
        F: FnMut(&StepOutcome),
    {
        let mut stepped = 0;
        for _ in 0..frames {
            let outcome = self.tick()?;
            if let StepOutcome::Stepped(_) = outcome {
                stepped += 1;
            }
            after_tick(&outcome);
        }
        Ok(stepped)
    }

    pub fn play(&mut self) {
        if !self.simulator.is_running() {
            self.simulator.play();
            self.notify_state();
        }
    }

    pub fn stop(&mut self) {
        if self.simulator.is_running() {
            self.simulator.stop();
            self.notify_state();
        }
    }

    fn notify_state(&mut self) {
        let (step, running) = (self.simulator.steps(), self.simulator.is_running());
        for hook in &mut self.hooks {
            hook.on_state_change(step, running);
        }
    }

    /// Tells every hook the session is over.
    pub fn finish(&mut self) {
        for hook in &mut self.hooks {
            hook.on_simulation_end();
        }
    }

    pub fn simulator(&self) -> &Simulator {
        &self.simulator
    }

    pub fn simulator_mut(&mut self) -> &mut Simulator {
        &mut self.simulator
    }

    pub fn surface(&self) -> &SurfaceMesh {
        &self.surface
    }

    /// Re-syncs the surface after the cloth was changed outside a tick.
    pub fn refresh_surface(&mut self) -> PennantResult<()> {
        self.surface.sync_positions(self.simulator.cloth())?;
        compute_vertex_normals(&mut self.surface);
        Ok(())
    }

    pub fn wind(&self) -> &WindSource {
        &self.wind
    }

    pub fn wind_mut(&mut self) -> &mut WindSource {
        &mut self.wind
    }
}
