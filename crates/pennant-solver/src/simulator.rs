//! The cloth simulator.
//!
//! One [`Simulator::step`] runs, in order:
//!
//! 1. wind: for each triangle corner, `n · dot(n, wind)` is added to that
//!    particle (skipped entirely when the wind is calm);
//! 2. gravity and Verlet integration of every particle;
//! 3. one relaxation pass over every constraint, in creation order;
//! 4. pinned particles snapped back to their rest positions.
//!
//! The normals come from the caller's surface mesh, which still holds the
//! shape from the previous step.

use std::time::Instant;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use pennant_mesh::{ClothMesh, SurfaceMesh};
use pennant_types::{PennantError, PennantResult};

use crate::config::SimulatorConfig;
use crate::pins::PinSet;
use crate::wind::WindSample;

/// Whether steps execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    Running,
    Paused,
}

/// Summary of one executed step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    /// Index of the step just taken (0-based).
    pub step: u64,
    /// Whether the wind pass ran.
    pub wind_applied: bool,
    /// Wall-clock time for the step (seconds).
    pub wall_time: f64,
}

/// What a call to [`Simulator::step`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    Stepped(StepReport),
    /// The simulator is paused; nothing changed.
    Paused,
}

/// Mass-spring cloth simulator.
pub struct Simulator {
    cloth: ClothMesh,
    pins: PinSet,
    gravity: f32,
    time_step: f32,
    dt_squared: f32,
    state: RunState,
    steps: u64,
}

impl Simulator {
    /// Wraps an already-built cloth. Starts Running.
    pub fn new(cloth: ClothMesh, pins: PinSet, gravity: f32, time_step: f32) -> PennantResult<Self> {
        if !(time_step.is_finite() && time_step > 0.0) {
            return Err(PennantError::InvalidConfig(format!(
                "time step must be positive, got {time_step}"
            )));
        }
        if !gravity.is_finite() {
            return Err(PennantError::InvalidConfig(format!(
                "gravity must be finite, got {gravity}"
            )));
        }
        if let Some(bad) = pins.iter().find(|id| id.index() >= cloth.particle_count()) {
            return Err(PennantError::PinOutOfRange {
                index: bad.0,
                particle_count: cloth.particle_count(),
            });
        }
        if pins.is_empty() {
            tracing::warn!("no pinned particles; the cloth will fall freely");
        }

        Ok(Self {
            cloth,
            pins,
            gravity,
            time_step,
            dt_squared: time_step * time_step,
            state: RunState::Running,
            steps: 0,
        })
    }

    /// Builds the cloth and pin set described by `config`.
    pub fn from_config(config: &SimulatorConfig) -> PennantResult<Self> {
        config.validate()?;
        let cloth = ClothMesh::from_config(&config.grid)?;
        let pins = config.pins.resolve(&cloth)?;
        Self::new(cloth, pins, config.gravity, config.time_step)
    }

    /// Advances the cloth by one timestep, unless paused.
    ///
    /// `surface` must have one vertex per particle and pass
    /// [`SurfaceMesh::validate`]; its normals are read, never written.
    /// Nothing is mutated when it is rejected.
    pub fn step(&mut self, wind: &WindSample, surface: &SurfaceMesh) -> PennantResult<StepOutcome> {
        if self.state == RunState::Paused {
            return Ok(StepOutcome::Paused);
        }
        if surface.vertex_count() != self.cloth.particle_count() {
            return Err(PennantError::InvalidMesh(format!(
                "normal buffer has {} vertices, cloth has {} particles",
                surface.vertex_count(),
                self.cloth.particle_count()
            )));
        }
        surface.validate()?;

        let start = Instant::now();

        let wind_applied = self.apply_wind(wind, surface);
        self.integrate();
        self.cloth.relax_constraints();
        self.pins.apply(&mut self.cloth);

        let report = StepReport {
            step: self.steps,
            wind_applied,
            wall_time: start.elapsed().as_secs_f64(),
        };
        self.steps += 1;

        tracing::debug!(step = report.step, wind = wind_applied, "step");
        Ok(StepOutcome::Stepped(report))
    }

    /// Adds the wind force at every triangle corner. Returns false when calm.
    ///
    /// A particle shared by several triangles receives one contribution
    /// per triangle.
    fn apply_wind(&mut self, wind: &WindSample, surface: &SurfaceMesh) -> bool {
        if wind.is_calm() {
            return false;
        }
        let force = wind.force();
        let particles = self.cloth.particles_mut();
        for t in 0..surface.triangle_count() {
            for vertex in surface.triangle(t) {
                let i = vertex as usize;
                let normal = surface.normal(i).normalize_or_zero();
                particles[i].add_force(normal * normal.dot(force));
            }
        }
        true
    }

    fn integrate(&mut self) {
        let dt_squared = self.dt_squared;
        let g = self.gravity;
        for p in self.cloth.particles_mut() {
            p.add_force(Vec3::new(0.0, -g * p.mass(), 0.0));
            p.integrate(dt_squared);
        }
    }

    /// Resumes stepping.
    pub fn play(&mut self) {
        if self.state == RunState::Paused {
            tracing::info!(step = self.steps, "simulation resumed");
            self.state = RunState::Running;
        }
    }

    /// Pauses stepping. Takes effect before the next step.
    pub fn stop(&mut self) {
        if self.state == RunState::Running {
            tracing::info!(step = self.steps, "simulation paused");
            self.state = RunState::Paused;
        }
    }

    #[inline]
    pub fn state(&self) -> RunState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn cloth(&self) -> &ClothMesh {
        &self.cloth
    }

    /// Mutable cloth access, e.g. for restoring a snapshot.
    pub fn cloth_mut(&mut self) -> &mut ClothMesh {
        &mut self.cloth
    }

    pub fn pins(&self) -> &PinSet {
        &self.pins
    }

    /// Number of steps executed so far.
    #[inline]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Simulated seconds elapsed.
    #[inline]
    pub fn sim_time(&self) -> f64 {
        self.steps as f64 * self.time_step as f64
    }

    /// Resumes the step counter, e.g. after restoring a snapshot.
    pub fn set_steps(&mut self, steps: u64) {
        self.steps = steps;
    }

    #[inline]
    pub fn time_step(&self) -> f32 {
        self.time_step
    }

    #[inline]
    pub fn gravity(&self) -> f32 {
        self.gravity
    }
}
