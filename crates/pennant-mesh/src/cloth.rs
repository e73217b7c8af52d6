//! The cloth grid: particles plus structural constraints.
//!
//! Particles are stored row-major, `index(u, v) = u + v * (width + 1)`.
//! Pin lists and the surface mesh both rely on that layout.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use pennant_types::constants::{
    DEFAULT_DAMPING, DEFAULT_PARTICLE_MASS, DEFAULT_REST_DISTANCE, DEFAULT_SEGMENTS,
};
use pennant_types::{ParticleId, PennantError, PennantResult};

use crate::constraint::Constraint;
use crate::particle::Particle;
use crate::placement::{Placement, PlanePlacement};

/// Grid resolution and per-particle physical parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Segments along `u` (particle columns = `width + 1`).
    pub width: u32,
    /// Segments along `v` (particle rows = `height + 1`).
    pub height: u32,
    /// Rest length of every structural constraint.
    pub rest_distance: f32,
    /// Mass of each particle.
    pub particle_mass: f32,
    /// Velocity damping in `(0, 1)`; the Verlet drag factor is `1 - damping`.
    pub damping: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_SEGMENTS,
            height: DEFAULT_SEGMENTS,
            rest_distance: DEFAULT_REST_DISTANCE,
            particle_mass: DEFAULT_PARTICLE_MASS,
            damping: DEFAULT_DAMPING,
        }
    }
}

impl GridConfig {
    /// A `width × height` grid with default physical parameters.
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Velocity retained per step.
    #[inline]
    pub fn drag(&self) -> f32 {
        1.0 - self.damping
    }

    pub fn validate(&self) -> PennantResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PennantError::InvalidConfig(format!(
                "grid dimensions must be positive, got {}×{}",
                self.width, self.height
            )));
        }
        if grid_counts(self.width, self.height).is_none() {
            return Err(PennantError::InvalidConfig(format!(
                "grid of {}×{} segments is too large to index",
                self.width, self.height
            )));
        }
        if !(self.rest_distance.is_finite() && self.rest_distance > 0.0) {
            return Err(PennantError::InvalidConfig(format!(
                "rest distance must be positive, got {}",
                self.rest_distance
            )));
        }
        if !(self.particle_mass.is_finite() && self.particle_mass > 0.0) {
            return Err(PennantError::InvalidConfig(format!(
                "particle mass must be positive, got {}",
                self.particle_mass
            )));
        }
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(PennantError::InvalidConfig(format!(
                "damping must be in (0, 1), got {}",
                self.damping
            )));
        }
        Ok(())
    }
}

/// Particle and constraint counts of a `width × height` grid, or `None`
/// if either does not fit a `u32` particle index or a `usize`.
fn grid_counts(width: u32, height: u32) -> Option<(usize, usize)> {
    let particles = width.checked_add(1)?.checked_mul(height.checked_add(1)?)?;
    let constraints = width
        .checked_mul(height)?
        .checked_mul(2)?
        .checked_add(width)?
        .checked_add(height)?;
    Some((
        usize::try_from(particles).ok()?,
        usize::try_from(constraints).ok()?,
    ))
}

/// Grid index of `(u, v)` in a grid `width` segments wide.
#[inline]
pub fn grid_index(u: u32, v: u32, width: u32) -> ParticleId {
    ParticleId(u + v * (width + 1))
}

/// A regular particle grid and its structural constraints.
///
/// Topology is fixed at build time; only particle positions evolve.
#[derive(Debug, Clone)]
pub struct ClothMesh {
    width: u32,
    height: u32,
    particles: Vec<Particle>,
    constraints: Vec<Constraint>,
}

impl ClothMesh {
    /// Builds the grid by sampling `placement` at every `(u/width, v/height)`.
    ///
    /// Constraint order: for each cell a vertical then a horizontal link,
    /// then the right column's verticals, then the bottom row's horizontals.
    ///
    /// # Example
    /// ```
    /// use pennant_mesh::{ClothMesh, GridConfig, PlanePlacement};
    /// let config = GridConfig::with_size(2, 3);
    /// let cloth = ClothMesh::build(&config, &PlanePlacement::for_grid(&config)).unwrap();
    /// assert_eq!(cloth.particle_count(), 12);    // 3×4 particles
    /// assert_eq!(cloth.constraint_count(), 17);  // 2·2·3 + 2 + 3
    /// ```
    pub fn build<P: Placement + ?Sized>(config: &GridConfig, placement: &P) -> PennantResult<Self> {
        config.validate()?;

        let (w, h) = (config.width, config.height);
        let drag = config.drag();
        let rest = config.rest_distance;

        let (particle_count, constraint_count) = grid_counts(w, h).ok_or_else(|| {
            PennantError::InvalidConfig(format!("grid of {w}×{h} segments is too large to index"))
        })?;

        let mut particles = Vec::with_capacity(particle_count);
        for v in 0..=h {
            for u in 0..=w {
                particles.push(Particle::new(
                    placement,
                    u as f32 / w as f32,
                    v as f32 / h as f32,
                    config.particle_mass,
                    drag,
                )?);
            }
        }

        let mut constraints = Vec::with_capacity(constraint_count);
        for v in 0..h {
            for u in 0..w {
                constraints.push(Constraint::new(grid_index(u, v, w), grid_index(u, v + 1, w), rest)?);
                constraints.push(Constraint::new(grid_index(u, v, w), grid_index(u + 1, v, w), rest)?);
            }
        }
        for v in 0..h {
            constraints.push(Constraint::new(grid_index(w, v, w), grid_index(w, v + 1, w), rest)?);
        }
        for u in 0..w {
            constraints.push(Constraint::new(grid_index(u, h, w), grid_index(u + 1, h, w), rest)?);
        }

        tracing::info!(
            width = w,
            height = h,
            particles = particles.len(),
            constraints = constraints.len(),
            "cloth built"
        );

        Ok(Self {
            width: w,
            height: h,
            particles,
            constraints,
        })
    }

    /// Builds a flat banner whose segments are one rest distance long.
    pub fn from_config(config: &GridConfig) -> PennantResult<Self> {
        Self::build(config, &PlanePlacement::for_grid(config))
    }

    /// `2·w·h + w + h`: every horizontal and vertical grid edge once.
    pub fn expected_constraint_count(width: u32, height: u32) -> usize {
        let (w, h) = (width as usize, height as usize);
        2 * w * h + w + h
    }

    /// Grid index of `(u, v)`.
    #[inline]
    pub fn index(&self, u: u32, v: u32) -> ParticleId {
        grid_index(u, v, self.width)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Constraints in creation (and relaxation) order.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(id.index())
    }

    pub fn particle_mut(&mut self, id: ParticleId) -> Option<&mut Particle> {
        self.particles.get_mut(id.index())
    }

    /// One relaxation pass over every constraint, in creation order.
    pub fn relax_constraints(&mut self) {
        for constraint in &self.constraints {
            constraint.satisfy(&mut self.particles);
        }
    }

    /// Puts every particle back on its rest position with no motion.
    pub fn reset(&mut self) {
        for p in &mut self.particles {
            p.pin();
        }
    }

    /// Current positions in grid order.
    pub fn positions(&self) -> Vec<Vec3> {
        self.particles.iter().map(|p| p.position).collect()
    }

    /// Largest distance of any particle from its rest position.
    pub fn max_displacement(&self) -> f32 {
        self.particles
            .iter()
            .map(|p| p.position.distance(p.original()))
            .fold(0.0, f32::max)
    }

    /// `0.5 · Σ m·|v|²`, with `v = (position - previous) / dt`.
    pub fn kinetic_energy(&self, dt: f32) -> f64 {
        let inv_dt = 1.0 / dt as f64;
        self.particles
            .iter()
            .map(|p| {
                let speed_sq = p.displacement().length_squared() as f64 * inv_dt * inv_dt;
                0.5 * p.mass() as f64 * speed_sq
            })
            .sum()
    }

    /// Largest absolute constraint error, as a stretch diagnostic.
    pub fn max_constraint_error(&self) -> f32 {
        self.constraints
            .iter()
            .map(|c| c.error(&self.particles).abs())
            .fold(0.0, f32::max)
    }
}
