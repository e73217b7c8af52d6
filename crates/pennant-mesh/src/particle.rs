//! Verlet point masses.
//!
//! Velocity is never stored: it is implied by `position - previous`.
//! Forces accumulate into `acceleration` during a step and are consumed
//! (and cleared) by [`Particle::integrate`].

use glam::Vec3;
use pennant_types::{PennantError, PennantResult};

use crate::placement::Placement;

/// A point mass on the cloth grid.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Current position.
    pub position: Vec3,
    /// Position at the start of the last integration.
    pub previous: Vec3,
    original: Vec3,
    acceleration: Vec3,
    mass: f32,
    inv_mass: f32,
    drag: f32,
    uv: [f32; 2],
}

impl Particle {
    /// Creates a particle at `placement(u, v)`, at rest.
    ///
    /// Fails if `mass` is not strictly positive and finite, if `drag` is
    /// outside `(0, 1)`, or if the placement yields a non-finite point.
    pub fn new<P: Placement + ?Sized>(
        placement: &P,
        u: f32,
        v: f32,
        mass: f32,
        drag: f32,
    ) -> PennantResult<Self> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(PennantError::InvalidParticle(format!(
                "mass must be positive and finite, got {mass}"
            )));
        }
        if !(drag > 0.0 && drag < 1.0) {
            return Err(PennantError::InvalidParticle(format!(
                "drag factor must be in (0, 1), got {drag}"
            )));
        }

        let mut particle = Self {
            position: Vec3::ZERO,
            previous: Vec3::ZERO,
            original: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            mass,
            inv_mass: 1.0 / mass,
            drag,
            uv: [u, v],
        };
        particle.init(placement)?;
        Ok(particle)
    }

    /// Re-samples the placement and puts the particle at rest there.
    ///
    /// Sets `position`, `previous` and `original` to the same point.
    pub fn init<P: Placement + ?Sized>(&mut self, placement: &P) -> PennantResult<()> {
        let [u, v] = self.uv;
        let point = placement.place(u, v);
        if !point.is_finite() {
            return Err(PennantError::NonFinitePlacement { u, v });
        }
        self.position = point;
        self.previous = point;
        self.original = point;
        self.acceleration = Vec3::ZERO;
        Ok(())
    }

    /// Accumulates a force for the current step.
    #[inline]
    pub fn add_force(&mut self, force: Vec3) {
        self.acceleration += force * self.inv_mass;
    }

    /// Semi-implicit Verlet step.
    ///
    /// The new position is computed from the old `position` before
    /// `previous` is overwritten. Clears the accumulated acceleration.
    pub fn integrate(&mut self, dt_squared: f32) {
        let displacement = (self.position - self.previous) * self.drag;
        let next = self.position + displacement + self.acceleration * dt_squared;

        self.previous = self.position;
        self.position = next;
        self.acceleration = Vec3::ZERO;
    }

    /// Hard-resets the particle onto its rest position with no motion.
    #[inline]
    pub fn pin(&mut self) {
        self.position = self.original;
        self.previous = self.original;
    }

    /// Rest position sampled from the placement at build time.
    #[inline]
    pub fn original(&self) -> Vec3 {
        self.original
    }

    /// Accumulated force-equivalent for the step in progress.
    #[inline]
    pub fn acceleration(&self) -> Vec3 {
        self.acceleration
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    #[inline]
    pub fn inverse_mass(&self) -> f32 {
        self.inv_mass
    }

    /// Fraction of the implicit velocity kept each step.
    #[inline]
    pub fn drag(&self) -> f32 {
        self.drag
    }

    /// Normalized grid coordinates this particle was placed from.
    #[inline]
    pub fn uv(&self) -> [f32; 2] {
        self.uv
    }

    /// Displacement over the last step, `position - previous`.
    #[inline]
    pub fn displacement(&self) -> Vec3 {
        self.position - self.previous
    }
}
