//! Distance constraints.
//!
//! Each constraint is relaxed by moving both endpoints half of the way
//! toward the rest distance. A single pass over all constraints is not
//! expected to converge; residual error carries into the next step.

use glam::Vec3;
use pennant_types::{ParticleId, PennantError, PennantResult};

use crate::particle::Particle;

/// A rest-length link between two distinct particles of the same grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraint {
    a: ParticleId,
    b: ParticleId,
    rest_distance: f32,
}

impl Constraint {
    /// Fails if both ends are the same particle.
    pub fn new(a: ParticleId, b: ParticleId, rest_distance: f32) -> PennantResult<Self> {
        if a == b {
            return Err(PennantError::InvalidMesh(format!(
                "constraint endpoints must differ, both are particle {}",
                a.0
            )));
        }
        Ok(Self {
            a,
            b,
            rest_distance,
        })
    }

    #[inline]
    pub fn a(&self) -> ParticleId {
        self.a
    }

    #[inline]
    pub fn b(&self) -> ParticleId {
        self.b
    }

    #[inline]
    pub fn rest_distance(&self) -> f32 {
        self.rest_distance
    }

    /// Relaxes this constraint once against the grid's particles.
    pub fn satisfy(&self, particles: &mut [Particle]) {
        let (p1, p2) = pair_mut(particles, self.a.index(), self.b.index());
        satisfy_pair(p1, p2, self.rest_distance);
    }

    /// Current length minus rest length. Positive when stretched.
    pub fn error(&self, particles: &[Particle]) -> f32 {
        let a = particles[self.a.index()].position;
        let b = particles[self.b.index()].position;
        a.distance(b) - self.rest_distance
    }
}

/// Moves `p1` and `p2` symmetrically toward `distance` apart.
///
/// Coincident particles are left untouched.
pub fn satisfy_pair(p1: &mut Particle, p2: &mut Particle, distance: f32) {
    let delta = p2.position - p1.position;
    let current = delta.length();
    if current == 0.0 {
        return;
    }
    let half: Vec3 = delta * (1.0 - distance / current) * 0.5;
    p1.position += half;
    p2.position -= half;
}

fn pair_mut(particles: &mut [Particle], a: usize, b: usize) -> (&mut Particle, &mut Particle) {
    if a < b {
        let (head, tail) = particles.split_at_mut(b);
        (&mut head[a], &mut tail[0])
    } else {
        let (head, tail) = particles.split_at_mut(a);
        (&mut tail[0], &mut head[b])
    }
}
