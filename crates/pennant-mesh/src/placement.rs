//! Parametric placement of particles.
//!
//! A placement maps normalized grid coordinates `(u, v) ∈ [0, 1]²` to a
//! point in space. The cloth samples it once per particle at build time;
//! the result becomes that particle's rest (`original`) position.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::cloth::GridConfig;

/// Maps normalized `(u, v)` grid coordinates to a 3D point.
pub trait Placement {
    fn place(&self, u: f32, v: f32) -> Vec3;
}

impl<F> Placement for F
where
    F: Fn(f32, f32) -> Vec3,
{
    #[inline]
    fn place(&self, u: f32, v: f32) -> Vec3 {
        self(u, v)
    }
}

/// A flat rectangle in the XY plane.
///
/// `u` runs along X centred on the origin, `v` runs up Y starting half a
/// banner above it: `((u - 0.5) * width, (v + 0.5) * height, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanePlacement {
    /// Physical width of the banner.
    pub width: f32,
    /// Physical height of the banner.
    pub height: f32,
}

impl PlanePlacement {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A plane whose segments are exactly one rest distance long.
    pub fn for_grid(config: &GridConfig) -> Self {
        Self {
            width: config.rest_distance * config.width as f32,
            height: config.rest_distance * config.height as f32,
        }
    }
}

impl Placement for PlanePlacement {
    fn place(&self, u: f32, v: f32) -> Vec3 {
        Vec3::new((u - 0.5) * self.width, (v + 0.5) * self.height, 0.0)
    }
}
