//! Cloth state snapshots.
//!
//! A snapshot stores both `position` and `previous` for every particle,
//! which is the whole dynamic state of a Verlet cloth: restoring it into
//! a freshly built grid of the same size resumes the motion exactly.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use pennant_mesh::ClothMesh;
use pennant_types::{PennantError, PennantResult};

/// The dynamic state of a cloth at one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothSnapshot {
    /// Steps taken when the snapshot was captured.
    pub step: u64,
    /// Simulated time in seconds.
    pub sim_time: f64,
    pub width: u32,
    pub height: u32,
    /// Flat `[x0, y0, z0, x1, ...]` in grid order.
    pub positions: Vec<f32>,
    /// Flat previous positions, same layout.
    pub previous: Vec<f32>,
}

impl ClothSnapshot {
    pub fn capture(cloth: &ClothMesh, step: u64, sim_time: f64) -> Self {
        let n = cloth.particle_count();
        let mut positions = Vec::with_capacity(n * 3);
        let mut previous = Vec::with_capacity(n * 3);
        for p in cloth.particles() {
            positions.extend_from_slice(&p.position.to_array());
            previous.extend_from_slice(&p.previous.to_array());
        }
        Self {
            step,
            sim_time,
            width: cloth.width(),
            height: cloth.height(),
            positions,
            previous,
        }
    }

    #[inline]
    pub fn particle_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::from_slice(&self.positions[i * 3..i * 3 + 3])
    }

    /// Writes positions and previous positions back into `cloth`.
    pub fn restore(&self, cloth: &mut ClothMesh) -> PennantResult<()> {
        if cloth.width() != self.width || cloth.height() != self.height {
            return Err(PennantError::InvalidMesh(format!(
                "snapshot is {}×{} but cloth is {}×{}",
                self.width,
                self.height,
                cloth.width(),
                cloth.height()
            )));
        }
        if self.positions.len() != cloth.particle_count() * 3
            || self.previous.len() != self.positions.len()
        {
            return Err(PennantError::InvalidMesh(
                "snapshot buffers do not match the particle count".into(),
            ));
        }
        for (i, p) in cloth.particles_mut().iter_mut().enumerate() {
            p.position = Vec3::from_slice(&self.positions[i * 3..i * 3 + 3]);
            p.previous = Vec3::from_slice(&self.previous[i * 3..i * 3 + 3]);
        }
        Ok(())
    }

    /// Serializes to compact binary.
    pub fn to_bytes(&self) -> PennantResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| PennantError::Serialization(e.to_string()))
    }

    pub fn from_bytes(data: &[u8]) -> PennantResult<Self> {
        bincode::deserialize(data)
            .map_err(|e| PennantError::Serialization(format!("snapshot decode failed: {e}")))
    }
}
