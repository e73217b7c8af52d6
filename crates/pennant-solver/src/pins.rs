//! Pinned particles.

use serde::{Deserialize, Serialize};

use pennant_mesh::ClothMesh;
use pennant_types::{ParticleId, PennantError, PennantResult};

/// How the pin set is chosen, resolved against a built cloth.
///
/// In TOML: `pins = "top_row"` or `pins = { indices = [0, 10] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinLayout {
    /// Nothing pinned: free fall.
    None,
    /// Every particle of the top row (`v = height`).
    #[default]
    TopRow,
    /// The two top corners.
    TopCorners,
    /// Explicit grid indices.
    Indices(Vec<ParticleId>),
}

impl PinLayout {
    pub fn resolve(&self, cloth: &ClothMesh) -> PennantResult<PinSet> {
        let (w, h) = (cloth.width(), cloth.height());
        let indices = match self {
            PinLayout::None => Vec::new(),
            PinLayout::TopRow => (0..=w).map(|u| cloth.index(u, h)).collect(),
            PinLayout::TopCorners => vec![cloth.index(0, h), cloth.index(w, h)],
            PinLayout::Indices(ids) => ids.clone(),
        };
        PinSet::new(indices, cloth.particle_count())
    }
}

/// Sorted, de-duplicated particle indices that are reset every step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinSet {
    indices: Vec<ParticleId>,
}

impl PinSet {
    /// Fails if any index is outside `0..particle_count`.
    pub fn new(mut indices: Vec<ParticleId>, particle_count: usize) -> PennantResult<Self> {
        if let Some(bad) = indices.iter().find(|id| id.index() >= particle_count) {
            return Err(PennantError::PinOutOfRange {
                index: bad.0,
                particle_count,
            });
        }
        indices.sort_unstable();
        indices.dedup();
        Ok(Self { indices })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: ParticleId) -> bool {
        self.indices.binary_search(&id).is_ok()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ParticleId> + '_ {
        self.indices.iter().copied()
    }

    /// Snaps every pinned particle back to `original`, zeroing its motion.
    pub fn apply(&self, cloth: &mut ClothMesh) {
        let particles = cloth.particles_mut();
        for id in &self.indices {
            particles[id.index()].pin();
        }
    }
}
