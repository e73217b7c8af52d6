//! # pennant-mesh
//!
//! The cloth itself: point-mass particles, pairwise distance constraints,
//! and the regular grid that owns both.
//!
//! ## Key Types
//!
//! - [`Particle`]: Verlet point mass with position history.
//! - [`Constraint`]: Rest-length link between two particles.
//! - [`ClothMesh`]: `(width+1) × (height+1)` particle grid plus its
//!   structural constraints, built from a [`Placement`].
//! - [`SurfaceMesh`]: The triangulated render-side view of the grid,
//!   carrying the vertex normals the wind force reads.

pub mod cloth;
pub mod constraint;
pub mod normals;
pub mod particle;
pub mod placement;
pub mod surface;

pub use cloth::{ClothMesh, GridConfig};
pub use constraint::Constraint;
pub use particle::Particle;
pub use placement::{Placement, PlanePlacement};
pub use surface::SurfaceMesh;

pub use glam::Vec3;
