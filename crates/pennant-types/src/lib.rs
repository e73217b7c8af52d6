//! # pennant-types
//!
//! Shared types, identifiers, error types, and physical constants
//! for the Pennant cloth simulator.
//!
//! This crate has no simulation logic. It defines the vocabulary
//! that the other Pennant crates share.

pub mod constants;
pub mod error;
pub mod ids;

pub use error::{PennantError, PennantResult};
pub use ids::ParticleId;
