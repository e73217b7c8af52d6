//! Error types for the Pennant simulator.
//!
//! All crates return `PennantResult<T>` from fallible operations.
//! The numeric core itself never fails mid-step: every error here is
//! raised while building or loading something.

use thiserror::Error;

/// Unified error type for the Pennant simulator.
#[derive(Debug, Error)]
pub enum PennantError {
    /// Mesh data is malformed or inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A particle was given a non-positive or non-finite mass.
    #[error("Invalid particle: {0}")]
    InvalidParticle(String),

    /// The placement function produced a non-finite coordinate.
    #[error("Placement produced a non-finite point at (u={u}, v={v})")]
    NonFinitePlacement { u: f32, v: f32 },

    /// A pin refers to a particle that does not exist.
    #[error("Pin index {index} is out of range (particle count: {particle_count})")]
    PinOutOfRange { index: u32, particle_count: usize },

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for `Result<T, PennantError>`.
pub type PennantResult<T> = Result<T, PennantError>;
