//! Physical constants and simulation defaults.
//!
//! Units are scene units (the default banner is 250 × 250 units), so
//! gravity is scaled accordingly rather than expressed in m/s².

/// Gravitational acceleration in scene units per second squared.
pub const GRAVITY: f32 = 981.0 * 1.4;

/// Fixed simulation timestep (seconds).
pub const DEFAULT_TIME_STEP: f32 = 18.0 / 1000.0;

/// Default grid segment counts along each axis.
pub const DEFAULT_SEGMENTS: u32 = 10;

/// Default rest length of one grid segment.
pub const DEFAULT_REST_DISTANCE: f32 = 25.0;

/// Default mass of a single particle.
pub const DEFAULT_PARTICLE_MASS: f32 = 0.1;

/// Default velocity damping. The per-step drag factor is `1 - DAMPING`.
pub const DEFAULT_DAMPING: f32 = 0.03;

/// Default base wind strength.
pub const DEFAULT_WIND_STRENGTH: f32 = 40.0;

/// Default gust amplitude added on top of the base wind strength.
pub const DEFAULT_GUST_AMPLITUDE: f32 = 20.0;

/// Period scale of the gust cosine, in milliseconds.
pub const GUST_PERIOD_MS: f64 = 7000.0;

/// Default fan head sweep range, in degrees (full arc).
pub const DEFAULT_SWEEP_DEGREES: f32 = 100.0;

/// Default fan head sweep speed, in radians per frame.
pub const DEFAULT_SWEEP_SPEED: f32 = 0.01;
