//! # pennant-solver
//!
//! Per-step orchestration of the cloth: wind projected onto vertex
//! normals, gravity, Verlet integration, one constraint relaxation pass,
//! and pin enforcement.
//!
//! ## Key Types
//!
//! - [`Simulator`]: Owns the cloth and pins; steps while Running.
//! - [`SimulatorConfig`]: TOML-loadable grid, gravity, timestep, pins, wind.
//! - [`WindSource`]: Produces a [`WindSample`] per frame from gusts and
//!   the oscillating [`FanHead`].
//! - [`FrameDriver`]: The explicit frame loop that feeds the simulator
//!   and refreshes the surface normals it reads next frame.

pub mod config;
pub mod driver;
pub mod pins;
pub mod simulator;
pub mod wind;

pub use config::SimulatorConfig;
pub use driver::FrameDriver;
pub use pins::{PinLayout, PinSet};
pub use simulator::{RunState, Simulator, StepOutcome, StepReport};
pub use wind::{FanHead, WindConfig, WindSample, WindSource};
