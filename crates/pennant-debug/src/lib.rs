//! # pennant-debug
//!
//! Inspection hooks called from the frame loop, and binary snapshots of
//! the cloth state for replay and offline inspection.

pub mod hooks;
pub mod snapshot;

pub use hooks::{InspectionHook, TelemetryHook};
pub use snapshot::ClothSnapshot;
