//! Benchmark scenarios: a banner configuration plus a frame count.
//!
//! 1. **Hanging banner**: top row pinned, gusting wind from a sweeping fan
//! 2. **Corner pinned**: two top corners pinned, steady wind
//! 3. **Becalmed**: top row pinned, no wind at all

use serde::{Deserialize, Serialize};

use pennant_mesh::GridConfig;
use pennant_solver::{PinLayout, SimulatorConfig, WindConfig};

/// Which benchmark scenario to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioKind {
    HangingBanner,
    CornerPinned,
    Becalmed,
}

impl ScenarioKind {
    pub fn all() -> &'static [ScenarioKind] {
        &[
            ScenarioKind::HangingBanner,
            ScenarioKind::CornerPinned,
            ScenarioKind::Becalmed,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::HangingBanner => "hanging_banner",
            ScenarioKind::CornerPinned => "corner_pinned",
            ScenarioKind::Becalmed => "becalmed",
        }
    }

    /// Looks a scenario up by its [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.name() == name)
    }
}

/// A fully specified benchmark scenario.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub kind: ScenarioKind,
    pub config: SimulatorConfig,
    /// Number of frames to drive.
    pub frames: u32,
}

impl Scenario {
    /// 20×20 banner, top row pinned, gusting fan sweeping 100°, 10 s.
    pub fn hanging_banner() -> Self {
        Self {
            kind: ScenarioKind::HangingBanner,
            config: SimulatorConfig {
                grid: GridConfig::with_size(20, 20),
                pins: PinLayout::TopRow,
                wind: WindConfig {
                    oscillate: true,
                    ..Default::default()
                },
                ..Default::default()
            },
            frames: 556,
        }
    }

    /// 20×10 banner held by its two top corners in a steady breeze.
    pub fn corner_pinned() -> Self {
        Self {
            kind: ScenarioKind::CornerPinned,
            config: SimulatorConfig {
                grid: GridConfig::with_size(20, 10),
                pins: PinLayout::TopCorners,
                wind: WindConfig::steady(30.0),
                ..Default::default()
            },
            frames: 333,
        }
    }

    /// Default banner hanging in still air.
    pub fn becalmed() -> Self {
        Self {
            kind: ScenarioKind::Becalmed,
            config: SimulatorConfig::calm(),
            frames: 333,
        }
    }

    pub fn from_kind(kind: ScenarioKind) -> Self {
        match kind {
            ScenarioKind::HangingBanner => Self::hanging_banner(),
            ScenarioKind::CornerPinned => Self::corner_pinned(),
            ScenarioKind::Becalmed => Self::becalmed(),
        }
    }

    /// Overrides the frame count.
    pub fn with_frames(mut self, frames: u32) -> Self {
        self.frames = frames;
        self
    }
}
