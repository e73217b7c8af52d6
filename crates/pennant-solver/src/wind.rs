//! Wind: what the fan blows at the cloth each frame.
//!
//! The fan head can swing from side to side (yaw about +Y) inside a
//! fixed arc, reversing whenever it reaches either end. Strength gusts
//! slowly around its base value with a cosine of elapsed time.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use pennant_types::constants::{
    DEFAULT_GUST_AMPLITUDE, DEFAULT_SWEEP_DEGREES, DEFAULT_SWEEP_SPEED, DEFAULT_WIND_STRENGTH,
    GUST_PERIOD_MS,
};
use pennant_types::{PennantError, PennantResult};

/// The wind acting on one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindSample {
    /// Non-negative magnitude. Zero disables the wind pass entirely.
    pub strength: f32,
    /// Direction basis; normalized when the force is formed.
    pub direction: Vec3,
}

impl WindSample {
    pub fn new(strength: f32, direction: Vec3) -> Self {
        Self {
            strength,
            direction,
        }
    }

    pub fn calm() -> Self {
        Self::new(0.0, Vec3::Z)
    }

    #[inline]
    pub fn is_calm(&self) -> bool {
        !(self.strength > 0.0)
    }

    /// `normalize(direction) · strength`.
    #[inline]
    pub fn force(&self) -> Vec3 {
        self.direction.normalize_or_zero() * self.strength
    }
}

/// Fan settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindConfig {
    /// Base wind strength.
    pub strength: f32,
    /// Gust swing around the base strength; 0 keeps it steady.
    pub gust_amplitude: f32,
    /// Whether the fan head sweeps side to side.
    pub oscillate: bool,
    /// Full sweep arc in degrees, centred on `forward`.
    pub sweep_degrees: f32,
    /// Yaw change per frame, in radians.
    pub sweep_speed: f32,
    /// Direction the fan points at zero yaw.
    pub forward: [f32; 3],
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            strength: DEFAULT_WIND_STRENGTH,
            gust_amplitude: DEFAULT_GUST_AMPLITUDE,
            oscillate: false,
            sweep_degrees: DEFAULT_SWEEP_DEGREES,
            sweep_speed: DEFAULT_SWEEP_SPEED,
            forward: [0.0, 0.0, 1.0],
        }
    }
}

impl WindConfig {
    /// Fan off.
    pub fn calm() -> Self {
        Self {
            strength: 0.0,
            gust_amplitude: 0.0,
            ..Default::default()
        }
    }

    /// Constant wind along `forward`, no gusts, no sweep.
    pub fn steady(strength: f32) -> Self {
        Self {
            strength,
            gust_amplitude: 0.0,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> PennantResult<()> {
        if !(self.strength.is_finite() && self.strength >= 0.0) {
            return Err(PennantError::InvalidConfig(format!(
                "wind strength must be non-negative, got {}",
                self.strength
            )));
        }
        if !self.gust_amplitude.is_finite() || !self.sweep_speed.is_finite() {
            return Err(PennantError::InvalidConfig(
                "wind gust amplitude and sweep speed must be finite".into(),
            ));
        }
        if !(self.sweep_degrees > 0.0 && self.sweep_degrees <= 360.0) {
            return Err(PennantError::InvalidConfig(format!(
                "sweep arc must be in (0, 360] degrees, got {}",
                self.sweep_degrees
            )));
        }
        if Vec3::from(self.forward).length_squared() == 0.0 {
            return Err(PennantError::InvalidConfig("fan forward axis is zero".into()));
        }
        Ok(())
    }
}

fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

fn normalize(value: f32, min: f32, max: f32) -> f32 {
    (value - min) / (max - min)
}

/// The oscillating fan head.
#[derive(Debug, Clone, PartialEq)]
pub struct FanHead {
    yaw: f32,
    speed: f32,
    half_arc: f32,
    active: bool,
}

impl FanHead {
    pub fn new(sweep_degrees: f32, speed: f32) -> Self {
        Self {
            yaw: 0.0,
            speed,
            half_arc: (sweep_degrees * 0.5).to_radians(),
            active: true,
        }
    }

    /// Current yaw in radians; 0 faces `forward`.
    #[inline]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Signed yaw change per frame.
    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Starts or freezes the sweep. The head keeps its current yaw.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Moves one frame along the sweep, turning back at either end.
    pub fn advance(&mut self) {
        if !self.active {
            return;
        }
        self.yaw += self.speed;

        let t = normalize(
            clamp(self.yaw, -self.half_arc, self.half_arc),
            -self.half_arc,
            self.half_arc,
        );
        if (t >= 1.0 && self.speed > 0.0) || (t <= 0.0 && self.speed < 0.0) {
            self.speed = -self.speed;
        }
    }

    /// `forward` rotated by the current yaw about +Y.
    pub fn direction(&self, forward: Vec3) -> Vec3 {
        Quat::from_rotation_y(self.yaw) * forward
    }
}

/// Produces one [`WindSample`] per frame.
#[derive(Debug, Clone)]
pub struct WindSource {
    config: WindConfig,
    head: FanHead,
    elapsed_ms: f64,
}

impl WindSource {
    pub fn new(config: WindConfig) -> Self {
        let mut head = FanHead::new(config.sweep_degrees, config.sweep_speed);
        head.set_active(config.oscillate);
        Self {
            config,
            head,
            elapsed_ms: 0.0,
        }
    }

    pub fn config(&self) -> &WindConfig {
        &self.config
    }

    pub fn head(&self) -> &FanHead {
        &self.head
    }

    pub fn head_mut(&mut self) -> &mut FanHead {
        &mut self.head
    }

    /// Strength at the current time, never below zero.
    pub fn strength(&self) -> f32 {
        let gust = self.config.gust_amplitude as f64 * (self.elapsed_ms / GUST_PERIOD_MS).cos();
        (self.config.strength as f64 + gust).max(0.0) as f32
    }

    /// Samples the wind for this frame, then advances time by `dt` seconds.
    pub fn sample(&mut self, dt: f32) -> WindSample {
        let sample = WindSample::new(
            self.strength(),
            self.head.direction(Vec3::from(self.config.forward)),
        );
        self.elapsed_ms += dt as f64 * 1000.0;
        self.head.advance();
        sample
    }
}
