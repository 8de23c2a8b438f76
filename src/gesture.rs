//! Gesture classification from raw acceleration
//!
//! Thresholds are compared against the squared magnitude of the sample so
//! the polling loop never takes a square root.

use crate::engine::Mode;

/// Default squared acceleration above which a sample is a hit
pub const HIT_THRESHOLD: f32 = 400.0;

/// Default squared acceleration above which a sample is a swing
pub const SWING_THRESHOLD: f32 = 200.0;

/// One tri-axis acceleration reading
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GestureSample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl GestureSample {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// `x² + y² + z²`
    ///
    /// All three axes count, whatever the mounting orientation.
    pub fn magnitude_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }
}

/// Discrete gesture detected in a single poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureClass {
    Idle,
    Swing,
    Hit,
}

impl GestureClass {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Swing => "swing",
            Self::Hit => "hit",
        }
    }
}

/// Squared-magnitude thresholds
///
/// `hit` must stay above `swing`, otherwise every swing classifies as a hit.
/// [`crate::SaberConfig::validate`] enforces this.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureThresholds {
    pub hit: f32,
    pub swing: f32,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl GestureThresholds {
    pub const DEFAULT: Self = Self {
        hit: HIT_THRESHOLD,
        swing: SWING_THRESHOLD,
    };
}

/// Classify a sample
///
/// Hits are recognised in any powered mode. Swings only while the blade is
/// armed, i.e. on and idle.
pub fn classify(sample: GestureSample, mode: Mode, thresholds: &GestureThresholds) -> GestureClass {
    let magnitude = sample.magnitude_squared();
    if magnitude > thresholds.hit {
        GestureClass::Hit
    } else if mode.is_armed() && magnitude > thresholds.swing {
        GestureClass::Swing
    } else {
        GestureClass::Idle
    }
}

/// Source of acceleration samples
pub trait MotionSensor {
    fn read(&mut self) -> Result<GestureSample, SensorError>;
}

/// Error returned by a [`MotionSensor`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// Bus transfer failed
    Bus,
    /// Sensor has no sample available
    NotReady,
}

impl core::fmt::Display for SensorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus => f.write_str("motion sensor bus error"),
            Self::NotReady => f.write_str("motion sensor not ready"),
        }
    }
}
