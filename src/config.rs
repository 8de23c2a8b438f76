//! Fixed configuration of the saber
//!
//! Every threshold and duration lives in one immutable record, validated
//! once when the engine is built.

use core::fmt;

use embassy_time::Duration;

use crate::color::{Rgb, WHITE};
use crate::gesture::GestureThresholds;
use crate::hue::{HUE_MAX, HUE_MIN};

/// Number of cells on the blade
pub const NUM_CELLS: usize = 144;

/// Time a present keeps the control thread busy, per cell
///
/// Measured on WS2812 strips: interrupts are off during the transfer, so
/// the monotonic clock cannot be sampled meanwhile.
pub const PRESENT_LATENCY_PER_CELL: Duration = Duration::from_micros(30);

/// Timings of the blade transitions and reactions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaberTimings {
    /// Estimated length of the power-on sound
    pub power_on: Duration,
    /// Estimated length of the power-off sound
    pub power_off: Duration,
    /// How long the hit color stays on the blade
    pub hit_flash: Duration,
    /// Hold after a hit or swing before polling again
    pub reaction_settle: Duration,
    /// Poll interval while waiting for the power button to be released
    pub debounce_poll: Duration,
    /// Poll interval while waiting for the power-off sound to end
    pub audio_poll: Duration,
}

impl SaberTimings {
    pub const DEFAULT: Self = Self {
        power_on: Duration::from_millis(200),
        power_off: Duration::from_millis(1150),
        hit_flash: Duration::from_millis(200),
        reaction_settle: Duration::from_millis(1000),
        debounce_poll: Duration::from_millis(200),
        audio_poll: Duration::from_millis(10),
    };
}

/// Configuration for the saber engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaberConfig {
    pub thresholds: GestureThresholds,
    pub timings: SaberTimings,
    /// Color flashed on a hit
    pub hit_color: Rgb,
    /// Hue counter value at startup
    pub initial_hue: u8,
    /// Global strip brightness (0-255 = 0.0-1.0)
    pub brightness: u8,
    /// Mix level of the idle hum under the effects (0-255 = 0.0-1.0)
    pub hum_level: u8,
    /// Drift compensation applied per cell after every present
    pub present_latency_per_cell: Duration,
}

impl Default for SaberConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl SaberConfig {
    pub const DEFAULT: Self = Self {
        thresholds: GestureThresholds::DEFAULT,
        timings: SaberTimings::DEFAULT,
        hit_color: WHITE,
        initial_hue: 85,
        brightness: 191,
        hum_level: 51,
        present_latency_per_cell: PRESENT_LATENCY_PER_CELL,
    };

    /// Check the invariants the engine relies on
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn validate(self) -> Result<Self, ConfigError> {
        let GestureThresholds { hit, swing } = self.thresholds;
        if !(swing >= 0.0) {
            return Err(ConfigError::NegativeThreshold);
        }
        if !(hit > swing) {
            return Err(ConfigError::ThresholdOrder);
        }

        let timings = self.timings;
        if timings.power_on.as_ticks() == 0 {
            return Err(ConfigError::ZeroDuration("power_on"));
        }
        if timings.power_off.as_ticks() == 0 {
            return Err(ConfigError::ZeroDuration("power_off"));
        }
        if timings.debounce_poll.as_ticks() == 0 {
            return Err(ConfigError::ZeroDuration("debounce_poll"));
        }
        if timings.audio_poll.as_ticks() == 0 {
            return Err(ConfigError::ZeroDuration("audio_poll"));
        }

        if !(HUE_MIN..=HUE_MAX).contains(&self.initial_hue) {
            return Err(ConfigError::HueOutOfRange(self.initial_hue));
        }

        Ok(self)
    }
}

/// Error returned by [`SaberConfig::validate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Hit threshold is not above the swing threshold
    ThresholdOrder,
    /// Swing threshold is negative or NaN
    NegativeThreshold,
    /// A duration the engine divides by or polls with is zero
    ZeroDuration(&'static str),
    /// Initial hue is outside of the counter range
    HueOutOfRange(u8),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThresholdOrder => f.write_str("hit threshold must be above swing threshold"),
            Self::NegativeThreshold => f.write_str("swing threshold must not be negative"),
            Self::ZeroDuration(name) => write!(f, "`{name}` must be longer than zero"),
            Self::HueOutOfRange(hue) => {
                write!(f, "initial hue {hue} is outside {HUE_MIN}..={HUE_MAX}")
            }
        }
    }
}
