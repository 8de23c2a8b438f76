#![no_std]

/// Print a diagnostic line when the `esp32-log` feature is enabled
macro_rules! log {
    ($($arg:tt)*) => {{
        #[cfg(feature = "esp32-log")]
        esp_println::println!($($arg)*);
        #[cfg(not(feature = "esp32-log"))]
        let _ = format_args!($($arg)*);
    }};
}
pub(crate) use log;

pub mod audio;
pub mod bounds;
pub mod clock;
pub mod color;
pub mod config;
pub mod engine;
pub mod fill;
pub mod gesture;
pub mod hue;
pub mod math8;
pub mod strip;

pub use audio::{AudioCue, AudioError, Cue, Voice};
pub use bounds::CellRange;
pub use clock::{Clock, SystemClock};
pub use config::{ConfigError, NUM_CELLS, SaberConfig, SaberTimings};
pub use engine::{EngineError, EngineState, Mode, Phase, SaberEngine, StepOutcome};
pub use fill::{FillAnimator, FillDirection, FillError, FillReport, FillRequest};
pub use gesture::{
    GestureClass, GestureSample, GestureThresholds, MotionSensor, SensorError, classify,
};
pub use hue::HueCounter;
pub use strip::{LightStrip, SmartLedsOutput};

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// The light strip is generic over this trait.
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]);

    /// Switch the power rail of the strip (and amplifier)
    fn set_enabled(&mut self, _enabled: bool) {}
}

/// Push buttons of the hilt
pub trait Controls {
    /// Power button
    fn primary_pressed(&mut self) -> bool;

    /// Color button
    fn secondary_pressed(&mut self) -> bool;
}
