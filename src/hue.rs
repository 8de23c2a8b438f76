use crate::color::{Rgb, color_wheel};

/// Lowest hue the counter produces
pub const HUE_MIN: u8 = 1;
/// Highest hue the counter produces; the next step wraps to [`HUE_MIN`]
pub const HUE_MAX: u8 = 254;

/// Hue selected with the secondary button
///
/// Always within `HUE_MIN..=HUE_MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HueCounter(u8);

impl HueCounter {
    /// Create a counter, clamping `hue` into range
    pub const fn new(hue: u8) -> Self {
        if hue < HUE_MIN {
            Self(HUE_MIN)
        } else if hue > HUE_MAX {
            Self(HUE_MAX)
        } else {
            Self(hue)
        }
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    /// Step to the next hue, wrapping 254 → 1
    pub fn advance(&mut self) -> u8 {
        self.0 = if self.0 >= HUE_MAX { HUE_MIN } else { self.0 + 1 };
        self.0
    }

    /// Color on the wheel for the current hue
    pub const fn color(self) -> Rgb {
        color_wheel(self.0)
    }
}
