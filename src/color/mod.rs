mod wheel;

use smart_leds::RGB8;
pub use wheel::color_wheel;

pub type Rgb = RGB8;

/// All channels off
pub const OFF: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Full white, used for the hit flash
pub const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};
