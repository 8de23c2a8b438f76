use crate::color::Rgb;

const SECTOR: u8 = 85;

/// Map a position on the 256-step color wheel to a fully saturated color.
///
/// The wheel runs red → green → blue → red in three linear sectors of 85
/// steps each, so `0` is red, `85` is green and `170` is blue. Each channel
/// ramps by 3 per step, which keeps `r + g + b == 255` for every position.
pub const fn color_wheel(position: u8) -> Rgb {
    if position < SECTOR {
        Rgb {
            r: 255 - position * 3,
            g: position * 3,
            b: 0,
        }
    } else if position < SECTOR * 2 {
        let position = position - SECTOR;
        Rgb {
            r: 0,
            g: 255 - position * 3,
            b: position * 3,
        }
    } else {
        let position = position - SECTOR * 2;
        Rgb {
            r: position * 3,
            g: 0,
            b: 255 - position * 3,
        }
    }
}
