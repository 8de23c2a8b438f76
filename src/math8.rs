use embassy_time::Duration;

/// Exponent of the fill easing curve.
///
/// `0.5` is a square root: the visible run grows fast at first and slows
/// down towards the end, following the attack of the power sounds.
pub const EASE_EXPONENT: f32 = 0.5;

/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math for efficiency on embedded systems.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Fraction of `duration` covered by `elapsed`, clamped to `0.0..=1.0`
///
/// A zero `duration` counts as already complete.
#[allow(clippy::cast_precision_loss)]
pub fn progress(elapsed: Duration, duration: Duration) -> f32 {
    let total = duration.as_micros();
    if total == 0 {
        return 1.0;
    }
    let elapsed = elapsed.as_micros().min(total);
    elapsed as f32 / total as f32
}

/// Apply the square-root easing curve to a linear fraction
#[inline]
pub fn ease_sqrt(fraction: f32) -> f32 {
    libm::powf(fraction.clamp(0.0, 1.0), EASE_EXPONENT)
}

/// Round a non-negative value half-up (`2.5` becomes `3`)
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn round_half_up(value: f32) -> usize {
    if value <= 0.0 {
        return 0;
    }
    libm::floorf(value + 0.5) as usize
}
