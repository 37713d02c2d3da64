/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math for efficiency on embedded systems. The result never
/// exceeds `value`, so it cannot wrap.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Clamp a wide intermediate into a channel value
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn saturate8(value: i32) -> u8 {
    if value <= 0 {
        0
    } else if value >= u8::MAX as i32 {
        u8::MAX
    } else {
        value as u8
    }
}

/// Scale `value` by `numerator / denominator`, saturating at 255.
///
/// A zero denominator yields 0.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn ratio8(value: u8, numerator: u32, denominator: u32) -> u8 {
    if denominator == 0 {
        return 0;
    }
    let scaled = value as u64 * numerator as u64 / denominator as u64;
    if scaled > u8::MAX as u64 {
        u8::MAX
    } else {
        scaled as u8
    }
}
