/// Maximum percentage accepted by [`percent8`]
pub const PERCENT_MAX: u8 = 100;

/// Scale an 8-bit value by a percentage (0-100 = 0.0-1.0)
///
/// Truncates toward zero. Uses integer math, which gives the same result as
/// multiplying by `percent / 100.0` and truncating, and makes 100 an exact
/// identity. Percentages above 100 are treated as 100.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn percent8(value: u8, percent: u8) -> u8 {
    let percent = if percent > PERCENT_MAX {
        PERCENT_MAX
    } else {
        percent
    };
    ((value as u16 * percent as u16) / PERCENT_MAX as u16) as u8
}

/// Clamp a percentage into the 0-100 range
#[inline]
pub const fn clamp_percent(percent: u8) -> u8 {
    if percent > PERCENT_MAX {
        PERCENT_MAX
    } else {
        percent
    }
}
