//! Utility functions for the iced-pourover crate.

/// Format a countdown value as `m:ss`.
///
/// Minutes are not padded; seconds are always two digits.
///
/// # Example
///
/// ```
/// use iced_pourover::format_time;
///
/// assert_eq!(format_time(50), "0:50");
/// assert_eq!(format_time(125), "2:05");
/// ```
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Round a non-negative gram quantity to the nearest whole gram.
///
/// Halves round up. Negative or NaN input yields 0.
#[inline]
pub fn round_grams(value: f64) -> u32 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    let rounded = value.round();
    if rounded >= u32::MAX as f64 {
        u32::MAX
    } else {
        rounded as u32
    }
}

/// `ceil(seconds * 3 / 5)` in integer arithmetic.
///
/// Integer math keeps 60% marks exact for every duration.
#[inline]
pub(crate) fn ceil_sixty_percent(seconds: u32) -> u32 {
    let scaled = u64::from(seconds) * 3;
    ((scaled + 4) / 5) as u32
}
