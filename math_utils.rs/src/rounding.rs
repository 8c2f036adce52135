//! Integer helpers for lengths, spacings and centres that are derived from
//! floating point quantities.

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

/// Round half up (`floor(val + 0.5)`) and convert to `usize`.
///
/// Negative values and NaN saturate to 0, values beyond `usize::MAX` saturate to `usize::MAX`.
///
/// ```
/// use math_utils::rounding::round_half_up_to_usize;
///
/// assert_eq!(round_half_up_to_usize(2.5), 3);
/// assert_eq!(round_half_up_to_usize(2.499), 2);
/// assert_eq!(round_half_up_to_usize(0.49), 0);
/// ```
#[must_use]
pub fn round_half_up_to_usize(val: f64) -> usize {
	(val + 0.5).floor() as usize
}

/// Integer division rounding towards positive infinity.
///
/// # Panics
/// - if `rhs` is 0.
#[must_use]
pub const fn ceil_div(lhs: usize, rhs: usize) -> usize {
	assert!(rhs > 0, "division by zero");
	lhs / rhs + if lhs % rhs == 0 { 0 } else { 1 }
}

/// The smallest multiple of `step` that is greater than or equal to `val`.
///
/// ```
/// use math_utils::rounding::ceil_to_multiple;
///
/// assert_eq!(ceil_to_multiple(10, 4), 12);
/// assert_eq!(ceil_to_multiple(12, 4), 12);
/// assert_eq!(ceil_to_multiple(0, 4), 0);
/// ```
///
/// # Panics
/// - if `step` is 0.
#[must_use]
pub const fn ceil_to_multiple(val: usize, step: usize) -> usize {
	ceil_div(val, step) * step
}
