use std::f64::consts::TAU;

use super::WindowingFn;

/// Four-term Blackman-Harris window, evaluated over `n_of_samples - 1` points
/// (denominator `n_of_samples - 2`) with the first point repeated at the end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlackmanHarrisWindow;

impl BlackmanHarrisWindow {
	const A0: f64 = 0.35875;
	const A1: f64 = 0.48829;
	const A2: f64 = 0.14128;
	const A3: f64 = 0.01168;

	#[must_use]
	pub fn new() -> Self {
		Self
	}
}

impl WindowingFn for BlackmanHarrisWindow {
	#[allow(clippy::cast_precision_loss)]
	fn ratio_at(&self, index: usize, n_of_samples: usize) -> f64 {
		debug_assert!(n_of_samples >= 3, "window too short: {n_of_samples}");
		let index = if index == n_of_samples - 1 { 0 } else { index };
		let x = TAU * index as f64 / (n_of_samples - 2) as f64;
		Self::A0 - Self::A1 * x.cos() + Self::A2 * (2. * x).cos() - Self::A3 * (3. * x).cos()
	}
}
