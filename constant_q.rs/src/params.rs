use crate::{CqError, WindowKind};

/// Physical parameters of a single-octave constant-Q kernel.
///
/// Note: `min_frequency` is the frequency of the lowest bin of the *top* octave,
/// not the lowest frequency of the whole constant-Q range.
/// See [`KernelParams::for_cq_range`] to derive it from the latter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelParams {
	pub sample_rate: f64,
	pub min_frequency: f64,
	pub octave_count: usize,
	pub bins_per_octave: usize,
	pub q: f64,
	pub atom_hop_factor: f64,
	pub magnitude_threshold: f64,
	pub window: WindowKind,
}

impl KernelParams {
	pub const DEFAULT_Q: f64 = 1.0;
	pub const DEFAULT_ATOM_HOP_FACTOR: f64 = 0.25;
	pub const DEFAULT_MAGNITUDE_THRESHOLD: f64 = 0.0005;

	#[must_use]
	pub const fn new(
		sample_rate: f64,
		min_frequency: f64,
		octave_count: usize,
		bins_per_octave: usize,
	) -> Self {
		Self {
			sample_rate,
			min_frequency,
			octave_count,
			bins_per_octave,
			q: Self::DEFAULT_Q,
			atom_hop_factor: Self::DEFAULT_ATOM_HOP_FACTOR,
			magnitude_threshold: Self::DEFAULT_MAGNITUDE_THRESHOLD,
			window: WindowKind::SqrtBlackmanHarris,
		}
	}

	/// Build the parameters from the lowest frequency of the complete constant-Q range,
	/// moving it up to the top octave, where the kernel operates.
	#[must_use]
	pub fn for_cq_range(
		sample_rate: f64,
		cq_min_frequency: f64,
		octave_count: usize,
		bins_per_octave: usize,
	) -> Self {
		Self::new(
			sample_rate,
			top_octave_min_frequency(cq_min_frequency, octave_count, bins_per_octave),
			octave_count,
			bins_per_octave,
		)
	}

	#[must_use]
	pub const fn with_q(mut self, q: f64) -> Self {
		self.q = q;
		self
	}

	#[must_use]
	pub const fn with_atom_hop_factor(mut self, atom_hop_factor: f64) -> Self {
		self.atom_hop_factor = atom_hop_factor;
		self
	}

	#[must_use]
	pub const fn with_magnitude_threshold(mut self, magnitude_threshold: f64) -> Self {
		self.magnitude_threshold = magnitude_threshold;
		self
	}

	#[must_use]
	pub const fn with_window(mut self, window: WindowKind) -> Self {
		self.window = window;
		self
	}

	/// Total number of bins of the constant-Q range this kernel is part of.
	#[must_use]
	pub const fn bin_count(&self) -> usize {
		self.octave_count * self.bins_per_octave
	}

	/// Check every field against its domain.
	///
	/// The window kind is not checked here, unsupported kinds are rejected
	/// when the first window is generated.
	///
	/// # Errors
	/// - [`CqError::InvalidParameter`] naming the first offending field.
	#[allow(clippy::cast_precision_loss)]
	pub fn validate(&self) -> Result<(), CqError> {
		fn check(name: &'static str, value: f64, ok: bool) -> Result<(), CqError> {
			if ok {
				Ok(())
			} else {
				Err(CqError::InvalidParameter { name, value })
			}
		}

		check(
			"sample_rate",
			self.sample_rate,
			self.sample_rate.is_finite() && self.sample_rate > 0.,
		)?;
		check(
			"min_frequency",
			self.min_frequency,
			self.min_frequency.is_finite() && self.min_frequency > 0.,
		)?;
		check(
			"octave_count",
			self.octave_count as f64,
			self.octave_count >= 1,
		)?;
		check(
			"bins_per_octave",
			self.bins_per_octave as f64,
			self.bins_per_octave >= 1,
		)?;
		check("q", self.q, self.q.is_finite() && self.q > 0.)?;
		check(
			"atom_hop_factor",
			self.atom_hop_factor,
			self.atom_hop_factor > 0. && self.atom_hop_factor <= 1.,
		)?;
		check(
			"magnitude_threshold",
			self.magnitude_threshold,
			self.magnitude_threshold >= 0.,
		)
	}
}

/// The frequency of the lowest bin of the top octave of a constant-Q range
/// that starts at `cq_min_frequency`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn top_octave_min_frequency(
	cq_min_frequency: f64,
	octave_count: usize,
	bins_per_octave: usize,
) -> f64 {
	cq_min_frequency
		* 2f64.powf(octave_count as f64 - 1.0 + 1.0 / bins_per_octave as f64)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let params = KernelParams::new(44_100., 55., 1, 12);
		assert!((params.q - 1.).abs() < f64::EPSILON);
		assert!((params.atom_hop_factor - 0.25).abs() < f64::EPSILON);
		assert!((params.magnitude_threshold - 0.0005).abs() < f64::EPSILON);
		assert_eq!(params.window, WindowKind::SqrtBlackmanHarris);
		assert_eq!(params.bin_count(), 12);
		assert_eq!(params.validate(), Ok(()));
	}

	#[test]
	fn test_for_cq_range() {
		let params = KernelParams::for_cq_range(44_100., 55., 3, 12);
		let expected = 55. * 2f64.powf(2. + 1. / 12.);
		assert!((params.min_frequency - expected).abs() < 1e-9);
		assert_eq!(params.bin_count(), 36);
	}

	#[test]
	fn test_validate_rejects_out_of_range() {
		let base = KernelParams::new(44_100., 55., 1, 12);

		let cases = [
			(KernelParams { sample_rate: 0., ..base }, "sample_rate"),
			(KernelParams { sample_rate: f64::NAN, ..base }, "sample_rate"),
			(KernelParams { min_frequency: -1., ..base }, "min_frequency"),
			(KernelParams { octave_count: 0, ..base }, "octave_count"),
			(KernelParams { bins_per_octave: 0, ..base }, "bins_per_octave"),
			(base.with_q(0.), "q"),
			(base.with_atom_hop_factor(0.), "atom_hop_factor"),
			(base.with_atom_hop_factor(1.5), "atom_hop_factor"),
			(base.with_magnitude_threshold(-0.1), "magnitude_threshold"),
			(base.with_magnitude_threshold(f64::NAN), "magnitude_threshold"),
		];

		for (params, field) in cases {
			match params.validate() {
				Err(CqError::InvalidParameter { name, .. }) => assert_eq!(name, field),
				other => panic!("expected {field} to be rejected, got {other:?}"),
			}
		}
	}

	#[test]
	fn test_validate_accepts_hop_factor_of_one() {
		let params = KernelParams::new(44_100., 55., 1, 12).with_atom_hop_factor(1.);
		assert_eq!(params.validate(), Ok(()));
	}
}
