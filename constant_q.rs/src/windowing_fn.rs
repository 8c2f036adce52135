use crate::{windowing_fns::BlackmanHarrisWindow, CqError};

pub trait WindowingFn {
	fn ratio_at(&self, index: usize, n_of_samples: usize) -> f64;
}

/// The window families a kernel can be configured with.
///
/// Only [`WindowKind::SqrtBlackmanHarris`] is currently implemented,
/// the other kinds are reserved and rejected when a window is requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum WindowKind {
	#[default]
	SqrtBlackmanHarris,
	SqrtBlackman,
	SqrtHann,
	BlackmanHarris,
	Blackman,
	Hann,
}

impl WindowKind {
	/// Shortest window that can be generated: the cosine sum is evaluated
	/// over `n_of_samples - 2` intervals.
	pub const MIN_LENGTH: usize = 3;

	#[must_use]
	pub const fn is_supported(self) -> bool {
		matches!(self, Self::SqrtBlackmanHarris)
	}

	/// Generate the window coefficients, normalized by the window length.
	///
	/// # Errors
	/// - [`CqError::UnsupportedWindow`] for reserved kinds.
	/// - [`CqError::InvalidWindowLength`] if `n_of_samples` is below [`WindowKind::MIN_LENGTH`].
	#[allow(clippy::cast_precision_loss)]
	pub fn make_window(self, n_of_samples: usize) -> Result<Vec<f64>, CqError> {
		if n_of_samples < Self::MIN_LENGTH {
			return Err(CqError::InvalidWindowLength(n_of_samples));
		}

		match self {
			Self::SqrtBlackmanHarris => {
				let windowing_fn = BlackmanHarrisWindow::new();
				let len = n_of_samples as f64;
				Ok((0..n_of_samples)
					.map(|i| windowing_fn.ratio_at(i, n_of_samples).sqrt() / len)
					.collect())
			}
			Self::SqrtBlackman
			| Self::SqrtHann
			| Self::BlackmanHarris
			| Self::Blackman
			| Self::Hann => Err(CqError::UnsupportedWindow(self)),
		}
	}
}
