mod dense;
pub use dense::*;

mod normalization;
pub use normalization::*;

mod sparse;
pub use sparse::*;

use crate::{geometry::bin_centre_frequency, CqError, DerivedGeometry, KernelParams};

/// Constant-Q transform kernel for one octave.
///
/// Built once from [`KernelParams`], then immutable: it can be shared between
/// threads and used for any number of concurrent projections.
#[derive(Debug, Clone, PartialEq)]
pub struct CqKernel {
	params: KernelParams,
	geometry: DerivedGeometry,
	weight: f64,
	sparse: SparseKernel,
}

impl CqKernel {
	/// Derive the geometry, build the dense atom spectra, estimate the
	/// normalisation weight and compact everything into the sparse kernel.
	///
	/// # Errors
	/// - [`CqError::InvalidParameter`] if `params` doesn't pass validation.
	/// - [`CqError::InvalidGeometry`] if the parameters lead to degenerate atoms.
	/// - [`CqError::UnsupportedWindow`] if the window kind is not implemented.
	/// - [`CqError::InvalidWindowLength`], [`CqError::EmptyKernel`] on broken internal invariants.
	pub fn new(params: &KernelParams) -> Result<Self, CqError> {
		let geometry = DerivedGeometry::derive(params)?;
		let dense = DenseKernel::build(params, &geometry)?;
		let weight = normalization_weight(&dense, params.q, &geometry);
		let sparse = SparseKernel::from_dense(&dense, weight);

		Ok(Self {
			params: *params,
			geometry,
			weight,
			sparse,
		})
	}

	#[must_use]
	pub const fn params(&self) -> &KernelParams {
		&self.params
	}

	#[must_use]
	pub const fn geometry(&self) -> &DerivedGeometry {
		&self.geometry
	}

	#[must_use]
	pub const fn sparse(&self) -> &SparseKernel {
		&self.sparse
	}

	#[must_use]
	pub const fn weight(&self) -> f64 {
		self.weight
	}

	/// Number of bins of the whole constant-Q range, across all octaves.
	#[must_use]
	pub const fn bin_count(&self) -> usize {
		self.params.bin_count()
	}

	/// Number of kernel rows, i.e. the length of a forward projection.
	#[must_use]
	pub const fn row_count(&self) -> usize {
		self.params.bins_per_octave * self.geometry.atoms_per_frame()
	}

	/// Row holding the given atom of the given (zero-based) bin.
	#[must_use]
	pub const fn row_index(&self, bin: usize, atom: usize) -> Option<usize> {
		if bin < self.params.bins_per_octave && atom < self.geometry.atoms_per_frame() {
			Some(bin * self.geometry.atoms_per_frame() + atom)
		} else {
			None
		}
	}

	/// Centre frequencies of the bins of this octave, ascending.
	#[must_use]
	pub fn bin_frequencies(&self) -> Vec<f64> {
		(0..self.params.bins_per_octave)
			.map(|bin| bin_centre_frequency(&self.params, bin))
			.collect()
	}

	#[must_use]
	pub const fn bins_per_octave(&self) -> usize {
		self.params.bins_per_octave
	}

	#[must_use]
	pub const fn octave_count(&self) -> usize {
		self.params.octave_count
	}

	#[must_use]
	pub const fn q(&self) -> f64 {
		self.geometry.q()
	}

	#[must_use]
	pub const fn fft_size(&self) -> usize {
		self.geometry.fft_size()
	}

	#[must_use]
	pub const fn fft_hop(&self) -> usize {
		self.geometry.fft_hop()
	}

	#[must_use]
	pub const fn atoms_per_frame(&self) -> usize {
		self.geometry.atoms_per_frame()
	}

	#[must_use]
	pub const fn atom_spacing(&self) -> usize {
		self.geometry.atom_spacing()
	}

	#[must_use]
	pub const fn first_centre(&self) -> usize {
		self.geometry.first_centre()
	}

	#[must_use]
	pub const fn last_centre(&self) -> usize {
		self.geometry.last_centre()
	}
}
