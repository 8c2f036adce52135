use std::{f64::consts::TAU, slice::ChunksExact, sync::Arc};

use log::{debug, trace};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use rustfft::{num_complex::Complex64, Fft, FftPlanner};

use crate::{
	geometry::{atom_length, bin_centre_frequency},
	CqError, DerivedGeometry, KernelParams,
};

/// Kernel rows before sparsification: `fft_size` columns per row, rows stored
/// back to back in (bin, atom) order.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseKernel {
	fft_size: usize,
	data: Vec<Complex64>,
}

impl DenseKernel {
	/// Build the frequency domain representation of every atom of every bin.
	///
	/// # Errors
	/// - [`CqError::UnsupportedWindow`] or [`CqError::InvalidWindowLength`] if a window can't be generated.
	/// - [`CqError::EmptyKernel`] if no rows were produced.
	pub fn build(params: &KernelParams, geometry: &DerivedGeometry) -> Result<Self, CqError> {
		let mut planner = FftPlanner::new();
		let builder = AtomBuilder {
			params,
			geometry,
			fft_processor: planner.plan_fft_forward(geometry.fft_size()),
		};

		#[cfg(feature = "parallel")]
		let bins = (0..params.bins_per_octave)
			.into_par_iter()
			.map(|bin| builder.bin_rows(bin))
			.collect::<Result<Vec<_>, _>>()?;
		#[cfg(not(feature = "parallel"))]
		let bins = (0..params.bins_per_octave)
			.map(|bin| builder.bin_rows(bin))
			.collect::<Result<Vec<_>, _>>()?;

		let dense = Self::from_rows(geometry.fft_size(), bins.concat())?;

		debug!(
			"size = {} * {} (fft size = {})",
			dense.n_of_rows(),
			dense.fft_size,
			geometry.fft_size()
		);

		Ok(dense)
	}

	pub(crate) fn from_rows(fft_size: usize, data: Vec<Complex64>) -> Result<Self, CqError> {
		debug_assert_eq!(data.len() % fft_size, 0, "partial row");
		if data.is_empty() {
			Err(CqError::EmptyKernel)
		} else {
			Ok(Self { fft_size, data })
		}
	}

	#[must_use]
	pub const fn fft_size(&self) -> usize {
		self.fft_size
	}

	#[must_use]
	pub fn n_of_rows(&self) -> usize {
		self.data.len() / self.fft_size
	}

	/// # Panics
	/// - if `index` is out of range.
	#[must_use]
	pub fn row(&self, index: usize) -> &[Complex64] {
		&self.data[index * self.fft_size..(index + 1) * self.fft_size]
	}

	pub fn rows(&self) -> ChunksExact<'_, Complex64> {
		self.data.chunks_exact(self.fft_size)
	}
}

struct AtomBuilder<'a> {
	params: &'a KernelParams,
	geometry: &'a DerivedGeometry,
	fft_processor: Arc<dyn Fft<f64>>,
}

impl AtomBuilder<'_> {
	/// Windowed complex exponential at the centre frequency of `bin`.
	#[allow(clippy::cast_precision_loss)]
	fn atom(&self, bin: usize) -> Result<Vec<Complex64>, CqError> {
		let atom_len = atom_length(self.params, self.geometry.q(), bin);
		let window = self.params.window.make_window(atom_len)?;
		let frequency = bin_centre_frequency(self.params, bin);

		trace!("bin {bin}: atom_len = {atom_len}, frequency = {frequency}");

		Ok(window
			.iter()
			.enumerate()
			.map(|(i, &w)| {
				Complex64::from_polar(w, TAU * frequency * i as f64 / self.params.sample_rate)
			})
			.collect())
	}

	/// The `atoms_per_frame` dense rows of `bin`, concatenated.
	#[allow(clippy::cast_precision_loss)]
	fn bin_rows(&self, bin: usize) -> Result<Vec<Complex64>, CqError> {
		let atom = self.atom(bin)?;
		let fft_size = self.geometry.fft_size();
		let atom_offset = self.geometry.atom_offset(atom.len());
		let threshold = self.params.magnitude_threshold;
		let normalization_factor = 1. / fft_size as f64;

		let mut rows = vec![Complex64::default(); self.geometry.atoms_per_frame() * fft_size];
		let mut scratch =
			vec![Complex64::default(); self.fft_processor.get_inplace_scratch_len()];

		for (i, row) in rows.chunks_exact_mut(fft_size).enumerate() {
			let shift = atom_offset + i * self.geometry.atom_spacing();
			row[shift..shift + atom.len()].copy_from_slice(&atom);

			self.fft_processor.process_with_scratch(row, &mut scratch);

			for c in row.iter_mut() {
				if c.norm() < threshold {
					*c = Complex64::default();
				} else {
					*c *= normalization_factor;
				}
			}
		}

		Ok(rows)
	}
}
