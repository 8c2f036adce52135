use log::debug;
use math_utils::{
	rounding::round_half_up_to_usize,
	stats::{arg_max, mean},
};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use rustfft::num_complex::Complex64;

use super::DenseKernel;
use crate::DerivedGeometry;

/// Weight that compensates the energy of the atom windows, so that forward and inverse
/// projections are consistent in amplitude across bins.
///
/// The estimate is based on the diagonal of the Gram matrix of the columns between the
/// peak of the first row and the peak of the last row (`q` is the user supplied quality
/// factor, not the effective one).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn normalization_weight(dense: &DenseKernel, q: f64, geometry: &DerivedGeometry) -> f64 {
	let (column_start, n_of_columns) = column_window(dense);
	let gram = gram_matrix(dense, column_start, n_of_columns);

	let margin = round_half_up_to_usize(1. / q);
	let end = n_of_columns.saturating_sub(margin).saturating_sub(2);
	let diagonal: Vec<f64> = (margin..end)
		.map(|i| gram[i * n_of_columns + i].norm())
		.collect();

	let mut weight = geometry.fft_hop() as f64 / geometry.fft_size() as f64;
	if let Ok(avg) = mean(&diagonal) {
		weight /= avg;
	}
	let weight = weight.sqrt();

	debug!(
		"weight = {weight} (from {} elements in wK, ncols = {n_of_columns}, q = {q})",
		diagonal.len()
	);

	weight
}

/// First column and number of columns between the peak of the first row and
/// the peak of the last row, both included. The window is empty if the
/// peaks are in reverse order.
fn column_window(dense: &DenseKernel) -> (usize, usize) {
	let peak_of = |row: &[Complex64]| arg_max(row.iter().map(|c| c.norm())).unwrap_or(0);
	let first = peak_of(dense.row(0));
	let last = peak_of(dense.row(dense.n_of_rows() - 1));
	(first, (last + 1).saturating_sub(first))
}

/// `n_of_columns * n_of_columns` matrix, row major, with
/// `gram[i][j] = sum over rows of row[start + i] * conj(row[start + j])`.
pub(crate) fn gram_matrix(
	dense: &DenseKernel,
	column_start: usize,
	n_of_columns: usize,
) -> Vec<Complex64> {
	let mut gram = vec![Complex64::default(); n_of_columns * n_of_columns];
	if n_of_columns == 0 {
		return gram;
	}

	let fill_row = |(i, gram_row): (usize, &mut [Complex64])| {
		for (j, g) in gram_row.iter_mut().enumerate() {
			*g = dense
				.rows()
				.map(|row| row[column_start + i] * row[column_start + j].conj())
				.sum();
		}
	};

	#[cfg(feature = "parallel")]
	gram.par_chunks_mut(n_of_columns).enumerate().for_each(fill_row);
	#[cfg(not(feature = "parallel"))]
	gram.chunks_mut(n_of_columns).enumerate().for_each(fill_row);

	gram
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::KernelParams;

	#[test]
	fn test_gram_matrix_is_hermitian() {
		let data: Vec<Complex64> = (0..4 * 8)
			.map(|i| Complex64::new(f64::from(i % 5) - 2., f64::from(i % 3)))
			.collect();
		let dense = DenseKernel::from_rows(8, data).unwrap();
		let n = 5;
		let gram = gram_matrix(&dense, 2, n);

		for i in 0..n {
			let energy: f64 = dense.rows().map(|row| row[2 + i].norm_sqr()).sum();
			assert!((gram[i * n + i].re - energy).abs() < 1e-12);
			assert!(gram[i * n + i].im.abs() < 1e-12);
			for j in 0..n {
				assert!((gram[i * n + j] - gram[j * n + i].conj()).norm() < 1e-12);
			}
		}
	}

	#[test]
	fn test_gram_matrix_empty_window() {
		let dense = DenseKernel::from_rows(4, vec![Complex64::new(1., 0.); 8]).unwrap();
		assert!(gram_matrix(&dense, 0, 0).is_empty());
	}

	#[test]
	fn test_column_window_follows_row_peaks() {
		let mut data = vec![Complex64::default(); 3 * 16];
		data[3] = Complex64::new(1., 0.);
		data[16 + 7] = Complex64::new(0., 2.);
		data[32 + 11] = Complex64::new(-3., 0.);
		let dense = DenseKernel::from_rows(16, data).unwrap();
		assert_eq!(column_window(&dense), (3, 9));
	}

	#[test]
	fn test_column_window_reversed_peaks() {
		let mut data = vec![Complex64::default(); 2 * 16];
		data[9] = Complex64::new(1., 0.);
		data[16 + 2] = Complex64::new(1., 0.);
		let dense = DenseKernel::from_rows(16, data).unwrap();
		assert_eq!(column_window(&dense).1, 0);
	}

	#[test]
	#[allow(clippy::cast_precision_loss)]
	fn test_weight_falls_back_to_hop_ratio() {
		let params = KernelParams::new(44_100., 880., 1, 12);
		let geometry = DerivedGeometry::derive(&params).unwrap();
		// both peaks on the same column: a single column window, no diagonal samples
		let mut data = vec![Complex64::default(); 2 * geometry.fft_size()];
		data[5] = Complex64::new(0.5, 0.);
		data[geometry.fft_size() + 5] = Complex64::new(0.25, 0.);
		let dense = DenseKernel::from_rows(geometry.fft_size(), data).unwrap();

		let expected = (geometry.fft_hop() as f64 / geometry.fft_size() as f64).sqrt();
		assert!((normalization_weight(&dense, params.q, &geometry) - expected).abs() < 1e-15);
	}

	#[test]
	fn test_weight_of_built_kernel() {
		let params = KernelParams::new(44_100., 880., 1, 12);
		let geometry = DerivedGeometry::derive(&params).unwrap();
		let dense = DenseKernel::build(&params, &geometry).unwrap();
		let weight = normalization_weight(&dense, params.q, &geometry);
		assert!(weight.is_finite());
		assert!(weight > 0.);
		assert_eq!(weight.to_bits(), normalization_weight(&dense, params.q, &geometry).to_bits());
	}
}
