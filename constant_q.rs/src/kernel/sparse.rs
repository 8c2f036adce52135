use rustfft::num_complex::Complex64;

use super::DenseKernel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RowSpan {
	origin: usize,
	offset: usize,
	len: usize,
}

/// A row of the sparse kernel: the coefficients of the contiguous span
/// that starts at column `origin` of the corresponding dense row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparseRow<'a> {
	pub origin: usize,
	pub coefficients: &'a [Complex64],
}

impl SparseRow<'_> {
	/// One past the last column covered by this row.
	#[must_use]
	pub fn end(&self) -> usize {
		self.origin + self.coefficients.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.coefficients.is_empty()
	}
}

/// Weighted conjugate of the dense kernel, with the leading and trailing zeros
/// of every row trimmed. Coefficients of all rows share one buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseKernel {
	fft_size: usize,
	spans: Vec<RowSpan>,
	coefficients: Vec<Complex64>,
}

impl SparseKernel {
	#[must_use]
	pub fn from_dense(dense: &DenseKernel, weight: f64) -> Self {
		let is_non_zero = |c: &Complex64| c.norm() != 0.;

		let mut spans = Vec::with_capacity(dense.n_of_rows());
		let mut coefficients = Vec::new();

		for row in dense.rows() {
			let offset = coefficients.len();
			let span = match row.iter().rposition(is_non_zero) {
				None => RowSpan {
					origin: 0,
					offset,
					len: 0,
				},
				Some(last) => {
					let origin = row[..=last].iter().position(is_non_zero).unwrap_or(last);
					coefficients.extend(row[origin..=last].iter().map(|c| c.conj() * weight));
					RowSpan {
						origin,
						offset,
						len: last + 1 - origin,
					}
				}
			};
			spans.push(span);
		}

		Self {
			fft_size: dense.fft_size(),
			spans,
			coefficients,
		}
	}

	/// Width of the dense rows this kernel was made from.
	#[must_use]
	pub const fn fft_size(&self) -> usize {
		self.fft_size
	}

	#[must_use]
	pub fn n_of_rows(&self) -> usize {
		self.spans.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.spans.is_empty()
	}

	/// Total number of stored coefficients, interior zeros included.
	#[must_use]
	pub fn n_of_coefficients(&self) -> usize {
		self.coefficients.len()
	}

	/// # Panics
	/// - if `index` is out of range.
	#[must_use]
	pub fn row(&self, index: usize) -> SparseRow<'_> {
		self.to_row(&self.spans[index])
	}

	pub fn rows(&self) -> impl ExactSizeIterator<Item = SparseRow<'_>> + '_ {
		self.spans.iter().map(|span| self.to_row(span))
	}

	fn to_row(&self, span: &RowSpan) -> SparseRow<'_> {
		SparseRow {
			origin: span.origin,
			coefficients: &self.coefficients[span.offset..span.offset + span.len],
		}
	}
}
