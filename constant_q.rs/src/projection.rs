use rustfft::num_complex::Complex64;

use crate::{CqError, CqKernel};

impl CqKernel {
	/// Project one FFT frame onto the constant-Q bins.
	///
	/// The returned `Vec` has one value per kernel row, see [`CqKernel::row_index`].
	///
	/// # Errors
	/// - [`CqError::IncompatibleLength`] if `spectrum` is shorter than [`CqKernel::fft_size`].
	/// - [`CqError::EmptyKernel`] if the kernel has no rows.
	pub fn forward_project(&self, spectrum: &[Complex64]) -> Result<Vec<Complex64>, CqError> {
		let mut coefficients = vec![Complex64::default(); self.row_count()];
		self.forward_project_into(spectrum, &mut coefficients)?;
		Ok(coefficients)
	}

	/// Same as [`CqKernel::forward_project`], writing into a caller provided buffer
	/// of length [`CqKernel::row_count`].
	///
	/// # Errors
	/// - [`CqError::IncompatibleLength`] if `spectrum` or `coefficients` have the wrong size.
	/// - [`CqError::EmptyKernel`] if the kernel has no rows.
	pub fn forward_project_into(
		&self,
		spectrum: &[Complex64],
		coefficients: &mut [Complex64],
	) -> Result<(), CqError> {
		let kernel = self.sparse();
		if kernel.is_empty() {
			return Err(CqError::EmptyKernel);
		}
		check_len(spectrum.len() >= self.fft_size(), self.fft_size(), spectrum.len())?;
		check_len(
			coefficients.len() == kernel.n_of_rows(),
			kernel.n_of_rows(),
			coefficients.len(),
		)?;

		// the kernel is stored conjugated, this is a plain sparse dot product
		for (dst, row) in coefficients.iter_mut().zip(kernel.rows()) {
			*dst = row
				.coefficients
				.iter()
				.zip(&spectrum[row.origin..])
				.map(|(k, s)| s * k)
				.sum();
		}

		Ok(())
	}

	/// Map constant-Q coefficients back to an FFT frame of [`CqKernel::fft_size`] bins.
	///
	/// # Errors
	/// - [`CqError::IncompatibleLength`] if `coefficients` doesn't have one value per kernel row.
	/// - [`CqError::EmptyKernel`] if the kernel has no rows.
	pub fn inverse_project(&self, coefficients: &[Complex64]) -> Result<Vec<Complex64>, CqError> {
		let mut spectrum = vec![Complex64::default(); self.fft_size()];
		self.inverse_project_into(coefficients, &mut spectrum)?;
		Ok(spectrum)
	}

	/// Same as [`CqKernel::inverse_project`], writing into a caller provided buffer
	/// of length [`CqKernel::fft_size`]. The buffer is overwritten.
	///
	/// # Errors
	/// - [`CqError::IncompatibleLength`] if `coefficients` or `spectrum` have the wrong size.
	/// - [`CqError::EmptyKernel`] if the kernel has no rows.
	pub fn inverse_project_into(
		&self,
		coefficients: &[Complex64],
		spectrum: &mut [Complex64],
	) -> Result<(), CqError> {
		let kernel = self.sparse();
		if kernel.is_empty() {
			return Err(CqError::EmptyKernel);
		}
		check_len(
			coefficients.len() == kernel.n_of_rows(),
			kernel.n_of_rows(),
			coefficients.len(),
		)?;
		check_len(spectrum.len() == self.fft_size(), self.fft_size(), spectrum.len())?;

		spectrum.fill(Complex64::default());
		for (c, row) in coefficients.iter().zip(kernel.rows()) {
			for (dst, k) in spectrum[row.origin..row.end()]
				.iter_mut()
				.zip(row.coefficients)
			{
				*dst += c * k.conj();
			}
		}

		Ok(())
	}
}

fn check_len(ok: bool, expected: usize, actual: usize) -> Result<(), CqError> {
	if ok {
		Ok(())
	} else {
		Err(CqError::IncompatibleLength { expected, actual })
	}
}
