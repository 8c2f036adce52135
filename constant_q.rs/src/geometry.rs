use log::debug;
use math_utils::rounding::{ceil_div, ceil_to_multiple, round_half_up_to_usize};

use crate::{CqError, KernelParams, WindowKind};

/// Kernel layout derived from [`KernelParams`]: atom lengths, atom placement
/// inside an FFT frame and the frame size/hop.
///
/// All lengths, spacings and centres are expressed in samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedGeometry {
	q: f64,
	max_atom_len: usize,
	min_atom_len: usize,
	atom_spacing: usize,
	atoms_per_frame: usize,
	first_centre: usize,
	last_centre: usize,
	fft_size: usize,
	fft_hop: usize,
}

impl DerivedGeometry {
	/// # Errors
	/// - [`CqError::InvalidParameter`] if `params` doesn't pass validation.
	/// - [`CqError::InvalidGeometry`] if the longest or the shortest atom is too short to be windowed,
	///   or if the atoms are too long to fit an addressable FFT frame.
	#[allow(clippy::cast_precision_loss)]
	pub fn derive(params: &KernelParams) -> Result<Self, CqError> {
		params.validate()?;

		let q = effective_q(params.q, params.bins_per_octave);
		let max_atom_len = atom_length(params, q, 0);
		let min_atom_len = atom_length(params, q, params.bins_per_octave - 1);

		let invalid = CqError::InvalidGeometry {
			max_atom_len,
			min_atom_len,
		};

		if min_atom_len < WindowKind::MIN_LENGTH
			|| max_atom_len < WindowKind::MIN_LENGTH
			|| max_atom_len > usize::MAX / 8
		{
			return Err(invalid);
		}

		let atom_spacing = round_half_up_to_usize(min_atom_len as f64 * params.atom_hop_factor + 0.5);
		let half_max_atom_len = ceil_div(max_atom_len, 2);
		let first_centre = ceil_to_multiple(half_max_atom_len, atom_spacing);
		let fft_size = (first_centre + half_max_atom_len)
			.checked_next_power_of_two()
			.ok_or(invalid)?;
		let atoms_per_frame = 1 + (fft_size - half_max_atom_len - first_centre) / atom_spacing;
		let last_centre = first_centre + (atoms_per_frame - 1) * atom_spacing;
		let fft_hop = last_centre + atom_spacing - first_centre;

		debug!(
			"atoms_per_frame = {atoms_per_frame} (q = {}, Q = {q}, atom_hop_factor = {}, atom_spacing = {atom_spacing}, fft_size = {fft_size}, max_atom_len = {max_atom_len}, first_centre = {first_centre})",
			params.q, params.atom_hop_factor
		);
		debug!("fft_hop = {fft_hop}");

		Ok(Self {
			q,
			max_atom_len,
			min_atom_len,
			atom_spacing,
			atoms_per_frame,
			first_centre,
			last_centre,
			fft_size,
			fft_hop,
		})
	}

	/// Quality factor after the bin spacing correction.
	#[must_use]
	pub const fn q(&self) -> f64 {
		self.q
	}

	/// Length of the atom of the lowest bin.
	#[must_use]
	pub const fn max_atom_len(&self) -> usize {
		self.max_atom_len
	}

	/// Length of the atom of the highest bin.
	#[must_use]
	pub const fn min_atom_len(&self) -> usize {
		self.min_atom_len
	}

	#[must_use]
	pub const fn atom_spacing(&self) -> usize {
		self.atom_spacing
	}

	#[must_use]
	pub const fn atoms_per_frame(&self) -> usize {
		self.atoms_per_frame
	}

	#[must_use]
	pub const fn first_centre(&self) -> usize {
		self.first_centre
	}

	#[must_use]
	pub const fn last_centre(&self) -> usize {
		self.last_centre
	}

	#[must_use]
	pub const fn fft_size(&self) -> usize {
		self.fft_size
	}

	/// Number of samples between two consecutive FFT frames.
	#[must_use]
	pub const fn fft_hop(&self) -> usize {
		self.fft_hop
	}

	/// Offset of the first sample of an atom of the given length, for the first
	/// atom of the frame.
	#[must_use]
	pub const fn atom_offset(&self, atom_len: usize) -> usize {
		self.first_centre - ceil_div(atom_len, 2)
	}
}

/// `q` corrected for the spacing between adjacent bins.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn effective_q(q: f64, bins_per_octave: usize) -> f64 {
	q / (2f64.powf(1. / bins_per_octave as f64) - 1.)
}

/// Centre frequency of a (zero-based) bin of the top octave.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn bin_centre_frequency(params: &KernelParams, bin: usize) -> f64 {
	params.min_frequency * 2f64.powf(bin as f64 / params.bins_per_octave as f64)
}

/// Length in samples of the atoms of a (zero-based) bin, given the effective `q`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn atom_length(params: &KernelParams, q: f64, bin: usize) -> usize {
	round_half_up_to_usize(q * params.sample_rate / bin_centre_frequency(params, bin))
}
