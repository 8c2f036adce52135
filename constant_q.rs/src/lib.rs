//! Single-octave constant-Q transform kernel.
//!
//! A [`CqKernel`] maps one FFT frame (as produced by e.g. `rustfft`) to the constant-Q
//! bins of one octave, and back. Stacking octaves over downsampled copies of the signal
//! is left to the caller, who can schedule its FFT frames using [`CqKernel::fft_size`]
//! and [`CqKernel::fft_hop`].
//!
//! ```
//! use constant_q::{num_complex::Complex64, CqKernel, KernelParams};
//!
//! let kernel = CqKernel::new(&KernelParams::new(44_100., 880., 1, 12)).unwrap();
//! let spectrum = vec![Complex64::default(); kernel.fft_size()];
//! let bins = kernel.forward_project(&spectrum).unwrap();
//! assert_eq!(bins.len(), 12 * kernel.atoms_per_frame());
//! ```

#![allow(clippy::cast_possible_truncation)]

mod error;
pub use error::*;

mod params;
pub use params::*;

pub mod geometry;
pub use geometry::DerivedGeometry;

mod windowing_fn;
pub use windowing_fn::*;

pub mod windowing_fns;

pub mod kernel;
pub use kernel::CqKernel;

mod projection;

pub use rustfft::num_complex;
