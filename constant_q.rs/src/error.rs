use crate::WindowKind;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CqError {
	#[error("parameter `{name}` is out of range: {value}")]
	InvalidParameter { name: &'static str, value: f64 },
	#[error("degenerate atom length (max {max_atom_len}, min {min_atom_len} samples), can't make kernel")]
	InvalidGeometry {
		max_atom_len: usize,
		min_atom_len: usize,
	},
	#[error("window {0:?} is not supported")]
	UnsupportedWindow(WindowKind),
	#[error("invalid window length: {0}")]
	InvalidWindowLength(usize),
	#[error("kernel has no rows")]
	EmptyKernel,
	#[error("incompatible buffer length: expected {expected}, got {actual}")]
	IncompatibleLength { expected: usize, actual: usize },
}
