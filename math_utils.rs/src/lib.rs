pub mod rounding;
pub mod stats;
