//! Seasonal decomposition of a cleaned series.

pub mod decompose;

pub use decompose::{DecomposeConfig, Decomposition, SeasonalDecomposer};
