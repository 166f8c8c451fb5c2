//! Feature engineering over a cleaned series.

pub mod lag;

pub use lag::{engineer, engineer_samples, FeatureSet};
