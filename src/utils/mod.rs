//! Shared numeric utilities.

pub mod stats;

pub use stats::{mean, mean_of_squares, percentile_nearest, population_std, quantile_normal};
